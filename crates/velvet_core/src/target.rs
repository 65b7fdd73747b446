//! Animation targets and the element registry
//!
//! Timelines address two kinds of targets: whole elements (looked up by
//! string ID, like `#hero` or `.right-leaf` in the markup) and text
//! segments produced by the segmenter. The registry provides O(1) lookup
//! from string IDs to element handles plus the resolved bounds the
//! trigger-region anchor math needs.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::geometry::ElementBounds;

new_key_type! {
    /// Handle to a registered element
    pub struct ElementId;
    /// Handle to a segment node inside a segment tree
    pub struct SegmentKey;
}

/// Non-owning reference to a text segment
///
/// Carries the generation of the segment tree that issued it; a tree rebuilt
/// by re-segmentation bumps its generation, so stale references are detected
/// at timeline construction instead of silently animating detached nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SegmentRef {
    pub key: SegmentKey,
    pub generation: u32,
}

/// A single addressable animation target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetHandle {
    Element(ElementId),
    Segment(SegmentRef),
}

impl From<ElementId> for TargetHandle {
    fn from(element: ElementId) -> Self {
        TargetHandle::Element(element)
    }
}

impl From<SegmentRef> for TargetHandle {
    fn from(segment: SegmentRef) -> Self {
        TargetHandle::Segment(segment)
    }
}

/// Registry mapping string IDs to element handles
///
/// Registration is last-wins; duplicate IDs log a warning in debug builds
/// (mirrors how the page would behave with a duplicated anchor id).
#[derive(Default)]
pub struct TargetRegistry {
    elements: SlotMap<ElementId, ElementBounds>,
    ids: FxHashMap<String, ElementId>,
    reverse: FxHashMap<ElementId, String>,
}

impl TargetRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element with its resolved page bounds
    pub fn register(&mut self, id: impl Into<String>, bounds: ElementBounds) -> ElementId {
        let id = id.into();

        #[cfg(debug_assertions)]
        if self.ids.contains_key(&id) {
            tracing::warn!("Duplicate element ID registered: {}", id);
        }

        let element = self.elements.insert(bounds);
        if let Some(old) = self.ids.insert(id.clone(), element) {
            self.elements.remove(old);
            self.reverse.remove(&old);
        }
        self.reverse.insert(element, id);
        element
    }

    /// Look up an element handle by string ID
    pub fn get(&self, id: &str) -> Option<ElementId> {
        self.ids.get(id).copied()
    }

    /// Look up a string ID by element handle (for diagnostics)
    pub fn get_id(&self, element: ElementId) -> Option<&str> {
        self.reverse.get(&element).map(String::as_str)
    }

    /// Resolved bounds of a registered element
    pub fn bounds(&self, element: ElementId) -> Option<ElementBounds> {
        self.elements.get(element).copied()
    }

    /// Update an element's bounds (e.g. after a reflow)
    pub fn set_bounds(&mut self, element: ElementId, bounds: ElementBounds) {
        if let Some(slot) = self.elements.get_mut(element) {
            *slot = bounds;
        }
    }

    /// Check if a handle is still registered
    pub fn contains(&self, element: ElementId) -> bool {
        self.elements.contains_key(element)
    }

    /// Unregister an element (on section unmount)
    pub fn unregister(&mut self, element: ElementId) {
        if self.elements.remove(element).is_some() {
            if let Some(id) = self.reverse.remove(&element) {
                self.ids.remove(&id);
            }
        }
    }

    /// Number of registered elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
