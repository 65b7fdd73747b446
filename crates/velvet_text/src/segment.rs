//! Segment trees
//!
//! A `SegmentTree` owns the hierarchy produced by segmentation; consumers
//! (timelines) hold non-owning `SegmentRef`s. Re-segmenting bumps the
//! tree's generation so stale references fail fast at timeline
//! construction instead of animating detached nodes.

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use velvet_core::{SegmentKey, SegmentRef};

use crate::splitter;

/// Segmentation granularity, coarse to fine
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    Line,
    Word,
    Character,
}

/// One node in a segment tree
#[derive(Debug)]
pub struct SegmentNode {
    /// Granularity this node was produced at; `None` for the root
    pub granularity: Option<Granularity>,
    /// Text covered by this node
    pub text: String,
    /// Child segments in reading order; empty for leaves
    pub children: Vec<SegmentKey>,
    /// Parent segment; `None` for the root
    pub parent: Option<SegmentKey>,
    /// Whitespace/line-break leaf, excluded from animation targets
    pub is_separator: bool,
}

impl SegmentNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// An addressable hierarchy of text segments
///
/// Leaves are at the finest requested granularity; parents group leaves by
/// each coarser granularity in order. Concatenating all leaves in reading
/// order reproduces the source text exactly.
pub struct SegmentTree {
    arena: SlotMap<SegmentKey, SegmentNode>,
    root: SegmentKey,
    granularities: Vec<Granularity>,
    generation: u32,
}

impl SegmentTree {
    /// Segment text at the requested granularities
    ///
    /// Granularities are applied coarse to fine regardless of argument
    /// order; duplicates are ignored. An empty list produces a tree whose
    /// root is the single leaf.
    pub fn segment(text: &str, granularities: &[Granularity]) -> Self {
        let mut levels: Vec<Granularity> = granularities.to_vec();
        levels.sort();
        levels.dedup();

        let mut tree = Self {
            arena: SlotMap::with_key(),
            root: SegmentKey::default(),
            granularities: levels,
            generation: 0,
        };
        tree.root = tree.build(text);
        tree
    }

    /// Re-segment new content in place
    ///
    /// Invalidates every previously issued `SegmentRef`: the generation is
    /// bumped, so timelines holding stale references fail at construction.
    pub fn resegment(&mut self, text: &str) {
        self.arena.clear();
        self.generation += 1;
        self.root = self.build(text);
    }

    fn build(&mut self, text: &str) -> SegmentKey {
        let root = self.arena.insert(SegmentNode {
            granularity: None,
            text: text.to_owned(),
            children: Vec::new(),
            parent: None,
            is_separator: false,
        });

        let mut frontier = vec![root];
        for level in self.granularities.clone() {
            let mut next = Vec::new();
            for key in frontier {
                // Separator leaves from a coarser level stay leaves
                if self.arena[key].is_separator {
                    next.push(key);
                    continue;
                }
                let parent_text = self.arena[key].text.clone();
                let pieces = splitter::split(&parent_text, level);
                for piece in pieces {
                    let child = self.arena.insert(SegmentNode {
                        granularity: Some(level),
                        text: piece.text.to_owned(),
                        children: Vec::new(),
                        parent: Some(key),
                        is_separator: piece.is_separator,
                    });
                    self.arena[key].children.push(child);
                    next.push(child);
                }
            }
            frontier = next;
        }
        root
    }

    /// The root segment
    pub fn root(&self) -> SegmentKey {
        self.root
    }

    /// Current generation; bumped on every `resegment`
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Check that a reference was issued by the current generation and
    /// still points at a live node
    pub fn is_current(&self, segment: SegmentRef) -> bool {
        segment.generation == self.generation && self.arena.contains_key(segment.key)
    }

    /// Access a node
    pub fn node(&self, key: SegmentKey) -> Option<&SegmentNode> {
        self.arena.get(key)
    }

    /// Issue a reference to a node at the current generation
    pub fn make_ref(&self, key: SegmentKey) -> SegmentRef {
        SegmentRef {
            key,
            generation: self.generation,
        }
    }

    /// All leaves in reading order, separators included
    pub fn leaves(&self) -> Vec<SegmentKey> {
        let mut out = Vec::new();
        self.collect_leaves(self.root, &mut out);
        out
    }

    fn collect_leaves(&self, key: SegmentKey, out: &mut Vec<SegmentKey>) {
        let node = &self.arena[key];
        if node.is_leaf() {
            out.push(key);
        } else {
            for &child in &node.children {
                self.collect_leaves(child, out);
            }
        }
    }

    /// Animation targets: leaf references in reading order, separators
    /// excluded
    pub fn targets(&self) -> Vec<SegmentRef> {
        self.leaves()
            .into_iter()
            .filter(|&k| !self.arena[k].is_separator)
            .map(|k| self.make_ref(k))
            .collect()
    }

    /// Concatenate all leaves in order (the round-trip property: this
    /// equals the source text exactly)
    pub fn reconstruct(&self) -> String {
        self.leaves()
            .into_iter()
            .map(|k| self.arena[k].text.as_str())
            .collect()
    }
}
