//! Simulated measurement pass
//!
//! The real page gets element bounds from layout; the demo derives a
//! plausible set from the viewport so anchor math has something to chew
//! on. Section blocks stack vertically, each roughly one viewport tall,
//! with decorative elements placed inside their sections.

use velvet_core::{ElementBounds, TargetRegistry, ViewportMetrics};

/// Total page height for the demo layout
pub fn page_height(viewport: ViewportMetrics) -> f32 {
    viewport.height * 6.0
}

/// Register every element the section builders target
pub fn register_page(registry: &mut TargetRegistry, viewport: ViewportMetrics) {
    let vh = viewport.height;

    registry.register("nav", ElementBounds::new(0.0, 80.0));

    // Hero fills the first viewport; the video block sits just below
    registry.register("hero", ElementBounds::new(0.0, vh));
    registry.register("left-leaf", ElementBounds::new(vh * 0.1, vh * 0.4));
    registry.register("right-leaf", ElementBounds::new(vh * 0.05, vh * 0.4));
    registry.register("arrow", ElementBounds::new(vh * 0.7, vh * 0.15));
    registry.register("video", ElementBounds::new(vh, vh));

    registry.register("cocktails", ElementBounds::new(vh * 2.0, vh));
    registry.register("c-left-leaf", ElementBounds::new(vh * 2.6, vh * 0.3));
    registry.register("c-right-leaf", ElementBounds::new(vh * 2.6, vh * 0.3));

    registry.register("about", ElementBounds::new(vh * 3.0, vh));

    // The art section is taller: its pinned sequence plays out over
    // two viewports of scroll
    registry.register("art", ElementBounds::new(vh * 4.0, vh * 2.0));
    registry.register("art-heading", ElementBounds::new(vh * 4.05, vh * 0.1));
    registry.register("good-list", ElementBounds::new(vh * 4.2, vh * 0.3));
    registry.register("feature-list", ElementBounds::new(vh * 4.2, vh * 0.3));
    registry.register("masked-img", ElementBounds::new(vh * 4.3, vh * 0.6));
    registry.register("masked-content", ElementBounds::new(vh * 5.2, vh * 0.3));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_registers_all_anchors() {
        let mut registry = TargetRegistry::new();
        register_page(&mut registry, ViewportMetrics::new(1440.0, 900.0));

        for id in [
            "nav",
            "hero",
            "video",
            "cocktails",
            "art",
            "masked-img",
            "masked-content",
        ] {
            assert!(registry.get(id).is_some(), "missing {id}");
        }
    }
}
