//! Page sections as engine data
//!
//! Each builder produces the `SectionSpec` for one block of the page:
//! its trigger regions, the timelines they scrub, and any run-once
//! entrance. Builders only read the registry; mounting is the caller's
//! call so a section can be rebuilt when the responsive class flips.

use velvet_core::{
    Color, Easing, ElementId, MotionError, Property, Result, TargetRegistry, ViewportClass,
};
use velvet_motion::{
    EntranceTimeline, MediaScrubber, RegionAnchor, RegionConfig, ScrollDriver, SectionSpec,
    TargetContext, Timeline, TimelineStep,
};
use velvet_text::SegmentTree;

fn element(registry: &TargetRegistry, id: &str) -> Result<ElementId> {
    registry
        .get(id)
        .ok_or_else(|| MotionError::MissingTarget { id: id.into() })
}

/// Navbar tint: transparent at the top of the page, dark and blurred once
/// the hero scrolls under it
///
/// The original effect is a timed tween fired when the nav's bottom edge
/// crosses the viewport top; a short scrubbed range past that boundary
/// reads the same and stays reversible.
pub fn navbar(registry: &TargetRegistry) -> Result<SectionSpec> {
    let nav = element(registry, "nav")?;

    let tint = Timeline::builder()
        .step(
            TimelineStep::new()
                .target(nav)
                .tween(
                    Property::BackgroundColor,
                    Color::TRANSPARENT,
                    Color::from_hex(0x0000_0050),
                )
                .tween(Property::BackdropBlur, 0.0, 10.0)
                .easing(Easing::Power1InOut),
        )
        .build(&TargetContext::new(registry))?;

    let config = RegionConfig::new(RegionAnchor::bottom_top(), RegionAnchor::new(4.0, 0.0))
        .scrubbed(0.3);

    Ok(SectionSpec::new("navbar").driver(ScrollDriver::new("nav", config).timeline(tint)))
}

/// Hero: staggered character reveal of the title, delayed line reveal of
/// the subtitle, leaf parallax tied to scroll, and the pinned video scrub
pub fn hero(
    registry: &TargetRegistry,
    class: ViewportClass,
    title: &SegmentTree,
    subtitle: &SegmentTree,
) -> Result<SectionSpec> {
    let context = TargetContext::new(registry).with_tree(title).with_tree(subtitle);

    let title_reveal = Timeline::builder()
        .step(
            TimelineStep::new()
                .targets(title.targets())
                .tween(Property::TranslateYPercent, 100.0, 0.0)
                .duration(1.8)
                .stagger(0.06)
                .easing(Easing::ExpoOut),
        )
        .build(&context)?;

    let subtitle_reveal = Timeline::builder()
        .step(
            TimelineStep::new()
                .targets(subtitle.targets())
                .tween(Property::TranslateYPercent, 100.0, 0.0)
                .tween(Property::Opacity, 0.0, 1.0)
                .duration(1.8)
                .stagger(0.06)
                .easing(Easing::ExpoOut),
        )
        .build(&context)?;

    let right_leaf = element(registry, "right-leaf")?;
    let left_leaf = element(registry, "left-leaf")?;
    let arrow = element(registry, "arrow")?;

    // Decorative leaves drift apart as the hero scrolls out
    let parallax = Timeline::builder()
        .step(
            TimelineStep::new()
                .target(right_leaf)
                .tween_to(Property::TranslateY, 200.0)
                .easing(Easing::Power1Out)
                .at(0.0),
        )
        .step(
            TimelineStep::new()
                .target(left_leaf)
                .tween_to(Property::TranslateY, -200.0)
                .easing(Easing::Power1Out)
                .at(0.0),
        )
        .step(
            TimelineStep::new()
                .target(arrow)
                .tween_to(Property::TranslateY, 100.0)
                .easing(Easing::Power1Out)
                .at(0.0),
        )
        .build(&context)?;

    let parallax_config =
        RegionConfig::new(RegionAnchor::top_top(), RegionAnchor::bottom_top());

    let video = element(registry, "video")?;
    let video_config = match class {
        // On phones the scrub starts while the video is still halfway
        // down the screen and runs 20% past its bottom edge
        ViewportClass::Compact => RegionConfig::new(
            RegionAnchor::new(0.0, 0.5),
            RegionAnchor::new(1.2, 0.0),
        ),
        ViewportClass::Wide => {
            RegionConfig::new(RegionAnchor::new(0.5, 0.6), RegionAnchor::bottom_top())
        }
    }
    .pinned();

    Ok(SectionSpec::new("hero")
        .entrance(EntranceTimeline::new(title_reveal))
        .entrance(EntranceTimeline::new(subtitle_reveal).with_delay(1.0))
        .driver(ScrollDriver::new("hero", parallax_config).timeline(parallax))
        .driver(ScrollDriver::new("video", video_config).media(MediaScrubber::new(video))))
}

/// Cocktails: the menu leaves slide in from outside the frame as the
/// section scrolls through
pub fn cocktails(registry: &TargetRegistry) -> Result<SectionSpec> {
    let left = element(registry, "c-left-leaf")?;
    let right = element(registry, "c-right-leaf")?;

    let context = TargetContext::new(registry);
    let slide_in = Timeline::builder()
        .step(
            TimelineStep::new()
                .target(left)
                .tween_from(Property::TranslateX, -100.0)
                .tween_from(Property::TranslateY, 100.0)
                .easing(Easing::Power1Out),
        )
        .step(
            TimelineStep::new()
                .target(right)
                .tween_from(Property::TranslateX, 100.0)
                .tween_from(Property::TranslateY, 100.0)
                .easing(Easing::Power1Out),
        )
        .build(&context)?;

    let config = RegionConfig::new(RegionAnchor::new(0.0, 0.3), RegionAnchor::new(1.0, 0.8));

    Ok(SectionSpec::new("cocktails")
        .driver(ScrollDriver::new("cocktails", config).timeline(slide_in)))
}

/// The Art: a pinned, slow-scrubbed sequence that fades the copy out,
/// opens the image mask while the image scales up, then fades the closing
/// message in
pub fn art(registry: &TargetRegistry, class: ViewportClass) -> Result<SectionSpec> {
    let heading = element(registry, "art-heading")?;
    let good_list = element(registry, "good-list")?;
    let feature_list = element(registry, "feature-list")?;
    let image = element(registry, "masked-img")?;
    let closing = element(registry, "masked-content")?;

    let context = TargetContext::new(registry);
    let sequence = Timeline::builder()
        .step(
            TimelineStep::new()
                .targets([heading, good_list, feature_list])
                .tween(Property::Opacity, 1.0, 0.0)
                .stagger(0.2)
                .easing(Easing::Power1InOut),
        )
        .step(
            TimelineStep::new()
                .target(image)
                .tween(Property::Scale, 1.0, 1.3)
                .tween(Property::MaskSize, 1.0, 8.0)
                .tween(Property::MaskReveal, 0.0, 1.0)
                .duration(1.0)
                .easing(Easing::Power1InOut),
        )
        .step(
            TimelineStep::new()
                .target(closing)
                .tween(Property::Opacity, 0.0, 1.0)
                .duration(1.0)
                .easing(Easing::Power1InOut),
        )
        .build(&context)?;

    let start = match class {
        ViewportClass::Compact => RegionAnchor::new(0.0, 0.2),
        ViewportClass::Wide => RegionAnchor::top_top(),
    };
    let config = RegionConfig::new(start, RegionAnchor::new(1.0, 0.5))
        .pinned()
        .scrubbed(1.5);

    Ok(SectionSpec::new("art").driver(ScrollDriver::new("art", config).timeline(sequence)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use velvet_core::{StyleBuffer, TargetHandle, ViewportMetrics};
    use velvet_motion::MotionEngine;
    use velvet_text::Granularity;

    use crate::content::{HERO_SUBTITLE, HERO_TITLE};
    use crate::layout::register_page;

    fn engine(width: f32, height: f32) -> MotionEngine {
        let viewport = ViewportMetrics::new(width, height);
        let mut engine = MotionEngine::new(viewport);
        register_page(engine.registry_mut(), viewport);
        engine
    }

    #[test]
    fn test_all_sections_mount() {
        let mut engine = engine(1440.0, 900.0);
        let class = engine.viewport_class();
        let title = SegmentTree::segment(HERO_TITLE, &[Granularity::Character]);
        let subtitle = SegmentTree::segment(HERO_SUBTITLE, &[Granularity::Line]);

        let specs = vec![
            navbar(engine.registry()).unwrap(),
            hero(engine.registry(), class, &title, &subtitle).unwrap(),
            cocktails(engine.registry()).unwrap(),
            art(engine.registry(), class).unwrap(),
        ];
        for spec in specs {
            engine.mount_section(spec).unwrap();
        }
        assert_eq!(engine.section_count(), 4);
    }

    #[test]
    fn test_builders_fail_on_missing_elements() {
        let registry = velvet_core::TargetRegistry::new();
        assert!(matches!(
            navbar(&registry),
            Err(MotionError::MissingTarget { .. })
        ));
        assert!(matches!(
            cocktails(&registry),
            Err(MotionError::MissingTarget { .. })
        ));
    }

    #[test]
    fn test_cocktail_leaves_slide_from_outside() {
        let mut engine = engine(1440.0, 900.0);
        engine
            .mount_section(cocktails(engine.registry()).unwrap())
            .unwrap();
        let left = engine.registry().get("c-left-leaf").unwrap();
        let right = engine.registry().get("c-right-leaf").unwrap();

        // Region for the demo layout: starts at 2*vh - 0.3*vh = 1530
        let mut buffer = StyleBuffer::new();
        engine.on_frame(1530.0, 0.016, &mut buffer);

        let x = |buffer: &StyleBuffer, e| {
            buffer
                .get(TargetHandle::Element(e), Property::TranslateX)
                .and_then(|v| v.as_float())
                .unwrap()
        };
        assert_eq!(x(&buffer, left), -100.0);
        assert_eq!(x(&buffer, right), 100.0);

        // Fully scrolled through: both leaves at rest
        engine.on_frame(1980.0, 0.016, &mut buffer);
        assert_eq!(x(&buffer, left), 0.0);
        assert_eq!(x(&buffer, right), 0.0);
    }

    #[test]
    fn test_video_anchors_track_viewport_class() {
        // Same section, different class, different resolved region: drive
        // a scroll position that is inside the wide region but before the
        // compact one.
        let mut wide = engine(1440.0, 900.0);
        let section = wide
            .mount_section(hero_with_text(&wide).unwrap())
            .unwrap();
        wide.on_media_duration(section, 10.0);

        let mut compact = engine(390.0, 844.0);
        let section = compact
            .mount_section(hero_with_text(&compact).unwrap())
            .unwrap();
        compact.on_media_duration(section, 10.0);

        let position = |engine: &mut MotionEngine, scroll: f32| {
            let video = engine.registry().get("video").unwrap();
            let mut buffer = StyleBuffer::new();
            engine.on_frame(scroll, 0.016, &mut buffer);
            buffer
                .get(TargetHandle::Element(video), Property::PlaybackPosition)
                .and_then(|v| v.as_float())
                .unwrap()
        };

        // Wide: region is 810..1800; compact: 422..1856.8
        assert!(position(&mut wide, 900.0) > 0.0);
        assert!(position(&mut compact, 400.0) == 0.0);
        assert!(position(&mut compact, 500.0) > 0.0);
    }

    fn hero_with_text(engine: &MotionEngine) -> Result<SectionSpec> {
        let title = SegmentTree::segment(HERO_TITLE, &[Granularity::Character]);
        let subtitle = SegmentTree::segment(HERO_SUBTITLE, &[Granularity::Line]);
        hero(
            engine.registry(),
            engine.viewport_class(),
            &title,
            &subtitle,
        )
    }
}
