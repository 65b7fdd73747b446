//! Engine facade
//!
//! `MotionEngine` owns the trigger regions, timelines, entrance timelines,
//! and media scrubbers for every mounted page section, and their
//! lifecycle: creation at mount, deterministic teardown at unmount. It is
//! constructed once by the composition root and passed down — there is no
//! ambient global.
//!
//! The engine is driven entirely by external events: the frame callback
//! samples scroll position into `on_frame`, resizes arrive via
//! `on_resize`, and media metadata via `on_media_duration`.

use slotmap::{new_key_type, SlotMap};

use velvet_core::{
    MotionError, Property, PropertySink, PropertyValue, Result, TargetHandle, TargetRegistry,
    ViewportClass, ViewportMetrics,
};

use crate::entrance::EntranceTimeline;
use crate::media::MediaScrubber;
use crate::timeline::Timeline;
use crate::trigger::{PinTransition, RegionConfig, TriggerRegion};

new_key_type! {
    /// Handle to a mounted page section
    pub struct SectionId;
}

// ============================================================================
// Section specification
// ============================================================================

/// A progress consumer bound to a scroll driver
pub enum Sequencer {
    Timeline(Timeline),
    Media(MediaScrubber),
}

/// One scroll-observed driver: a trigger region configuration plus the
/// sequencers its progress feeds
pub struct ScrollDriver {
    /// String ID of the trigger element (must be registered before mount)
    pub trigger: String,
    pub config: RegionConfig,
    pub sequencers: Vec<Sequencer>,
}

impl ScrollDriver {
    pub fn new(trigger: impl Into<String>, config: RegionConfig) -> Self {
        Self {
            trigger: trigger.into(),
            config,
            sequencers: Vec::new(),
        }
    }

    pub fn timeline(mut self, timeline: Timeline) -> Self {
        self.sequencers.push(Sequencer::Timeline(timeline));
        self
    }

    pub fn media(mut self, scrubber: MediaScrubber) -> Self {
        self.sequencers.push(Sequencer::Media(scrubber));
        self
    }
}

/// Everything one page section asks of the engine
pub struct SectionSpec {
    pub name: String,
    pub scroll: Vec<ScrollDriver>,
    pub entrances: Vec<EntranceTimeline>,
}

impl SectionSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scroll: Vec::new(),
            entrances: Vec::new(),
        }
    }

    pub fn driver(mut self, driver: ScrollDriver) -> Self {
        self.scroll.push(driver);
        self
    }

    pub fn entrance(mut self, entrance: EntranceTimeline) -> Self {
        self.entrances.push(entrance);
        self
    }
}

// ============================================================================
// Mounted state
// ============================================================================

struct MountedDriver {
    trigger: velvet_core::ElementId,
    config: RegionConfig,
    region: TriggerRegion,
    sequencers: Vec<Sequencer>,
}

struct MountedSection {
    name: String,
    drivers: Vec<MountedDriver>,
    entrances: Vec<EntranceTimeline>,
}

/// Pin lifecycle notification for the visual layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinEvent {
    pub section: SectionId,
    /// Index of the driver within its section
    pub driver: usize,
    pub transition: PinTransition,
}

// ============================================================================
// Validating sink
// ============================================================================

/// Sink wrapper that drops writes to element targets no longer registered
///
/// A target detached after construction (external mutation of the page) is
/// a recovered runtime condition: its write is skipped and logged, sibling
/// writes still land.
struct ValidatingSink<'a> {
    registry: &'a TargetRegistry,
    inner: &'a mut dyn PropertySink,
}

impl PropertySink for ValidatingSink<'_> {
    fn set(&mut self, target: TargetHandle, property: Property, value: PropertyValue) {
        if let TargetHandle::Element(element) = target {
            if !self.registry.contains(element) {
                tracing::warn!(%property, "skipping write to detached element");
                return;
            }
        }
        self.inner.set(target, property, value);
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Registers trigger regions and timelines for page sections and owns
/// their lifecycle
pub struct MotionEngine {
    registry: TargetRegistry,
    viewport: ViewportMetrics,
    sections: SlotMap<SectionId, MountedSection>,
}

impl MotionEngine {
    pub fn new(viewport: ViewportMetrics) -> Self {
        Self {
            registry: TargetRegistry::new(),
            viewport,
            sections: SlotMap::with_key(),
        }
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TargetRegistry {
        &mut self.registry
    }

    pub fn viewport(&self) -> ViewportMetrics {
        self.viewport
    }

    pub fn viewport_class(&self) -> ViewportClass {
        self.viewport.class()
    }

    /// Mount a section: resolve its trigger regions and take ownership of
    /// its timelines
    ///
    /// Fails without mounting anything if a trigger element is missing or
    /// a region is malformed — a section is never partially mounted.
    pub fn mount_section(&mut self, spec: SectionSpec) -> Result<SectionId> {
        let mut drivers = Vec::with_capacity(spec.scroll.len());

        for driver in spec.scroll {
            let trigger =
                self.registry
                    .get(&driver.trigger)
                    .ok_or_else(|| MotionError::MissingTarget {
                        id: driver.trigger.clone(),
                    })?;
            // Registered handles always have bounds
            let bounds = self.registry.bounds(trigger).unwrap_or_default();
            let region = TriggerRegion::resolve(driver.config, bounds, self.viewport)?;

            drivers.push(MountedDriver {
                trigger,
                config: driver.config,
                region,
                sequencers: driver.sequencers,
            });
        }

        tracing::debug!(section = %spec.name, drivers = drivers.len(), "mounting section");
        Ok(self.sections.insert(MountedSection {
            name: spec.name,
            drivers,
            entrances: spec.entrances,
        }))
    }

    /// Unmount a section, detaching its regions from scroll observation
    ///
    /// Any held pin is released in the same call; the returned events let
    /// the visual layer unfreeze pinned containers. Teardown is all or
    /// nothing even mid-progress.
    pub fn unmount_section(&mut self, section: SectionId) -> Vec<PinEvent> {
        let Some(mut mounted) = self.sections.remove(section) else {
            return Vec::new();
        };
        tracing::debug!(section = %mounted.name, "unmounting section");

        let mut events = Vec::new();
        for (index, driver) in mounted.drivers.iter_mut().enumerate() {
            if let Some(transition) = driver.region.teardown() {
                events.push(PinEvent {
                    section,
                    driver: index,
                    transition,
                });
            }
        }
        events
    }

    /// One engine reaction: sample scroll, advance everything, write
    /// outputs
    ///
    /// `dt` is the elapsed time since the previous frame (entrance clocks
    /// and scrub smoothing use it). The computation is synchronous and
    /// idempotent given identical inputs, so coalesced or duplicated
    /// scroll events are harmless.
    pub fn on_frame(
        &mut self,
        scroll_y: f32,
        dt: f32,
        sink: &mut dyn PropertySink,
    ) -> Vec<PinEvent> {
        let mut sink = ValidatingSink {
            registry: &self.registry,
            inner: sink,
        };
        let mut events = Vec::new();

        for (id, section) in self.sections.iter_mut() {
            // Entrance timelines run on the clock and self-dispose
            for entrance in section.entrances.iter_mut() {
                entrance.tick(dt, &mut sink);
            }
            section.entrances.retain(|e| !e.is_finished());

            for (index, driver) in section.drivers.iter_mut().enumerate() {
                let update = driver.region.update(scroll_y, dt);
                if let Some(transition) = update.pin {
                    events.push(PinEvent {
                        section: id,
                        driver: index,
                        transition,
                    });
                }
                for sequencer in &driver.sequencers {
                    match sequencer {
                        Sequencer::Timeline(timeline) => {
                            timeline.advance_to(update.progress, &mut sink)
                        }
                        Sequencer::Media(scrubber) => {
                            scrubber.advance_to(update.progress, &mut sink)
                        }
                    }
                }
            }
        }
        events
    }

    /// Viewport change: re-resolve every region's anchor offsets against
    /// current bounds
    ///
    /// Anchor *parameters* stay as chosen at mount; a section whose
    /// responsive class changed must be remounted by its owner (regions
    /// are recreated, never mutated, across classes).
    pub fn on_resize(&mut self, viewport: ViewportMetrics) {
        self.viewport = viewport;
        for (_, section) in self.sections.iter_mut() {
            for driver in section.drivers.iter_mut() {
                let Some(bounds) = self.registry.bounds(driver.trigger) else {
                    tracing::warn!(section = %section.name, "trigger element detached, keeping stale anchors");
                    continue;
                };
                if let Err(err) = driver.region.rebase(driver.config, bounds, viewport) {
                    tracing::warn!(section = %section.name, %err, "region rebase failed");
                }
            }
        }
    }

    /// One-shot media metadata event: the section's scrubbers learn their
    /// duration and start honoring progress updates
    pub fn on_media_duration(&mut self, section: SectionId, seconds: f32) {
        let Some(mounted) = self.sections.get_mut(section) else {
            tracing::warn!("media duration for unknown section");
            return;
        };
        for driver in mounted.drivers.iter_mut() {
            for sequencer in driver.sequencers.iter_mut() {
                if let Sequencer::Media(scrubber) = sequencer {
                    scrubber.set_duration(seconds);
                }
            }
        }
    }

    /// Number of mounted sections
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velvet_core::{Easing, ElementBounds, StyleBuffer};

    use crate::timeline::{TargetContext, TimelineStep};
    use crate::trigger::RegionAnchor;

    fn engine() -> MotionEngine {
        MotionEngine::new(ViewportMetrics::new(1440.0, 900.0))
    }

    #[test]
    fn test_mount_requires_trigger_element() {
        let mut engine = engine();
        let spec = SectionSpec::new("hero").driver(ScrollDriver::new(
            "hero",
            RegionConfig::new(RegionAnchor::top_top(), RegionAnchor::bottom_top()),
        ));

        let err = engine.mount_section(spec).unwrap_err();
        assert_eq!(
            err,
            MotionError::MissingTarget {
                id: "hero".to_string()
            }
        );
    }

    #[test]
    fn test_frame_drives_bound_timeline() {
        let mut engine = engine();
        let hero = engine
            .registry_mut()
            .register("hero", ElementBounds::new(0.0, 900.0));
        let leaf = engine
            .registry_mut()
            .register("right-leaf", ElementBounds::new(100.0, 200.0));

        let timeline = Timeline::builder()
            .step(
                TimelineStep::new()
                    .target(leaf)
                    .tween_to(Property::TranslateY, 200.0)
                    .easing(Easing::Linear),
            )
            .build(&TargetContext::new(engine.registry()))
            .unwrap();

        engine
            .mount_section(
                SectionSpec::new("hero").driver(
                    ScrollDriver::new(
                        "hero",
                        RegionConfig::new(RegionAnchor::top_top(), RegionAnchor::bottom_top()),
                    )
                    .timeline(timeline),
                ),
            )
            .unwrap();

        let mut buffer = StyleBuffer::new();
        engine.on_frame(450.0, 0.016, &mut buffer);
        assert_eq!(
            buffer.get(TargetHandle::Element(leaf), Property::TranslateY),
            Some(PropertyValue::Float(100.0))
        );
    }

    #[test]
    fn test_unmount_releases_pin_and_detaches() {
        let mut engine = engine();
        engine
            .registry_mut()
            .register("art", ElementBounds::new(2000.0, 1800.0));

        let section = engine
            .mount_section(
                SectionSpec::new("art").driver(ScrollDriver::new(
                    "art",
                    RegionConfig::new(RegionAnchor::top_top(), RegionAnchor::bottom_top()).pinned(),
                )),
            )
            .unwrap();

        // Scroll into the region so the pin is held
        let mut buffer = StyleBuffer::new();
        let events = engine.on_frame(2500.0, 0.016, &mut buffer);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].transition, PinTransition::Acquired);

        let events = engine.unmount_section(section);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].transition, PinTransition::Released);
        assert_eq!(engine.section_count(), 0);

        // Detached: further frames produce nothing
        let events = engine.on_frame(2600.0, 0.016, &mut buffer);
        assert!(events.is_empty());
    }

    #[test]
    fn test_detached_target_write_skipped() {
        let mut engine = engine();
        engine
            .registry_mut()
            .register("section", ElementBounds::new(0.0, 900.0));
        let doomed = engine
            .registry_mut()
            .register("doomed", ElementBounds::new(0.0, 100.0));
        let safe = engine
            .registry_mut()
            .register("safe", ElementBounds::new(0.0, 100.0));

        let timeline = Timeline::builder()
            .step(
                TimelineStep::new()
                    .targets([doomed, safe])
                    .tween(Property::Opacity, 0.0, 1.0),
            )
            .build(&TargetContext::new(engine.registry()))
            .unwrap();

        engine
            .mount_section(
                SectionSpec::new("s").driver(
                    ScrollDriver::new(
                        "section",
                        RegionConfig::new(RegionAnchor::top_top(), RegionAnchor::bottom_top()),
                    )
                    .timeline(timeline),
                ),
            )
            .unwrap();

        // External mutation detaches one target after construction
        engine.registry_mut().unregister(doomed);

        let mut buffer = StyleBuffer::new();
        engine.on_frame(450.0, 0.016, &mut buffer);

        assert!(buffer
            .get(TargetHandle::Element(doomed), Property::Opacity)
            .is_none());
        assert!(buffer
            .get(TargetHandle::Element(safe), Property::Opacity)
            .is_some());
    }

    #[test]
    fn test_media_duration_forwarded() {
        let mut engine = engine();
        let video = engine
            .registry_mut()
            .register("video", ElementBounds::new(0.0, 900.0));

        let section = engine
            .mount_section(
                SectionSpec::new("video").driver(
                    ScrollDriver::new(
                        "video",
                        RegionConfig::new(RegionAnchor::top_top(), RegionAnchor::bottom_top()),
                    )
                    .media(MediaScrubber::new(video)),
                ),
            )
            .unwrap();

        let mut buffer = StyleBuffer::new();
        engine.on_frame(450.0, 0.016, &mut buffer);
        assert!(buffer.is_empty());

        engine.on_media_duration(section, 8.0);
        engine.on_frame(450.0, 0.016, &mut buffer);
        assert_eq!(
            buffer.get(TargetHandle::Element(video), Property::PlaybackPosition),
            Some(PropertyValue::Float(4.0))
        );
    }
}
