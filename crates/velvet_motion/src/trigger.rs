//! Trigger regions and scroll progress tracking
//!
//! A trigger region is a scroll-observed zone with two resolved anchors.
//! As the viewer scrolls between them the region emits a normalized
//! progress value in [0,1]; optional scrub smoothing makes emitted
//! progress lag raw scroll, and optional pinning freezes the region's
//! container in the viewport while progress advances.
//!
//! The per-region state machine is Idle (before the start anchor),
//! Active (between anchors), Complete (past the end anchor). Transitions
//! are bidirectional with no direction-dependent hysteresis beyond the
//! configured scrub window.

use serde::{Deserialize, Serialize};

use velvet_core::{ElementBounds, MotionError, Result, ViewportMetrics};

/// Progress equality tolerance for pin release and scrub snapping
const PROGRESS_EPSILON: f32 = 1e-4;

/// Exponential catch-up rate: emitted progress closes ~98% of its gap to
/// raw progress within one scrub window
const SCRUB_RATE: f32 = 4.0;

// ============================================================================
// Anchors
// ============================================================================

/// One scroll anchor: a fractional position on the trigger element paired
/// with a fractional position in the viewport
///
/// The anchor resolves to the scroll offset at which
/// `element_fraction` of the element crosses `viewport_fraction` of the
/// viewport. `(0.0, 0.0)` reads "element top hits viewport top";
/// `(1.2, 0.0)` projects 20% past the element's bottom edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionAnchor {
    /// Position within the element: 0.0 = top edge, 1.0 = bottom edge
    pub element_fraction: f32,
    /// Position within the viewport: 0.0 = top edge, 1.0 = bottom edge
    pub viewport_fraction: f32,
}

impl RegionAnchor {
    pub fn new(element_fraction: f32, viewport_fraction: f32) -> Self {
        Self {
            element_fraction,
            viewport_fraction,
        }
    }

    /// "top top": element top reaches viewport top
    pub fn top_top() -> Self {
        Self::new(0.0, 0.0)
    }

    /// "bottom top": element bottom reaches viewport top
    pub fn bottom_top() -> Self {
        Self::new(1.0, 0.0)
    }

    /// Resolve to the scroll offset where this anchor fires
    pub fn resolve(&self, bounds: ElementBounds, viewport: ViewportMetrics) -> f32 {
        bounds.offset_at(self.element_fraction) - viewport.height * self.viewport_fraction
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for a trigger region
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Anchor at which progress = 0
    pub start: RegionAnchor,
    /// Anchor at which progress = 1
    pub end: RegionAnchor,
    /// Freeze the region's container in the viewport while Active
    #[serde(default)]
    pub pin: bool,
    /// Scrub window in seconds; 0 ties progress directly to scroll
    #[serde(default)]
    pub scrub: f32,
}

impl RegionConfig {
    pub fn new(start: RegionAnchor, end: RegionAnchor) -> Self {
        Self {
            start,
            end,
            pin: false,
            scrub: 0.0,
        }
    }

    pub fn pinned(mut self) -> Self {
        self.pin = true;
        self
    }

    /// Set the scrub window in seconds
    pub fn scrubbed(mut self, window: f32) -> Self {
        self.scrub = window.max(0.0);
        self
    }
}

// ============================================================================
// Region state
// ============================================================================

/// Position of the scroll cursor relative to the region
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RegionState {
    /// Scroll position before the start anchor
    #[default]
    Idle,
    /// Between anchors; progress in (0,1), pinned if configured
    Active,
    /// Past the end anchor
    Complete,
}

/// Pin lifecycle transition produced by an update
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinTransition {
    Acquired,
    Released,
}

/// Result of one tracker update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionUpdate {
    /// Emitted (possibly smoothed) progress in [0,1]
    pub progress: f32,
    /// Pin transition, if this update crossed a pin boundary
    pub pin: Option<PinTransition>,
}

// ============================================================================
// Trigger region
// ============================================================================

/// A resolved, scroll-observed trigger region
#[derive(Clone, Debug)]
pub struct TriggerRegion {
    start_px: f32,
    end_px: f32,
    pin: bool,
    scrub: f32,
    state: RegionState,
    emitted: f32,
    pinned: bool,
}

impl TriggerRegion {
    /// Resolve a configuration against the trigger element's bounds and the
    /// current viewport
    ///
    /// Fails with `MalformedRegion` if the start anchor resolves past the
    /// end anchor. Equal offsets are the defined degenerate case: progress
    /// is a step function at the shared offset.
    pub fn resolve(
        config: RegionConfig,
        bounds: ElementBounds,
        viewport: ViewportMetrics,
    ) -> Result<Self> {
        let start_px = config.start.resolve(bounds, viewport);
        let end_px = config.end.resolve(bounds, viewport);

        if start_px > end_px {
            return Err(MotionError::MalformedRegion {
                start: start_px,
                end: end_px,
            });
        }

        Ok(Self {
            start_px,
            end_px,
            pin: config.pin,
            scrub: config.scrub,
            state: RegionState::Idle,
            emitted: 0.0,
            pinned: false,
        })
    }

    /// Re-resolve anchor offsets after a viewport change, keeping emitted
    /// progress and pin state
    pub fn rebase(&mut self, config: RegionConfig, bounds: ElementBounds, viewport: ViewportMetrics) -> Result<()> {
        let resolved = Self::resolve(config, bounds, viewport)?;
        self.start_px = resolved.start_px;
        self.end_px = resolved.end_px;
        Ok(())
    }

    /// Raw progress for a scroll position: fractional position between the
    /// resolved anchors, clamped to [0,1]
    ///
    /// A degenerate region (equal anchors) yields 0 before the shared
    /// offset and 1 at or past it; there is no division by the zero span.
    pub fn raw_progress(&self, scroll_y: f32) -> f32 {
        let span = self.end_px - self.start_px;
        if span <= f32::EPSILON {
            if scroll_y >= self.start_px {
                1.0
            } else {
                0.0
            }
        } else {
            ((scroll_y - self.start_px) / span).clamp(0.0, 1.0)
        }
    }

    /// Advance the tracker with a scroll sample
    ///
    /// `dt` is the elapsed time since the previous sample, used only by
    /// scrub smoothing; redundant samples with `dt = 0` re-emit the same
    /// progress. Emitted progress is always within [0,1].
    pub fn update(&mut self, scroll_y: f32, dt: f32) -> RegionUpdate {
        let raw = self.raw_progress(scroll_y);

        if self.scrub > 0.0 {
            if dt > 0.0 {
                let blend = 1.0 - (-dt * SCRUB_RATE / self.scrub).exp();
                self.emitted += (raw - self.emitted) * blend;
                if (raw - self.emitted).abs() < PROGRESS_EPSILON {
                    self.emitted = raw;
                }
            }
        } else {
            self.emitted = raw;
        }
        self.emitted = self.emitted.clamp(0.0, 1.0);

        let state = if scroll_y < self.start_px {
            RegionState::Idle
        } else if raw >= 1.0 {
            RegionState::Complete
        } else {
            RegionState::Active
        };
        self.state = state;

        let pin = self.pin_transition();

        RegionUpdate {
            progress: self.emitted,
            pin,
        }
    }

    /// Pin acquire/release, exactly once per boundary crossing
    ///
    /// Release on completion is bound to *smoothed* progress reaching 1,
    /// so a scrubbed region stays pinned until the animation visually
    /// finishes. Scrolling back out of the region releases immediately.
    fn pin_transition(&mut self) -> Option<PinTransition> {
        if !self.pin {
            return None;
        }
        match self.state {
            RegionState::Idle => {
                if self.pinned {
                    self.pinned = false;
                    return Some(PinTransition::Released);
                }
            }
            RegionState::Active => {
                if !self.pinned {
                    self.pinned = true;
                    return Some(PinTransition::Acquired);
                }
            }
            RegionState::Complete => {
                if self.pinned && self.emitted >= 1.0 - PROGRESS_EPSILON {
                    self.pinned = false;
                    return Some(PinTransition::Released);
                }
            }
        }
        None
    }

    /// Release a held pin without a scroll sample (section teardown)
    pub fn teardown(&mut self) -> Option<PinTransition> {
        if self.pinned {
            self.pinned = false;
            Some(PinTransition::Released)
        } else {
            None
        }
    }

    pub fn state(&self) -> RegionState {
        self.state
    }

    /// Last emitted progress
    pub fn progress(&self) -> f32 {
        self.emitted
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ViewportMetrics {
        ViewportMetrics::new(1440.0, 900.0)
    }

    fn region(config: RegionConfig) -> TriggerRegion {
        // Section spanning 1000..2000 on the page
        TriggerRegion::resolve(config, ElementBounds::new(1000.0, 1000.0), viewport()).unwrap()
    }

    #[test]
    fn test_progress_clamped_at_extremes() {
        let mut r = region(RegionConfig::new(
            RegionAnchor::top_top(),
            RegionAnchor::bottom_top(),
        ));

        assert_eq!(r.update(-5000.0, 0.016).progress, 0.0);
        assert_eq!(r.update(50_000.0, 0.016).progress, 1.0);
        assert_eq!(r.update(1500.0, 0.016).progress, 0.5);
    }

    #[test]
    fn test_state_transitions_bidirectional() {
        let mut r = region(RegionConfig::new(
            RegionAnchor::top_top(),
            RegionAnchor::bottom_top(),
        ));

        r.update(0.0, 0.016);
        assert_eq!(r.state(), RegionState::Idle);
        r.update(1500.0, 0.016);
        assert_eq!(r.state(), RegionState::Active);
        r.update(2500.0, 0.016);
        assert_eq!(r.state(), RegionState::Complete);
        r.update(1500.0, 0.016);
        assert_eq!(r.state(), RegionState::Active);
        r.update(0.0, 0.016);
        assert_eq!(r.state(), RegionState::Idle);
    }

    #[test]
    fn test_malformed_region_rejected() {
        let config = RegionConfig::new(RegionAnchor::bottom_top(), RegionAnchor::top_top());
        let err = TriggerRegion::resolve(config, ElementBounds::new(1000.0, 1000.0), viewport())
            .unwrap_err();
        assert!(matches!(err, MotionError::MalformedRegion { .. }));
    }

    #[test]
    fn test_degenerate_region_step_function() {
        // Both anchors resolve to scroll offset 500
        let config = RegionConfig::new(RegionAnchor::top_top(), RegionAnchor::top_top());
        let mut r =
            TriggerRegion::resolve(config, ElementBounds::new(500.0, 300.0), viewport()).unwrap();

        assert_eq!(r.update(499.0, 0.016).progress, 0.0);
        assert_eq!(r.update(501.0, 0.016).progress, 1.0);
        assert_eq!(r.update(500.0, 0.016).progress, 1.0);
    }

    #[test]
    fn test_scrub_lags_then_catches_up() {
        let mut r = region(
            RegionConfig::new(RegionAnchor::top_top(), RegionAnchor::bottom_top()).scrubbed(1.5),
        );

        // Jump to the middle of the region; emitted lags raw
        let first = r.update(1500.0, 0.016).progress;
        assert!(first > 0.0 && first < 0.5);

        // Holding position, emitted approaches raw
        let mut last = first;
        for _ in 0..600 {
            last = r.update(1500.0, 0.016).progress;
        }
        assert!((last - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_scrub_zero_dt_is_idempotent() {
        let mut r = region(
            RegionConfig::new(RegionAnchor::top_top(), RegionAnchor::bottom_top()).scrubbed(1.0),
        );
        r.update(1500.0, 0.016);
        let a = r.update(1500.0, 0.0).progress;
        let b = r.update(1500.0, 0.0).progress;
        assert_eq!(a, b);
    }

    #[test]
    fn test_pin_exactly_once_per_crossing() {
        let mut r = region(
            RegionConfig::new(RegionAnchor::top_top(), RegionAnchor::bottom_top()).pinned(),
        );

        let mut acquires = 0;
        let mut releases = 0;
        let mut track = |u: RegionUpdate| match u.pin {
            Some(PinTransition::Acquired) => acquires += 1,
            Some(PinTransition::Released) => releases += 1,
            None => {}
        };

        // enter -> exit forward -> re-enter -> exit backward
        track(r.update(0.0, 0.016));
        track(r.update(1500.0, 0.016));
        track(r.update(1500.0, 0.016)); // redundant sample, no transition
        track(r.update(2500.0, 0.016));
        track(r.update(1500.0, 0.016));
        track(r.update(0.0, 0.016));

        assert_eq!(acquires, 2);
        assert_eq!(releases, 2);
    }

    #[test]
    fn test_pin_release_waits_for_smoothed_progress() {
        let mut r = region(
            RegionConfig::new(RegionAnchor::top_top(), RegionAnchor::bottom_top())
                .pinned()
                .scrubbed(1.5),
        );

        r.update(1500.0, 0.016);
        assert!(r.is_pinned());

        // Scroll past the end: raw progress is 1 but emitted still lags,
        // so the pin holds
        let u = r.update(2500.0, 0.016);
        assert!(u.pin.is_none());
        assert!(r.is_pinned());

        // Emitted catches up; the pin releases exactly once
        let mut releases = 0;
        for _ in 0..600 {
            if r.update(2500.0, 0.016).pin == Some(PinTransition::Released) {
                releases += 1;
            }
        }
        assert_eq!(releases, 1);
        assert!(!r.is_pinned());
    }

    #[test]
    fn test_teardown_releases_held_pin() {
        let mut r = region(
            RegionConfig::new(RegionAnchor::top_top(), RegionAnchor::bottom_top()).pinned(),
        );
        r.update(1500.0, 0.016);
        assert!(r.is_pinned());

        assert_eq!(r.teardown(), Some(PinTransition::Released));
        assert_eq!(r.teardown(), None);
    }
}
