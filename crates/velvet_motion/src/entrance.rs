//! Entrance timelines
//!
//! A timeline not bound to scroll: it runs once on mount from progress 0
//! to 1 on a clock, with an optional initial delay, and self-disposes on
//! completion. Progress is monotonic — an entrance never rewinds.

use velvet_core::PropertySink;

use crate::timeline::Timeline;

/// A clock-driven, run-once timeline
#[derive(Clone, Debug)]
pub struct EntranceTimeline {
    timeline: Timeline,
    delay: f32,
    elapsed: f32,
    finished: bool,
}

impl EntranceTimeline {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            delay: 0.0,
            elapsed: 0.0,
            finished: false,
        }
    }

    /// Delay before the timeline starts, in seconds
    pub fn with_delay(mut self, seconds: f32) -> Self {
        self.delay = seconds.max(0.0);
        self
    }

    /// Advance the clock and write the current state
    ///
    /// During the delay the timeline holds its initial state (progress 0),
    /// so staggered reveals render their hidden pose instead of flashing
    /// finished content. Returns false once complete; callers drop the
    /// entrance after that.
    pub fn tick(&mut self, dt: f32, sink: &mut dyn PropertySink) -> bool {
        if self.finished {
            return false;
        }
        self.elapsed += dt.max(0.0);

        let total = self.timeline.total_duration();
        let progress = if total > 0.0 {
            ((self.elapsed - self.delay) / total).clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.timeline.advance_to(progress, sink);

        if progress >= 1.0 {
            self.finished = true;
        }
        !self.finished
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
