//! Media scrubbing
//!
//! Maps a trigger region's progress directly onto a media element's
//! playback position: `position = progress * duration`. The media's
//! duration arrives asynchronously (metadata load); until that one-shot
//! event, progress updates are safely dropped — a documented no-op, not
//! an error.

use velvet_core::{Property, PropertySink, TargetHandle};

/// Scrubs a media target's playback position from progress
#[derive(Clone, Copy, Debug)]
pub struct MediaScrubber {
    target: TargetHandle,
    duration: Option<f32>,
}

impl MediaScrubber {
    pub fn new(target: impl Into<TargetHandle>) -> Self {
        Self {
            target: target.into(),
            duration: None,
        }
    }

    /// One-shot duration event from the media's metadata load
    ///
    /// A second call is ignored; the first duration wins.
    pub fn set_duration(&mut self, seconds: f32) {
        if self.duration.is_some() {
            tracing::debug!("media duration already known, ignoring update");
            return;
        }
        self.duration = Some(seconds.max(0.0));
    }

    pub fn duration(&self) -> Option<f32> {
        self.duration
    }

    /// Write the playback position for a progress value
    ///
    /// Before the duration is known this does nothing.
    pub fn advance_to(&self, progress: f32, sink: &mut dyn PropertySink) {
        let Some(duration) = self.duration else {
            tracing::trace!("media duration unknown, dropping progress update");
            return;
        };
        sink.set(
            self.target,
            Property::PlaybackPosition,
            (progress.clamp(0.0, 1.0) * duration).into(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velvet_core::{ElementBounds, PropertyValue, StyleBuffer, TargetRegistry};

    #[test]
    fn test_updates_dropped_until_duration_known() {
        let mut registry = TargetRegistry::new();
        let video = registry.register("video", ElementBounds::default());
        let handle = TargetHandle::Element(video);

        let mut scrubber = MediaScrubber::new(video);
        let mut buffer = StyleBuffer::new();

        scrubber.advance_to(0.5, &mut buffer);
        assert!(buffer.is_empty());

        scrubber.set_duration(12.0);
        scrubber.advance_to(0.5, &mut buffer);
        assert_eq!(
            buffer.get(handle, Property::PlaybackPosition),
            Some(PropertyValue::Float(6.0))
        );
    }

    #[test]
    fn test_first_duration_wins() {
        let mut registry = TargetRegistry::new();
        let video = registry.register("video", ElementBounds::default());

        let mut scrubber = MediaScrubber::new(video);
        scrubber.set_duration(12.0);
        scrubber.set_duration(99.0);
        assert_eq!(scrubber.duration(), Some(12.0));
    }

    #[test]
    fn test_position_clamped() {
        let mut registry = TargetRegistry::new();
        let video = registry.register("video", ElementBounds::default());
        let handle = TargetHandle::Element(video);

        let mut scrubber = MediaScrubber::new(video);
        scrubber.set_duration(10.0);

        let mut buffer = StyleBuffer::new();
        scrubber.advance_to(2.0, &mut buffer);
        assert_eq!(
            buffer.get(handle, Property::PlaybackPosition),
            Some(PropertyValue::Float(10.0))
        );
    }
}
