//! Velvet Motion
//!
//! The scroll-synchronized animation orchestration engine. Converts raw
//! scroll/viewport state into deterministic, replayable progress values and
//! sequences multi-stage visual transformations from them:
//!
//! - **Trigger regions**: scroll-observed zones emitting progress in [0,1],
//!   with optional pinning and scrub smoothing
//! - **Timelines**: ordered animation steps bound to one progress source,
//!   advanced and rewound in lockstep, stateless per update
//! - **Entrance timelines**: clock-driven, run once on mount, self-dispose
//! - **Media scrubbing**: progress mapped onto playback position once the
//!   media duration is known
//! - **`MotionEngine`**: the facade owning section lifecycles
//!
//! The engine is passive and single-threaded: it reacts to scroll samples,
//! viewport resizes, media metadata, and mount/unmount, and is safe to
//! invoke redundantly with identical inputs.

pub mod engine;
pub mod entrance;
pub mod media;
pub mod timeline;
pub mod trigger;

pub use engine::{MotionEngine, PinEvent, ScrollDriver, SectionId, SectionSpec, Sequencer};
pub use entrance::EntranceTimeline;
pub use media::MediaScrubber;
pub use timeline::{StepOffset, TargetContext, Timeline, TimelineBuilder, TimelineStep};
pub use trigger::{PinTransition, RegionAnchor, RegionConfig, RegionState, TriggerRegion};
