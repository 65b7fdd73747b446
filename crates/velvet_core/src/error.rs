//! Error types for the velvet engine

use thiserror::Error;

/// Errors that can occur while constructing or driving animations
///
/// Construction-time errors are fatal to the caller: a timeline or trigger
/// region is never partially constructed. Runtime write failures are not
/// represented here; they are recovered locally (the write is skipped and
/// logged) so sibling writes still land.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// A timeline step referenced a target that is not registered, or a
    /// segment reference invalidated by re-segmentation
    #[error("animation target not found: {id}")]
    MissingTarget { id: String },

    /// Trigger region anchors resolve out of scroll order
    #[error("malformed trigger region: start offset {start}px is past end offset {end}px")]
    MalformedRegion { start: f32, end: f32 },

    /// A timeline step declared no property tracks
    #[error("timeline step for {targets} target(s) has no property tracks")]
    EmptyStep { targets: usize },

    /// A property track pairs values of different kinds (e.g. a color
    /// `from` with a float `to`)
    #[error("property track mixes value kinds: {property}")]
    MismatchedTrack { property: String },
}

/// Result type for velvet operations
pub type Result<T> = std::result::Result<T, MotionError>;
