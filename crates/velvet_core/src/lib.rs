//! Velvet Core
//!
//! Foundational primitives for the velvet scroll-animation engine:
//!
//! - **Error taxonomy**: construction-time failures vs. recovered runtime skips
//! - **Easing curves**: the named interpolation curves timelines reference
//! - **Interpolatable values**: lerp for floats, vectors, and colors
//! - **Property model**: the visual properties the engine writes, and the
//!   `PropertySink` seam it writes them through
//! - **Targets**: string-id registry resolving animation targets to handles
//! - **Viewport classification**: compact/wide responsive tiers
//!
//! # Example
//!
//! ```rust
//! use velvet_core::{Easing, Interpolate};
//!
//! let eased = Easing::ExpoOut.apply(0.5);
//! let value = 100.0f32.lerp(&0.0, eased);
//! assert!(value < 50.0); // expo.out front-loads the motion
//! ```

pub mod easing;
pub mod error;
pub mod geometry;
pub mod interpolate;
pub mod property;
pub mod target;
pub mod viewport;

pub use easing::Easing;
pub use error::{MotionError, Result};
pub use geometry::{Color, ElementBounds, Vec2};
pub use interpolate::Interpolate;
pub use property::{Property, PropertySink, PropertyValue, StyleBuffer};
pub use target::{ElementId, SegmentKey, SegmentRef, TargetHandle, TargetRegistry};
pub use viewport::{ViewportClass, ViewportMetrics, COMPACT_BREAKPOINT};
