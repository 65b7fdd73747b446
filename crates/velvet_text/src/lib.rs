//! Velvet Text
//!
//! Decomposes text content into an ordered, addressable hierarchy of
//! segments (lines, words, characters) for per-segment animation
//! targeting. The semantic content is never altered: concatenating all
//! leaves in order reproduces the source text exactly.
//!
//! # Whitespace policy
//!
//! Inter-word whitespace runs and line breaks become their own leaves,
//! flagged as separators. Separators participate in round-trip
//! reconstruction but are excluded from [`SegmentTree::targets`], so a
//! staggered reveal never wastes a stagger slot on a space.
//!
//! # Example
//!
//! ```rust
//! use velvet_text::{Granularity, SegmentTree};
//!
//! let tree = SegmentTree::segment("MOJITO", &[Granularity::Character]);
//! assert_eq!(tree.targets().len(), 6);
//! assert_eq!(tree.reconstruct(), "MOJITO");
//! ```

pub mod segment;
mod splitter;

pub use segment::{Granularity, SegmentNode, SegmentTree};
pub use velvet_core::{SegmentKey, SegmentRef};
