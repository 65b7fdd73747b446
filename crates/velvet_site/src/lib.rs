//! Velvet Pour page sections
//!
//! The marketing page expressed as engine data: content records, a
//! simulated layout pass, and builders producing one `SectionSpec` per
//! page block. The `velvet-demo` binary mounts everything and scripts a
//! scroll through the page.

pub mod content;
pub mod layout;
pub mod sections;

pub use content::{DisplayRecord, NavLink};
