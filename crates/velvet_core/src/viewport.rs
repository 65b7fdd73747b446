//! Viewport classification
//!
//! Maps the current viewport width onto a discrete responsive class used to
//! select per-class trigger-region anchors. Classification is a pure
//! function; sections classify once at construction and are rebuilt (not
//! mutated) when the class changes.

use serde::{Deserialize, Serialize};

/// Published breakpoint: widths at or below this are `Compact`
pub const COMPACT_BREAKPOINT: f32 = 767.0;

/// Discrete responsive class
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewportClass {
    /// Phone-sized viewports (width <= 767px)
    Compact,
    /// Everything wider
    Wide,
}

impl ViewportClass {
    /// Classify a viewport width
    pub fn classify(width: f32) -> Self {
        if width <= COMPACT_BREAKPOINT {
            ViewportClass::Compact
        } else {
            ViewportClass::Wide
        }
    }
}

/// Current viewport dimensions, sampled by the frame callback
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportMetrics {
    pub width: f32,
    pub height: f32,
}

impl ViewportMetrics {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn class(&self) -> ViewportClass {
        ViewportClass::classify(self.width)
    }
}
