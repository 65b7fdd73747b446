//! Small geometry and color types shared across the engine

use serde::{Deserialize, Serialize};

/// 2D vector (pixel offsets, mask positions)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// RGBA color with components in 0.0..=1.0
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse from 0xRRGGBBAA
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 24) & 0xff) as f32 / 255.0,
            g: ((hex >> 16) & 0xff) as f32 / 255.0,
            b: ((hex >> 8) & 0xff) as f32 / 255.0,
            a: (hex & 0xff) as f32 / 255.0,
        }
    }
}

/// Resolved layout bounds of a registered element, in page coordinates
///
/// `top` is the distance from the top of the page (not the viewport); the
/// trigger-region anchor math subtracts scroll position itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementBounds {
    /// Distance from page top to the element's top edge, in pixels
    pub top: f32,
    /// Element height in pixels
    pub height: f32,
}

impl ElementBounds {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    /// Pixel offset of a fractional position within the element
    /// (0.0 = top edge, 1.0 = bottom edge; values outside 0..=1 project past
    /// the element, which anchors like "120% top" rely on)
    pub fn offset_at(&self, fraction: f32) -> f32 {
        self.top + self.height * fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex(0x00000050);
        assert_eq!(c.r, 0.0);
        assert!((c.a - 0x50 as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounds_offset_projection() {
        let b = ElementBounds::new(1000.0, 500.0);
        assert_eq!(b.offset_at(0.0), 1000.0);
        assert_eq!(b.offset_at(1.0), 1500.0);
        // "120% top" style anchors project past the element
        assert_eq!(b.offset_at(1.2), 1600.0);
    }
}
