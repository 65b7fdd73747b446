//! Interpolatable value types
//!
//! Provides the `Interpolate` trait and implementations for the value kinds
//! timeline tracks animate: scalars, 2D vectors, and colors.

use crate::geometry::{Color, Vec2};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

impl Interpolate for Vec2 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec2::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl Interpolate for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
            && (self.a - other.a).abs() < epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_interpolation() {
        assert!((0.0f32.lerp(&1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((100.0f32.lerp(&0.0, 0.25) - 75.0).abs() < 1e-6);
    }

    #[test]
    fn test_vec2_interpolation() {
        let a = Vec2::new(-100.0, 100.0);
        let b = Vec2::ZERO;
        let mid = a.lerp(&b, 0.5);
        assert!((mid.x + 50.0).abs() < 1e-6);
        assert!((mid.y - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_color_interpolation() {
        let from = Color::TRANSPARENT;
        let to = Color::from_hex(0x00000050);
        let mid = from.lerp(&to, 0.5);
        assert!(mid.approx_eq(&Color::rgba(0.0, 0.0, 0.0, to.a / 2.0), 1e-6));
    }
}
