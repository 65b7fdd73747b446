//! Easing curves
//!
//! Named interpolation curves referenced by timeline steps. All curves map
//! [0,1] onto [0,1] with f(0)=0 and f(1)=1; input is clamped.

use serde::{Deserialize, Serialize};

/// Named easing curve
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant-rate interpolation
    #[default]
    Linear,
    /// Exponential deceleration: fast start, smooth landing
    ExpoOut,
    /// Quadratic deceleration
    Power1Out,
    /// Quadratic ease-in-out
    Power1InOut,
    /// Cubic deceleration
    Power2Out,
    /// Cubic ease-in-out
    Power2InOut,
}

impl Easing {
    /// Apply the curve to a progress fraction
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0f32.powf(-10.0 * t)
                }
            }
            Easing::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - 4.0 * (1.0 - t).powi(3)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Easing; 6] = [
        Easing::Linear,
        Easing::ExpoOut,
        Easing::Power1Out,
        Easing::Power1InOut,
        Easing::Power2Out,
        Easing::Power2InOut,
    ];

    #[test]
    fn test_endpoints() {
        for curve in CURVES {
            assert!((curve.apply(0.0)).abs() < 1e-3, "{curve:?} at 0");
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-3, "{curve:?} at 1");
        }
    }

    #[test]
    fn test_input_clamped() {
        for curve in CURVES {
            assert_eq!(curve.apply(-0.5), curve.apply(0.0));
            assert_eq!(curve.apply(1.5), curve.apply(1.0));
        }
    }

    #[test]
    fn test_monotonic() {
        for curve in CURVES {
            let mut prev = curve.apply(0.0);
            for i in 1..=100 {
                let v = curve.apply(i as f32 / 100.0);
                assert!(v >= prev - 1e-6, "{curve:?} not monotonic at {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_expo_out_front_loads() {
        // expo.out covers most of the distance early
        assert!(Easing::ExpoOut.apply(0.3) > 0.8);
    }
}
