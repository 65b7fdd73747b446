//! Visual property model and the write seam
//!
//! The engine does not own a DOM; it emits `(target, property, value)`
//! writes through the `PropertySink` trait and the visual layer applies
//! them. `StyleBuffer` is the in-memory sink used by tests and the demo:
//! it holds the latest value per (target, property), so buffer state is a
//! pure function of the last write set.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::geometry::{Color, Vec2};
use crate::interpolate::Interpolate;
use crate::target::TargetHandle;

/// A styleable visual property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Property {
    /// Opacity, 0.0..=1.0
    Opacity,
    /// Horizontal offset in pixels
    TranslateX,
    /// Vertical offset in pixels
    TranslateY,
    /// Vertical offset as a percentage of the target's own height
    TranslateYPercent,
    /// Uniform scale factor
    Scale,
    /// Background fill color
    BackgroundColor,
    /// Backdrop blur radius in pixels
    BackdropBlur,
    /// Mask size as a scale factor of the base mask
    MaskSize,
    /// Mask reveal fraction, 0.0 (hidden) to 1.0 (fully revealed)
    MaskReveal,
    /// Media playback position in seconds
    PlaybackPosition,
}

impl Property {
    /// The value a `from`-only track animates toward: the property's
    /// resting state when no style is applied
    pub fn identity(self) -> PropertyValue {
        match self {
            Property::Opacity => PropertyValue::Float(1.0),
            Property::Scale | Property::MaskSize => PropertyValue::Float(1.0),
            Property::BackgroundColor => PropertyValue::Color(Color::TRANSPARENT),
            _ => PropertyValue::Float(0.0),
        }
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A property value of one of the supported kinds
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Float(f32),
    Vec2(Vec2),
    Color(Color),
}

impl PropertyValue {
    /// Interpolate between two values of the same kind
    ///
    /// Returns `None` for mismatched kinds; track construction rejects
    /// those, so a `None` here indicates a bug upstream.
    pub fn lerp(&self, other: &PropertyValue, t: f32) -> Option<PropertyValue> {
        match (self, other) {
            (PropertyValue::Float(a), PropertyValue::Float(b)) => {
                Some(PropertyValue::Float(a.lerp(b, t)))
            }
            (PropertyValue::Vec2(a), PropertyValue::Vec2(b)) => {
                Some(PropertyValue::Vec2(a.lerp(b, t)))
            }
            (PropertyValue::Color(a), PropertyValue::Color(b)) => {
                Some(PropertyValue::Color(a.lerp(b, t)))
            }
            _ => None,
        }
    }

    /// Check that two values are the same kind
    pub fn same_kind(&self, other: &PropertyValue) -> bool {
        matches!(
            (self, other),
            (PropertyValue::Float(_), PropertyValue::Float(_))
                | (PropertyValue::Vec2(_), PropertyValue::Vec2(_))
                | (PropertyValue::Color(_), PropertyValue::Color(_))
        )
    }

    /// Extract the float payload, if this is a float value
    pub fn as_float(&self) -> Option<f32> {
        match self {
            PropertyValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f32> for PropertyValue {
    fn from(v: f32) -> Self {
        PropertyValue::Float(v)
    }
}

impl From<Vec2> for PropertyValue {
    fn from(v: Vec2) -> Self {
        PropertyValue::Vec2(v)
    }
}

impl From<Color> for PropertyValue {
    fn from(v: Color) -> Self {
        PropertyValue::Color(v)
    }
}

/// The seam between the engine and the visual layer
///
/// One `set` call per (target, property) per update; the engine re-derives
/// values from absolute progress, so repeated identical updates produce
/// identical write sets.
pub trait PropertySink {
    fn set(&mut self, target: TargetHandle, property: Property, value: PropertyValue);
}

/// In-memory property sink holding the latest value per (target, property)
#[derive(Default)]
pub struct StyleBuffer {
    values: FxHashMap<(TargetHandle, Property), PropertyValue>,
}

impl StyleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value for a (target, property) pair
    pub fn get(&self, target: TargetHandle, property: Property) -> Option<PropertyValue> {
        self.values.get(&(target, property)).copied()
    }

    /// Number of distinct (target, property) pairs written
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop all recorded writes
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl PropertySink for StyleBuffer {
    fn set(&mut self, target: TargetHandle, property: Property, value: PropertyValue) {
        self.values.insert((target, property), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{ElementId, TargetRegistry};
    use crate::ElementBounds;

    fn element() -> ElementId {
        let mut registry = TargetRegistry::new();
        registry.register("x", ElementBounds::default())
    }

    #[test]
    fn test_lerp_rejects_mixed_kinds() {
        let a = PropertyValue::Float(0.0);
        let b = PropertyValue::Color(Color::TRANSPARENT);
        assert!(a.lerp(&b, 0.5).is_none());
        assert!(!a.same_kind(&b));
    }

    #[test]
    fn test_identity_values() {
        assert_eq!(Property::Opacity.identity(), PropertyValue::Float(1.0));
        assert_eq!(Property::Scale.identity(), PropertyValue::Float(1.0));
        assert_eq!(
            Property::TranslateYPercent.identity(),
            PropertyValue::Float(0.0)
        );
    }

    #[test]
    fn test_style_buffer_latest_write_wins() {
        let target = TargetHandle::Element(element());
        let mut buffer = StyleBuffer::new();

        buffer.set(target, Property::Opacity, PropertyValue::Float(0.3));
        buffer.set(target, Property::Opacity, PropertyValue::Float(0.7));

        assert_eq!(
            buffer.get(target, Property::Opacity),
            Some(PropertyValue::Float(0.7))
        );
        assert_eq!(buffer.len(), 1);
    }
}
