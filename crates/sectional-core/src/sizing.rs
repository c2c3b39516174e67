//! Sizing specs: how an element's extent is determined.
//!
//! Measurement is expensive, so resolved sizes are memoized per live
//! element, keyed by [`SizeKey`] (constraint, direction, and spec). The
//! key hashes `f32` bit patterns so it can live in a plain hash map.

use std::hash::{Hash, Hasher};

use crate::direction::LayoutDirection;
use crate::geometry::Size;

/// How one item or header/footer is sized.
#[derive(Clone, Copy, Debug)]
pub enum Sizing {
    /// Use the default size the appearance supplies for this slot.
    Default,
    /// A fixed size; no measurement is performed.
    Fixed { width: f32, height: f32 },
    /// Measure the content within the constraint, then clamp the result.
    ThatFits(Constraint),
    /// Resolve to the full measurement constraint, falling back to the
    /// default size on any axis the constraint leaves unbounded.
    Fill,
}

impl Sizing {
    /// Convenience for the common fixed-height case.
    pub fn fixed_height(height: f32) -> Self {
        Sizing::Fixed {
            width: 0.0,
            height,
        }
    }

    /// Resolves this spec to a concrete size.
    ///
    /// `measure` is invoked only for [`Sizing::ThatFits`]; fixed and fill
    /// sizing never touch the platform. A zero-area constraint
    /// short-circuits to zero without measuring.
    pub fn measure(&self, info: &MeasureInfo, measure: impl FnOnce(Size) -> Size) -> Size {
        if info.size_constraint.is_empty() {
            return Size::ZERO;
        }

        match *self {
            Sizing::Default => info.default_size,
            Sizing::Fixed { width, height } => Size::new(width, height),
            Sizing::Fill => {
                // Layouts measure with an unbounded scroll axis; a frame
                // must still come out finite.
                let fallback = |constrained: f32, default: f32| {
                    if constrained.is_finite() {
                        constrained
                    } else {
                        default
                    }
                };

                Size::new(
                    fallback(info.size_constraint.width, info.default_size.width),
                    fallback(info.size_constraint.height, info.default_size.height),
                )
            }
            Sizing::ThatFits(constraint) => constraint.clamp(measure(info.size_constraint)),
        }
    }
}

impl Default for Sizing {
    fn default() -> Self {
        Sizing::Default
    }
}

impl PartialEq for Sizing {
    fn eq(&self, other: &Self) -> bool {
        use Sizing::*;

        match (self, other) {
            (Default, Default) | (Fill, Fill) => true,
            (
                Fixed {
                    width: w1,
                    height: h1,
                },
                Fixed {
                    width: w2,
                    height: h2,
                },
            ) => w1.to_bits() == w2.to_bits() && h1.to_bits() == h2.to_bits(),
            (ThatFits(c1), ThatFits(c2)) => c1 == c2,
            _ => false,
        }
    }
}

impl Eq for Sizing {}

impl Hash for Sizing {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match *self {
            Sizing::Default => state.write_u8(0),
            Sizing::Fixed { width, height } => {
                state.write_u8(1);
                state.write_u32(width.to_bits());
                state.write_u32(height.to_bits());
            }
            Sizing::ThatFits(constraint) => {
                state.write_u8(2);
                constraint.hash(state);
            }
            Sizing::Fill => state.write_u8(3),
        }
    }
}

/// Per-axis clamp bounds applied to a measured size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Constraint {
    pub width: ConstraintValue,
    pub height: ConstraintValue,
}

impl Constraint {
    pub const NONE: Constraint = Constraint {
        width: ConstraintValue::NoConstraint,
        height: ConstraintValue::NoConstraint,
    };

    pub fn at_least_height(height: f32) -> Self {
        Self {
            width: ConstraintValue::NoConstraint,
            height: ConstraintValue::AtLeast(height),
        }
    }

    pub fn clamp(&self, size: Size) -> Size {
        Size::new(self.width.clamp(size.width), self.height.clamp(size.height))
    }
}

/// A clamp bound along one axis.
#[derive(Clone, Copy, Debug, Default)]
pub enum ConstraintValue {
    #[default]
    NoConstraint,
    AtLeast(f32),
    AtMost(f32),
    Within {
        min: f32,
        max: f32,
    },
}

impl ConstraintValue {
    pub fn clamp(&self, value: f32) -> f32 {
        match *self {
            ConstraintValue::NoConstraint => value,
            ConstraintValue::AtLeast(min) => value.max(min),
            ConstraintValue::AtMost(max) => value.min(max),
            ConstraintValue::Within { min, max } => value.clamp(min, max),
        }
    }
}

impl PartialEq for ConstraintValue {
    fn eq(&self, other: &Self) -> bool {
        use ConstraintValue::*;

        match (self, other) {
            (NoConstraint, NoConstraint) => true,
            (AtLeast(a), AtLeast(b)) | (AtMost(a), AtMost(b)) => a.to_bits() == b.to_bits(),
            (Within { min: a1, max: a2 }, Within { min: b1, max: b2 }) => {
                a1.to_bits() == b1.to_bits() && a2.to_bits() == b2.to_bits()
            }
            _ => false,
        }
    }
}

impl Eq for ConstraintValue {}

impl Hash for ConstraintValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match *self {
            ConstraintValue::NoConstraint => state.write_u8(0),
            ConstraintValue::AtLeast(value) => {
                state.write_u8(1);
                state.write_u32(value.to_bits());
            }
            ConstraintValue::AtMost(value) => {
                state.write_u8(2);
                state.write_u32(value.to_bits());
            }
            ConstraintValue::Within { min, max } => {
                state.write_u8(3);
                state.write_u32(min.to_bits());
                state.write_u32(max.to_bits());
            }
        }
    }
}

/// Everything a measurement pass needs to know.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeasureInfo {
    /// The bounding constraint; measurement must fit within it.
    pub size_constraint: Size,
    /// Fallback size for [`Sizing::Default`], supplied by the appearance.
    pub default_size: Size,
    pub direction: LayoutDirection,
}

/// Memo-cache key for one resolved size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SizeKey {
    width: u32,
    height: u32,
    direction: LayoutDirection,
    sizing: Sizing,
}

impl SizeKey {
    pub fn new(info: &MeasureInfo, sizing: Sizing) -> Self {
        Self {
            width: info.size_constraint.width.to_bits(),
            height: info.size_constraint.height.to_bits(),
            direction: info.direction,
            sizing,
        }
    }
}
