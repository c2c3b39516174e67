//! Cross-axis width resolution.
//!
//! Widths resolve through a layered override: an explicit per-item width,
//! then the section's, then the list's, then the full available width.
//! Horizontal padding is subtracted before a constraint is applied.

/// Clamps an available width to a caller-supplied bound.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum WidthConstraint {
    /// Use the full padded width.
    #[default]
    NoConstraint,
    /// Use exactly this width.
    Fixed(f32),
    /// Use the padded width, but no more than this.
    AtMost(f32),
    /// Use the padded width, but no less than this.
    AtLeast(f32),
}

impl WidthConstraint {
    pub fn clamp(&self, value: f32) -> f32 {
        match *self {
            WidthConstraint::NoConstraint => value,
            WidthConstraint::Fixed(fixed) => fixed,
            WidthConstraint::AtMost(max) => value.min(max),
            WidthConstraint::AtLeast(min) => value.max(min),
        }
    }

    /// Resolves the usable width for `available` space after `padding`.
    pub fn resolve(&self, available: f32, padding: HorizontalPadding) -> f32 {
        self.clamp(available - padding.left - padding.right)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct HorizontalPadding {
    pub left: f32,
    pub right: f32,
}

impl HorizontalPadding {
    pub const ZERO: HorizontalPadding = HorizontalPadding {
        left: 0.0,
        right: 0.0,
    };

    pub const fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    pub fn total(&self) -> f32 {
        self.left + self.right
    }
}

/// Per-element width override, layered over the containing default.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum CustomWidth {
    /// Inherit the containing width (section, then list).
    #[default]
    Default,
    /// Span the full available width, ignoring padding.
    Fill,
    /// An explicit constraint with its own padding and alignment.
    Custom(CustomWidthSpec),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CustomWidthSpec {
    pub padding: HorizontalPadding,
    pub width: WidthConstraint,
    pub alignment: WidthAlignment,
}

/// Where a narrower-than-available element sits across the axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WidthAlignment {
    Leading,
    #[default]
    Center,
    Trailing,
}

impl WidthAlignment {
    fn origin(&self, available: f32, width: f32, padding: HorizontalPadding) -> f32 {
        match self {
            WidthAlignment::Leading => padding.left,
            WidthAlignment::Center => {
                padding.left + ((available - padding.total() - width) / 2.0).max(0.0)
            }
            WidthAlignment::Trailing => available - padding.right - width,
        }
    }
}

/// A resolved cross-axis placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WidthPosition {
    pub origin: f32,
    pub width: f32,
}

impl CustomWidth {
    /// Layers this override atop another; `Default` defers to `other`.
    pub fn merge(self, other: CustomWidth) -> CustomWidth {
        match self {
            CustomWidth::Default => other,
            _ => self,
        }
    }

    /// Resolves to a concrete origin and width.
    ///
    /// `default_origin`/`default_width` come from the containing level's
    /// resolution; `available` is the raw cross-axis extent of the view.
    pub fn position(
        &self,
        available: f32,
        default_origin: f32,
        default_width: f32,
    ) -> WidthPosition {
        match self {
            CustomWidth::Default => WidthPosition {
                origin: default_origin,
                width: default_width,
            },
            CustomWidth::Fill => WidthPosition {
                origin: 0.0,
                width: available,
            },
            CustomWidth::Custom(spec) => {
                let width = spec.width.resolve(available, spec.padding);
                WidthPosition {
                    origin: spec.alignment.origin(available, width, spec.padding),
                    width,
                }
            }
        }
    }
}
