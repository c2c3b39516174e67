//! The scroll axis of a list, plus coordinate switching helpers.
//!
//! Layout algorithms work in an axis-neutral space where "height" means the
//! extent along the scroll axis and "width" the extent across it. The
//! helpers here convert between that space and real frames, so the same
//! placement code serves both vertical and horizontal lists.

use crate::geometry::{Point, Rect, Size};

/// The axis a list scrolls along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LayoutDirection {
    /// Content flows top to bottom.
    #[default]
    Vertical,
    /// Content flows leading to trailing.
    Horizontal,
}

impl LayoutDirection {
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, LayoutDirection::Vertical)
    }

    /// The extent of `size` along the scroll axis.
    #[inline]
    pub fn main(self, size: Size) -> f32 {
        match self {
            LayoutDirection::Vertical => size.height,
            LayoutDirection::Horizontal => size.width,
        }
    }

    /// The extent of `size` across the scroll axis.
    #[inline]
    pub fn cross(self, size: Size) -> f32 {
        match self {
            LayoutDirection::Vertical => size.width,
            LayoutDirection::Horizontal => size.height,
        }
    }

    /// Builds a real size from axis-neutral extents.
    #[inline]
    pub fn size(self, main: f32, cross: f32) -> Size {
        match self {
            LayoutDirection::Vertical => Size::new(cross, main),
            LayoutDirection::Horizontal => Size::new(main, cross),
        }
    }

    /// Builds a real frame from axis-neutral origin and extents.
    #[inline]
    pub fn rect(self, main: f32, cross: f32, main_extent: f32, cross_extent: f32) -> Rect {
        match self {
            LayoutDirection::Vertical => Rect::new(cross, main, cross_extent, main_extent),
            LayoutDirection::Horizontal => Rect::new(main, cross, main_extent, cross_extent),
        }
    }

    /// The scroll-axis component of `point`.
    #[inline]
    pub fn main_offset(self, point: Point) -> f32 {
        match self {
            LayoutDirection::Vertical => point.y,
            LayoutDirection::Horizontal => point.x,
        }
    }

    /// The scroll-axis origin of `rect`.
    #[inline]
    pub fn main_origin(self, rect: Rect) -> f32 {
        match self {
            LayoutDirection::Vertical => rect.y,
            LayoutDirection::Horizontal => rect.x,
        }
    }

    /// The trailing scroll-axis edge of `rect`.
    #[inline]
    pub fn max_main(self, rect: Rect) -> f32 {
        match self {
            LayoutDirection::Vertical => rect.max_y(),
            LayoutDirection::Horizontal => rect.max_x(),
        }
    }
}
