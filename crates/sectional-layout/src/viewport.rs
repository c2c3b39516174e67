//! The visible window into the laid-out content.

use sectional_core::{Point, Rect, Size};

/// The platform scroll view's visible region: its size plus the current
/// content offset. Captured at the start of every layout pass.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Viewport {
    pub size: Size,
    pub content_offset: Point,
}

impl Viewport {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            content_offset: Point::ZERO,
        }
    }

    /// The rect of content currently on screen.
    pub fn visible_rect(&self) -> Rect {
        Rect::from_origin_size(self.content_offset, self.size)
    }
}
