//! Tracking for an in-flight interactive item move.

use sectional_core::IndexPath;

/// The gesture state for one interactive move. Created when the gesture
/// begins and consumed when it ends; exactly one may be active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InProgressReorder {
    /// Where the item sat when the gesture began.
    pub from: IndexPath,
    /// Where the item currently sits in the live layout.
    pub current: IndexPath,
}

impl InProgressReorder {
    pub fn new(from: IndexPath) -> Self {
        Self { from, current: from }
    }

    /// Whether ending the gesture now would leave the item where it started.
    pub fn is_no_op(&self) -> bool {
        self.from == self.current
    }
}
