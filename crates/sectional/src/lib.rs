//! The Sectional engine: diffing, presentation state, and dispatch.
//!
//! Callers describe a list as a [`Content`] value and hand it to a
//! [`ListController`]. The controller diffs it against the previous round
//! by identity, updates the long-lived presentation state (one state
//! object and optional coordinator per item identity), runs the layout,
//! and pushes an ordered batch of structural changes plus final geometry
//! to the platform through [`ViewHost`].
//!
//! [`Content`]: sectional_core::Content

mod diff;
mod dispatcher;
mod header_footer_state;
mod host;
mod item_state;
mod list_controller;
mod measure;
mod presentation_state;
mod reorder;

pub use diff::{ItemMatch, SectionMatch, SectionSnapshot, SectionedDiff};
pub use dispatcher::BatchChanges;
pub use header_footer_state::HeaderFooterState;
pub use host::{Instrumentation, NoopInstrumentation, Scheduler, ViewHost};
pub use item_state::{ItemState, ItemUpdateReason, PendingCoordinatorUpdate, PendingUpdates};
pub use list_controller::{AutoScrollAction, ListController, ListProperties, ScrollPosition};
pub use measure::MeasurementViewCache;
pub use presentation_state::{PresentationSection, PresentationState};
pub use reorder::InProgressReorder;

pub mod prelude {
    pub use crate::{ListController, ListProperties, ViewHost};
    pub use sectional_core::prelude::*;
    pub use sectional_layout::{
        Appearance, Behavior, LayoutDescription, SelectionMode, Viewport,
    };
}
