//! Test doubles and canned content for exercising Sectional.
//!
//! [`RecordingHost`] stands in for the platform view hierarchy and
//! remembers every batch, frame, and content size the engine pushes;
//! [`ImmediateScheduler`] and [`ManualScheduler`] give tests control over
//! deferred work; the content module supplies ready-made item and header
//! types with configurable identity and equivalence.

mod content;
mod host;
mod scheduler;

pub use content::{
    header, row_item, rows_content, rows_section, CoordinatedRow, CoordinatorLog, TestHeader,
    TestRow,
};
pub use host::{RecordingHost, TestView};
pub use scheduler::{ImmediateScheduler, ManualScheduler};
