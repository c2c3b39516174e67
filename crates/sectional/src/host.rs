//! The seams between the engine and the platform.
//!
//! The engine never touches real views. Everything it needs from the
//! platform goes through [`ViewHost`]; deferred work goes through
//! [`Scheduler`]; performance tracing goes through [`Instrumentation`].
//! Tests drive the engine with recording implementations of all three.

use std::any::Any;

use sectional_core::{ElementKey, Point, ReuseKey, Size, ViewHandle};
use sectional_layout::{LayoutAttributes, ScrollViewProperties};

use crate::dispatcher::BatchChanges;

/// The platform view hierarchy, as the engine sees it.
///
/// The host owns all view objects; the engine refers to them only by
/// [`ViewHandle`] and drives them through this trait.
pub trait ViewHost {
    /// Returns a view for `reuse_key`, recycling a pooled one if possible.
    fn create_or_reuse_view(&mut self, reuse_key: ReuseKey) -> ViewHandle;

    /// The view object behind `view`, for content application.
    fn view_mut(&mut self, view: ViewHandle) -> &mut dyn Any;

    /// The fitting size of `view` within `constraint`.
    fn measure(&mut self, view: ViewHandle, constraint: Size) -> Size;

    /// Applies one element's final geometry.
    fn apply_geometry(&mut self, key: ElementKey, attributes: &LayoutAttributes);

    /// Announces the aggregate content size of the current layout.
    fn update_content_size(&mut self, size: Size);

    /// Applies one structural batch: deletes, then inserts, then moves.
    fn apply_batch(&mut self, changes: &BatchChanges, animated: bool);

    fn update_scroll_view_properties(&mut self, properties: ScrollViewProperties);

    /// Scrolls the content to `offset`.
    fn scroll_to(&mut self, offset: Point, animated: bool);
}

/// Defers work to the next platform runloop tick.
///
/// Selection callbacks run through here so caller-supplied work never
/// blocks the platform's highlight animation.
pub trait Scheduler {
    fn schedule(&self, work: Box<dyn FnOnce()>);
}

/// Hooks around the engine's expensive passes, for profiling.
pub trait Instrumentation {
    fn begin(&self, label: &'static str) {
        let _ = label;
    }

    fn end(&self, label: &'static str) {
        let _ = label;
    }
}

/// Discards all instrumentation events.
#[derive(Default)]
pub struct NoopInstrumentation;

impl Instrumentation for NoopInstrumentation {}
