//! The engine's front door: content in, view updates out.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, trace};

use sectional_core::{
    AnyIdentifier, ApplyReason, Content, ContentSlice, ElementKey, ExecutionType, IndexPath,
    Point, ReorderResult, Size, UpdateCallbacks, ViewHandle,
};
use sectional_layout::{
    Appearance, Behavior, LayoutContext, LayoutDescription, ListLayout, ListLayoutContent,
    NeededLayout, SelectionMode, Viewport,
};

use crate::diff::SectionedDiff;
use crate::dispatcher::BatchChanges;
use crate::host::{Instrumentation, NoopInstrumentation, Scheduler, ViewHost};
use crate::item_state::PendingUpdates;
use crate::measure::MeasurementViewCache;
use crate::presentation_state::{self, PresentationState};
use crate::reorder::InProgressReorder;

/// Where an automatic scroll should leave its target in the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollPosition {
    #[default]
    Top,
    Center,
    Bottom,
}

/// A scroll the engine performs on the caller's behalf after applying a
/// content round.
#[derive(Clone, Default)]
pub enum AutoScrollAction {
    #[default]
    None,

    /// Scrolls to the item with `identifier` once a content round inserts
    /// it. Rounds where the item already existed leave the offset alone.
    ScrollToOnInsert {
        identifier: AnyIdentifier,
        position: ScrollPosition,
        animated: bool,
    },
}

/// Everything a caller supplies on each configuration pass.
#[derive(Default)]
pub struct ListProperties {
    pub content: Content,
    pub appearance: Appearance,
    pub behavior: Behavior,
    pub layout: LayoutDescription,
    pub auto_scroll: AutoScrollAction,
    pub animates_changes: bool,
}

impl ListProperties {
    pub fn new(configure: impl FnOnce(&mut Self)) -> Self {
        let mut properties = Self::default();
        configure(&mut properties);
        properties
    }
}

/// Owns the full pipeline for one list: content snapshots, the diff, the
/// presentation state, the layout, and the dispatch of changes to the host.
///
/// Not thread safe; everything runs on the host's UI thread.
pub struct ListController {
    host: Rc<RefCell<dyn ViewHost>>,
    scheduler: Rc<dyn Scheduler>,
    instrumentation: Rc<dyn Instrumentation>,

    appearance: Appearance,
    behavior: Behavior,
    layout_description: LayoutDescription,
    layout: Box<dyn ListLayout>,
    auto_scroll: AutoScrollAction,
    animates_changes: bool,

    /// The full content as last configured.
    content: Content,
    /// The windowed portion of `content` currently presented.
    slice: ContentSlice,
    /// How far into the content the presentation window reaches.
    window_cursor: IndexPath,

    state: PresentationState,
    layout_content: ListLayoutContent,
    viewport: Viewport,

    measurement_views: Rc<RefCell<MeasurementViewCache>>,
    pending: PendingUpdates,
    needed_layout: NeededLayout,

    /// Guards against re-entrant configuration from caller callbacks.
    is_updating: bool,
    queued_configure: Option<ListProperties>,

    reorder: Option<InProgressReorder>,
}

impl ListController {
    pub fn new(host: Rc<RefCell<dyn ViewHost>>, scheduler: Rc<dyn Scheduler>) -> Self {
        let appearance = Appearance::default();
        let layout_description = LayoutDescription::default();

        Self {
            host,
            scheduler,
            instrumentation: Rc::new(NoopInstrumentation),
            layout: layout_description.create(),
            layout_description,
            behavior: Behavior::default(),
            auto_scroll: AutoScrollAction::None,
            animates_changes: true,
            content: Content::default(),
            slice: ContentSlice::default(),
            window_cursor: IndexPath::ZERO,
            state: PresentationState::default(),
            layout_content: ListLayoutContent::empty(appearance.direction),
            appearance,
            viewport: Viewport::default(),
            measurement_views: Rc::new(RefCell::new(MeasurementViewCache::default())),
            pending: Rc::new(RefCell::new(Vec::new())),
            needed_layout: NeededLayout::None,
            is_updating: false,
            queued_configure: None,
            reorder: None,
        }
    }

    pub fn set_instrumentation(&mut self, instrumentation: Rc<dyn Instrumentation>) {
        self.instrumentation = instrumentation;
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn presented_item_count(&self) -> usize {
        self.state.item_count()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The geometry of the last layout pass.
    pub fn layout_attributes(&self) -> sectional_layout::ListLayoutAttributes {
        self.layout_content.attributes()
    }

    /// Applies a new round of content and settings.
    ///
    /// Re-entrant calls (from update callbacks) queue and run once the
    /// in-flight pass finishes.
    pub fn configure(&mut self, properties: ListProperties) {
        if self.is_updating {
            trace!("configure during update; queueing");
            self.queued_configure = Some(properties);
            return;
        }

        self.perform_configure(properties);

        while let Some(queued) = self.queued_configure.take() {
            self.perform_configure(queued);
        }
    }

    fn perform_configure(&mut self, properties: ListProperties) {
        if properties.layout != self.layout_description {
            self.layout_description = properties.layout;
            self.layout = properties.layout.create();
            self.needed_layout.merge(NeededLayout::Rebuild);
        }

        if properties.appearance != self.appearance {
            self.appearance = properties.appearance;
            self.state.reset_cached_sizes();
            self.needed_layout.merge(NeededLayout::Rebuild);
        }

        self.behavior = properties.behavior;
        self.auto_scroll = properties.auto_scroll;
        self.animates_changes = properties.animates_changes;
        self.content = properties.content;

        self.apply_content();
    }

    /// Diffs the windowed content against the presentation state and
    /// pushes the result to the host.
    fn apply_content(&mut self) {
        self.instrumentation.begin("update");
        self.is_updating = true;

        self.slice = self.content.slice_to(self.window_cursor);

        let snapshot = self.state.snapshot();
        let diff = SectionedDiff::calculate(&snapshot, &self.slice.content);
        let changes = BatchChanges::from_diff(&diff);

        let mut callbacks = UpdateCallbacks::new(ExecutionType::Queue);
        self.state
            .update(&self.slice.content, &diff, &self.pending, &mut callbacks);

        self.needed_layout.merge(NeededLayout::Rebuild);
        self.perform_layout();

        let animated = self.animates_changes && diff.has_changes();
        {
            let mut host = self.host.borrow_mut();

            if !changes.is_empty() {
                debug!(
                    "dispatching batch: -{} +{} sections, -{} +{} ~{} items",
                    changes.deleted_sections.len(),
                    changes.inserted_sections.len(),
                    changes.deleted_items.len(),
                    changes.inserted_items.len(),
                    changes.moved_items.len(),
                );
                host.apply_batch(&changes, animated);
            }

            host.update_scroll_view_properties(
                self.layout.scroll_view_properties(&self.behavior),
            );
        }

        self.push_geometry();
        self.reapply_changed_visible_items(&diff);
        self.perform_auto_scroll(&diff);

        callbacks.perform();
        self.is_updating = false;
        self.instrumentation.end("update");

        self.drain_coordinator_updates();
    }

    /// Items whose identity survived but whose content changed must be
    /// re-applied to any view currently bound to them.
    fn reapply_changed_visible_items(&mut self, diff: &SectionedDiff) {
        let mut host = self.host.borrow_mut();

        for matched in &diff.matched_items {
            if matched.equivalent {
                continue;
            }

            let Some(state) = self.state.item_at(matched.to) else {
                continue;
            };
            let Some(view) = state.bound_view() else {
                continue;
            };

            state
                .item()
                .apply(host.view_mut(view), ApplyReason::WasUpdated);
        }
    }

    /// Honors the configured auto-scroll action when this round inserted
    /// its target item.
    fn perform_auto_scroll(&mut self, diff: &SectionedDiff) {
        let AutoScrollAction::ScrollToOnInsert {
            identifier,
            position,
            animated,
        } = &self.auto_scroll
        else {
            return;
        };

        let Some(index_path) = self.state.index_path_for(identifier) else {
            return;
        };
        if !diff.inserted_items.contains(&index_path) {
            return;
        }

        let direction = self.appearance.direction;
        let frame = self.layout_content.item(index_path).frame;
        let viewport_extent = direction.main(self.viewport.size);

        let target = match position {
            ScrollPosition::Top => direction.main_origin(frame),
            ScrollPosition::Center => {
                direction.main_origin(frame) + direction.main(frame.size()) / 2.0
                    - viewport_extent / 2.0
            }
            ScrollPosition::Bottom => direction.max_main(frame) - viewport_extent,
        };

        let max_offset = (direction.main(self.layout_content.content_size) - viewport_extent).max(0.0);
        let target = target.clamp(0.0, max_offset);

        let offset = match direction.is_vertical() {
            true => Point::new(0.0, target),
            false => Point::new(target, 0.0),
        };

        debug!("auto-scrolling to inserted item at {index_path:?}");
        self.host.borrow_mut().scroll_to(offset, *animated);
    }

    /// Performs however much layout work is pending: a full rebuild of the
    /// layout content, the cheaper scroll-dependent repositioning pass, or
    /// nothing at all.
    fn perform_layout(&mut self) {
        let needed = self.needed_layout.take();

        let context = LayoutContext {
            viewport: self.viewport,
            appearance: &self.appearance,
            behavior: &self.behavior,
        };

        match needed {
            NeededLayout::None => {}
            NeededLayout::Relayout => {
                self.layout.update_layout(&context, &mut self.layout_content);
            }
            NeededLayout::Rebuild => {
                self.instrumentation.begin("layout");

                self.layout_content = self.state.build_layout_content(
                    self.appearance.direction,
                    &self.host,
                    &self.measurement_views,
                );
                self.layout.layout(&context, &mut self.layout_content);

                self.instrumentation.end("layout");
            }
        }
    }

    fn push_geometry(&mut self) {
        let attributes = self.layout_content.attributes();

        let mut host = self.host.borrow_mut();
        host.update_content_size(attributes.content_size);

        for (key, element) in &attributes.elements {
            host.apply_geometry(*key, element);
        }
    }

    /// Applies content changes coordinators pushed during the last pass,
    /// then relayouts once if anything changed.
    fn drain_coordinator_updates(&mut self) {
        let mut applied_any = false;

        loop {
            let drained: Vec<_> = self.pending.borrow_mut().drain(..).collect();
            if drained.is_empty() {
                break;
            }

            let mut callbacks = UpdateCallbacks::new(ExecutionType::Queue);

            for update in drained {
                let Some(index_path) = self.state.index_path_for(&update.identifier) else {
                    trace!(
                        "dropping coordinator update for departed identity {:?}",
                        update.identifier,
                    );
                    continue;
                };

                if let Some(state) = self.state.item_at_mut(index_path) {
                    state.apply_coordinator_update(update.item, &mut callbacks);
                    applied_any = true;

                    if let Some(view) = state.bound_view() {
                        let item = state.item();
                        let mut host = self.host.borrow_mut();
                        item.apply(host.view_mut(view), ApplyReason::WasUpdated);
                    }
                }
            }

            callbacks.perform();
        }

        if applied_any {
            self.needed_layout.merge(NeededLayout::Rebuild);
            self.perform_layout();
            self.push_geometry();
        }
    }

    /// The host's scroll view changed size or scrolled.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        let size_changed = viewport.size != self.viewport.size;
        let offset_changed = viewport.content_offset != self.viewport.content_offset;
        self.viewport = viewport;

        if size_changed {
            // The measurement basis changed; every memoized size is stale.
            self.state.reset_cached_sizes();
            self.needed_layout.merge(NeededLayout::Rebuild);
        } else if offset_changed {
            self.needed_layout.merge(NeededLayout::Relayout);
        }

        if size_changed || offset_changed {
            self.perform_layout();
            self.push_geometry();
        }

        if offset_changed || size_changed {
            self.update_visible_window();
        }
    }

    /// Widens the presentation window when scrolling approaches the end of
    /// the currently presented slice.
    fn update_visible_window(&mut self) {
        if self.slice.contains_all_items {
            return;
        }

        let direction = self.appearance.direction;
        let visible_end = direction.main_offset(self.viewport.content_offset)
            + direction.main(self.viewport.size);
        let presented_end = direction.main(self.layout_content.content_size);

        // Page in the next window once the remaining runway shrinks below
        // one viewport.
        if visible_end < presented_end - direction.main(self.viewport.size) {
            return;
        }

        let Some(cursor) = self.slice.content.last_index_path() else {
            return;
        };

        if cursor <= self.window_cursor {
            return;
        }

        debug!("widening content window to {cursor:?}");
        self.window_cursor = cursor;
        self.apply_content();
    }

    /// Measures the content's natural size within `constraint` without
    /// touching this controller's live state.
    pub fn measured_content_size(
        &mut self,
        constraint: Size,
        content: &Content,
        item_limit: Option<usize>,
    ) -> Size {
        let content = match item_limit {
            Some(limit) => {
                let mut limited = content.clone();
                limited.paging_behavior = sectional_core::PagingBehavior::Paged { page_size: limit };
                limited.slice_to(IndexPath::ZERO).content
            }
            None => content.clone(),
        };

        let pending: PendingUpdates = Rc::new(RefCell::new(Vec::new()));
        let mut callbacks = UpdateCallbacks::new(ExecutionType::Queue);

        let mut state = presentation_state::from_content(&content, &pending, &mut callbacks);

        let mut layout_content = state.build_layout_content(
            self.appearance.direction,
            &self.host,
            &self.measurement_views,
        );

        let context = LayoutContext {
            viewport: Viewport::new(constraint),
            appearance: &self.appearance,
            behavior: &self.behavior,
        };
        self.layout_description.create().layout(&context, &mut layout_content);

        state.tear_down_all(&mut callbacks);
        callbacks.perform();

        layout_content.content_size
    }

    /// Selects the item at `index_path` per the behavior's selection mode.
    pub fn select_item(&mut self, index_path: IndexPath) {
        match self.behavior.selection_mode {
            SelectionMode::None => {}
            SelectionMode::Single => {
                for section in &mut self.state.sections {
                    for item in &mut section.items {
                        item.set_selected(false, self.scheduler.as_ref());
                    }
                }
                if let Some(item) = self.state.item_at_mut(index_path) {
                    item.set_selected(true, self.scheduler.as_ref());
                }
            }
            SelectionMode::Multiple => {
                if let Some(item) = self.state.item_at_mut(index_path) {
                    item.set_selected(true, self.scheduler.as_ref());
                }
            }
        }
    }

    pub fn deselect_item(&mut self, index_path: IndexPath) {
        if self.behavior.selection_mode == SelectionMode::None {
            return;
        }

        if let Some(item) = self.state.item_at_mut(index_path) {
            item.set_selected(false, self.scheduler.as_ref());
        }
    }

    /// The host bound `view` to `key` and is about to show it.
    pub fn will_display(&mut self, key: ElementKey, view: ViewHandle) {
        match key {
            ElementKey::Item(index_path) => {
                let Some(state) = self.state.item_at_mut(index_path) else {
                    return;
                };

                let item = state.item();
                {
                    let mut host = self.host.borrow_mut();
                    item.apply(host.view_mut(view), ApplyReason::WillDisplay);
                }
                state.will_display(view);
            }
            _ => {
                let Some(state) = self.state.header_footer_at_mut(key) else {
                    return;
                };

                let content = state.content();
                {
                    let mut host = self.host.borrow_mut();
                    content.apply(host.view_mut(view), ApplyReason::WillDisplay);
                }
                state.set_bound_view(Some(view));
            }
        }
    }

    /// The view bound to `key` scrolled out of the visible region.
    pub fn did_end_display(&mut self, key: ElementKey) {
        match key {
            ElementKey::Item(index_path) => {
                if let Some(state) = self.state.item_at_mut(index_path) {
                    state.did_end_display();
                }
            }
            _ => {
                if let Some(state) = self.state.header_footer_at_mut(key) {
                    state.set_bound_view(None);
                }
            }
        }
    }

    /// Scrolls so that the first item with `identifier` is visible.
    pub fn scroll_to(&mut self, identifier: &AnyIdentifier, animated: bool) -> bool {
        let Some(index_path) = self.state.index_path_for(identifier) else {
            return false;
        };

        let frame = self.layout_content.item(index_path).frame;
        let offset = match self.appearance.direction.is_vertical() {
            true => Point::new(0.0, frame.y),
            false => Point::new(frame.x, 0.0),
        };

        self.host.borrow_mut().scroll_to(offset, animated);
        true
    }

    /// Begins an interactive move of the item at `index_path`.
    ///
    /// Returns false when the item is not reorderable or another move is
    /// already in flight.
    pub fn begin_interactive_move(&mut self, index_path: IndexPath) -> bool {
        if self.reorder.is_some() {
            return false;
        }

        let Some(state) = self.state.item_at(index_path) else {
            return false;
        };
        if state.item().reordering().is_none() {
            return false;
        }

        self.reorder = Some(InProgressReorder::new(index_path));
        true
    }

    /// Proposes `to` as the moving item's new position.
    ///
    /// The item's `can_reorder_to` may veto, in which case the item stays
    /// where it is. Returns the item's actual position afterwards.
    pub fn update_interactive_move(&mut self, to: IndexPath) -> IndexPath {
        let Some(reorder) = self.reorder else {
            return to;
        };

        if to == reorder.current || !self.slice.content.contains(to) {
            return reorder.current;
        }

        let allowed = {
            let state = self
                .state
                .item_at(reorder.current)
                .unwrap_or_else(|| unreachable!("reorder tracks a live item"));

            match state.item().reordering().and_then(|r| r.can_reorder_to.clone()) {
                Some(veto) => veto(to),
                None => true,
            }
        };

        if !allowed {
            trace!("reorder to {to:?} vetoed");
            return reorder.current;
        }

        self.state.move_item(reorder.current, to);
        self.slice.content.move_item(reorder.current, to);
        self.layout_content.move_item(reorder.current, to);

        self.reorder = Some(InProgressReorder {
            from: reorder.from,
            current: to,
        });

        self.needed_layout.merge(NeededLayout::Rebuild);
        self.perform_layout();
        self.push_geometry();

        to
    }

    /// Commits the in-flight move, firing exactly one reorder result.
    pub fn end_interactive_move(&mut self) -> Option<ReorderResult> {
        let reorder = self.reorder.take()?;

        if reorder.is_no_op() {
            return None;
        }

        let result = ReorderResult {
            from: reorder.from,
            to: reorder.current,
        };

        // The sliced window shares its leading order with the full
        // content, so the same move applies to both.
        self.content.move_item(result.from, result.to);

        if let Some(state) = self.state.item_at(result.to) {
            if let Some(on_was_reordered) = state.item().callbacks().on_was_reordered.clone() {
                on_was_reordered(&result);
            }
        }

        if let Some(section) = self.state.sections.get(result.to.section) {
            if let Some(on_item_reordered) = section.callbacks.on_item_reordered.clone() {
                on_item_reordered(&result);
            }
        }

        Some(result)
    }

    /// Interactive moves cannot be rolled back; the layout has already
    /// been live-updated around the moving item.
    pub fn cancel_interactive_move(&mut self) -> ! {
        panic!(
            "Cancelling an in-progress interactive move is not supported. \
             End the move instead; the content order has already been updated live."
        );
    }
}
