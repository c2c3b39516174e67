//! The long-lived state object behind one item identity.

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;
use rustc_hash::FxHashMap;

use sectional_core::{
    AnyIdentifier, AnyItemRef, CoordinatorActions, DisplayInfo, EndDisplayInfo, ItemCoordinator,
    ItemLayouts, Size, SizeKey, Sizing, UpdateCallbacks, ViewHandle,
};

use crate::host::Scheduler;

/// Why an item's content is being replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemUpdateReason {
    /// The caller supplied new content for this identity.
    UpdateFromList,
    /// The item's own coordinator pushed a change.
    UpdateFromItemCoordinator,
    /// Content identical, but the item's position changed.
    Move,
    NoChange,
}

/// A content change pushed by a coordinator, queued until the enclosing
/// update pass commits.
pub struct PendingCoordinatorUpdate {
    pub identifier: AnyIdentifier,
    pub item: AnyItemRef,
    pub animated: bool,
}

pub type PendingUpdates = Rc<RefCell<Vec<PendingCoordinatorUpdate>>>;

/// Lives from the first time an identity appears until it disappears.
/// Owns the identity's coordinator, memoized sizes, and display state;
/// content updates mutate it in place.
pub struct ItemState {
    current: Rc<RefCell<AnyItemRef>>,
    sizes: Rc<RefCell<FxHashMap<SizeKey, Size>>>,

    coordinator: Option<Box<dyn ItemCoordinator>>,

    bound_view: Option<ViewHandle>,
    has_displayed: bool,
    has_ended_display: bool,
    is_selected: bool,
}

impl ItemState {
    /// Creates the state for a newly appearing identity, constructing its
    /// coordinator.
    ///
    /// Updates the coordinator pushes during its own construction land
    /// directly in the current value; once construction finishes, the
    /// update sink is rewired to queue into `pending` instead.
    pub fn new(
        item: AnyItemRef,
        pending: &PendingUpdates,
        callbacks: &mut UpdateCallbacks,
    ) -> Self {
        let is_selected = item.selection_style().is_selected();
        let current = Rc::new(RefCell::new(item));

        let actions = {
            let read = current.clone();
            let write = current.clone();
            CoordinatorActions::new(
                move || read.borrow().clone(),
                move |new, _animated| *write.borrow_mut() = new,
            )
        };

        let mut coordinator = {
            let item = current.borrow().clone();
            item.make_coordinator(actions.clone())
        };

        let identifier = current.borrow().identifier().clone();
        trace!("item state created for {identifier:?}");

        {
            let queue = pending.clone();
            actions.set_update(move |item, animated| {
                queue.borrow_mut().push(PendingCoordinatorUpdate {
                    identifier: identifier.clone(),
                    item,
                    animated,
                });
            });
        }

        if let Some(coordinator) = coordinator.as_mut() {
            coordinator.was_created();
        }

        if let Some(on_insert) = current.borrow().callbacks().on_insert.clone() {
            callbacks.add(move || on_insert());
        }

        Self {
            current,
            sizes: Rc::new(RefCell::new(FxHashMap::default())),
            coordinator,
            bound_view: None,
            has_displayed: false,
            has_ended_display: false,
            is_selected,
        }
    }

    pub fn identifier(&self) -> AnyIdentifier {
        self.current.borrow().identifier().clone()
    }

    pub fn item(&self) -> AnyItemRef {
        self.current.borrow().clone()
    }

    pub fn layouts(&self) -> ItemLayouts {
        *self.current.borrow().layouts()
    }

    pub fn sizing(&self) -> Sizing {
        self.current.borrow().sizing()
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn bound_view(&self) -> Option<ViewHandle> {
        self.bound_view
    }

    pub(crate) fn current_handle(&self) -> Rc<RefCell<AnyItemRef>> {
        self.current.clone()
    }

    pub(crate) fn sizes_handle(&self) -> Rc<RefCell<FxHashMap<SizeKey, Size>>> {
        self.sizes.clone()
    }

    /// Replaces the content for this identity with what the list supplied.
    ///
    /// Panics if `new` carries a different identity; an identity must never
    /// change across an in-place update, as silently accepting it would
    /// desynchronize every structure keyed on it.
    pub fn update(
        &mut self,
        new: AnyItemRef,
        position_changed: bool,
        callbacks: &mut UpdateCallbacks,
    ) -> ItemUpdateReason {
        let old = self.current.borrow().clone();

        if old.identifier() != new.identifier() {
            panic!(
                "Identity changed during an in-place update: {:?} became {:?}. An item's \
                 identity must be stable for the lifetime of its state.",
                old.identifier(),
                new.identifier(),
            );
        }

        let equivalent = old.any_is_equivalent(new.as_ref());

        let reason = if !equivalent {
            ItemUpdateReason::UpdateFromList
        } else if position_changed {
            ItemUpdateReason::Move
        } else {
            ItemUpdateReason::NoChange
        };

        *self.current.borrow_mut() = new.clone();
        self.is_selected = new.selection_style().is_selected();

        if reason != ItemUpdateReason::NoChange {
            self.sizes.borrow_mut().clear();

            if let Some(coordinator) = self.coordinator.as_mut() {
                coordinator.was_updated(old.as_ref(), new.as_ref());
            }
        }

        match reason {
            ItemUpdateReason::UpdateFromList => {
                if let Some(on_update) = new.callbacks().on_update.clone() {
                    callbacks.add(move || on_update());
                }
            }
            ItemUpdateReason::Move => {
                if let Some(on_move) = new.callbacks().on_move.clone() {
                    callbacks.add(move || on_move());
                }
            }
            _ => {}
        }

        reason
    }

    /// Applies a content change the coordinator pushed for this identity.
    ///
    /// The coordinator initiated the change, so its `was_updated` hook is
    /// not re-notified.
    pub fn apply_coordinator_update(&mut self, new: AnyItemRef, callbacks: &mut UpdateCallbacks) {
        let old = self.current.borrow().clone();

        if old.identifier() != new.identifier() {
            panic!(
                "A coordinator update changed its item's identity: {:?} became {:?}.",
                old.identifier(),
                new.identifier(),
            );
        }

        if !old.any_is_equivalent(new.as_ref()) {
            self.sizes.borrow_mut().clear();
        }

        *self.current.borrow_mut() = new.clone();

        if let Some(on_update) = new.callbacks().on_update.clone() {
            callbacks.add(move || on_update());
        }
    }

    /// A view becomes visible for this item.
    pub fn will_display(&mut self, view: ViewHandle) {
        let is_first_display = !self.has_displayed;
        self.has_displayed = true;
        self.bound_view = Some(view);

        if let Some(coordinator) = self.coordinator.as_mut() {
            coordinator.will_display(view);
        }

        if let Some(on_display) = self.current.borrow().callbacks().on_display.clone() {
            on_display(&DisplayInfo { is_first_display });
        }
    }

    /// The item's view scrolled out of the visible region.
    pub fn did_end_display(&mut self) {
        if self.bound_view.take().is_none() {
            return;
        }

        let is_first_end_display = !self.has_ended_display;
        self.has_ended_display = true;

        if let Some(coordinator) = self.coordinator.as_mut() {
            coordinator.did_end_display();
        }

        if let Some(on_end_display) = self.current.borrow().callbacks().on_end_display.clone() {
            on_end_display(&EndDisplayInfo { is_first_end_display });
        }
    }

    /// Changes selection, deferring the caller's callback by one scheduler
    /// tick so platform highlight animations are never blocked.
    pub fn set_selected(&mut self, selected: bool, scheduler: &dyn Scheduler) {
        if self.is_selected == selected {
            return;
        }

        self.is_selected = selected;

        let item = self.current.borrow().clone();

        if selected {
            if let Some(coordinator) = self.coordinator.as_mut() {
                coordinator.was_selected();
            }
            if let Some(on_select) = item.callbacks().on_select.clone() {
                scheduler.schedule(Box::new(move || on_select()));
            }
        } else {
            if let Some(coordinator) = self.coordinator.as_mut() {
                coordinator.was_deselected();
            }
            if let Some(on_deselect) = item.callbacks().on_deselect.clone() {
                scheduler.schedule(Box::new(move || on_deselect()));
            }
        }
    }

    /// The identity disappeared; this state is about to be discarded.
    pub fn tear_down(&mut self, callbacks: &mut UpdateCallbacks) {
        trace!("item state removed for {:?}", self.identifier());

        self.did_end_display();

        if let Some(coordinator) = self.coordinator.as_mut() {
            coordinator.was_removed();
        }

        if let Some(on_remove) = self.current.borrow().callbacks().on_remove.clone() {
            callbacks.add(move || on_remove());
        }
    }
}
