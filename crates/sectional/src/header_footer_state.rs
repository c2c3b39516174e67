//! State behind one header/footer slot.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use sectional_core::{AnyHeaderFooterRef, HeaderFooterLayouts, Size, SizeKey, ViewHandle};

/// One slot's live state: the current content, its memoized sizes, and the
/// bound view while visible.
///
/// Slots have no diffable identity; when new content is not equivalent to
/// the old, the content is swapped wholesale and the sizes are dropped.
pub struct HeaderFooterState {
    current: Rc<RefCell<AnyHeaderFooterRef>>,
    sizes: Rc<RefCell<FxHashMap<SizeKey, Size>>>,
    bound_view: Option<ViewHandle>,
}

impl HeaderFooterState {
    pub fn new(content: AnyHeaderFooterRef) -> Self {
        Self {
            current: Rc::new(RefCell::new(content)),
            sizes: Rc::new(RefCell::new(FxHashMap::default())),
            bound_view: None,
        }
    }

    pub fn content(&self) -> AnyHeaderFooterRef {
        self.current.borrow().clone()
    }

    pub fn layouts(&self) -> HeaderFooterLayouts {
        self.current.borrow().layouts()
    }

    pub fn bound_view(&self) -> Option<ViewHandle> {
        self.bound_view
    }

    pub fn set_bound_view(&mut self, view: Option<ViewHandle>) {
        self.bound_view = view;
    }

    pub(crate) fn current_handle(&self) -> Rc<RefCell<AnyHeaderFooterRef>> {
        self.current.clone()
    }

    pub(crate) fn sizes_handle(&self) -> Rc<RefCell<FxHashMap<SizeKey, Size>>> {
        self.sizes.clone()
    }

    /// Adopts new content; returns whether the visual representation
    /// changed (and the size cache was dropped).
    pub fn update(&mut self, new: AnyHeaderFooterRef) -> bool {
        let changed = !self.current.borrow().any_is_equivalent(new.as_ref());

        if changed {
            self.sizes.borrow_mut().clear();
        }

        *self.current.borrow_mut() = new;

        changed
    }

    pub(crate) fn clear_cached_sizes(&mut self) {
        self.sizes.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    use sectional_core::{ApplyReason, HeaderFooter, HeaderFooterContent, MeasureInfo};
    use sectional_core::{LayoutDirection, Sizing};

    struct Title(&'static str);

    impl HeaderFooterContent for Title {
        fn is_equivalent(&self, other: &Self) -> bool {
            self.0 == other.0
        }

        fn apply(&self, _view: &mut dyn Any, _reason: ApplyReason) {}
    }

    #[test]
    fn test_update_drops_sizes_only_on_change() {
        let mut state = HeaderFooterState::new(HeaderFooter::new(Title("a")).into_any());

        let info = MeasureInfo {
            size_constraint: Size::new(100.0, 100.0),
            default_size: Size::new(100.0, 40.0),
            direction: LayoutDirection::Vertical,
        };
        let key = SizeKey::new(&info, Sizing::Default);
        state.sizes_handle().borrow_mut().insert(key, Size::new(100.0, 40.0));

        assert!(!state.update(HeaderFooter::new(Title("a")).into_any()));
        assert!(state.sizes_handle().borrow().contains_key(&key));

        assert!(state.update(HeaderFooter::new(Title("b")).into_any()));
        assert!(state.sizes_handle().borrow().is_empty());
    }
}
