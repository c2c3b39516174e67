//! Items: caller content plus identity, sizing, and lifecycle callbacks.
//!
//! Content types implement [`ItemContent`], a closed capability surface:
//! identity, equivalence, content application, and an optional coordinator
//! factory. [`Item`] wraps one content value with list-level attributes and
//! is erased behind [`AnyItem`] for storage inside [`crate::Section`]s.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::element::ViewHandle;
use crate::identifier::{AnyIdentifier, ReuseKey};
use crate::index_path::IndexPath;
use crate::sizing::Sizing;
use crate::width::CustomWidth;

/// Why content is being applied to a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyReason {
    /// The view is about to become visible.
    WillDisplay,
    /// The view is already visible and the content changed.
    WasUpdated,
    /// The view is a pooled throwaway used only to measure.
    Measurement,
}

/// Caller-supplied item content.
///
/// `identifier()` must be stable: calling it twice on equivalent content
/// must produce equal values. Instability corrupts identity-based diffing
/// and is flagged as a panic in debug builds when the item is constructed.
pub trait ItemContent: 'static {
    type Identifier: Hash + Eq + Clone + fmt::Debug + 'static;

    /// The stable identity of this content.
    fn identifier(&self) -> Self::Identifier;

    /// Whether the visual representation is unchanged from `other`.
    ///
    /// Drives size-cache invalidation and whether an update animates as a
    /// change or applies silently.
    fn is_equivalent(&self, other: &Self) -> bool;

    /// Whether a position change should animate as a move.
    fn was_moved(&self, other: &Self) -> bool {
        !self.is_equivalent(other)
    }

    /// Pushes this content into a platform view.
    ///
    /// `view` is the platform's view object for this content's reuse key;
    /// implementations downcast to their concrete view type.
    fn apply(&self, view: &mut dyn Any, reason: ApplyReason);

    /// Creates the long-lived coordinator for this content's identity.
    ///
    /// Called once, when the identity first appears. The same coordinator
    /// then survives every content update of that identity.
    fn make_coordinator(&self, actions: CoordinatorActions) -> Option<Box<dyn ItemCoordinator>> {
        let _ = actions;
        None
    }

    /// Default sizing when the `Item` does not specify one.
    fn default_sizing(&self) -> Option<Sizing> {
        None
    }

    /// Default selection style when the `Item` does not specify one.
    fn default_selection_style(&self) -> Option<SelectionStyle> {
        None
    }
}

/// A long-lived object owned by one item identity.
///
/// Survives content updates of the same identity and receives lifecycle
/// notifications from the presentation state.
pub trait ItemCoordinator {
    fn was_created(&mut self) {}

    fn was_updated(&mut self, old: &dyn AnyItem, new: &dyn AnyItem) {
        let _ = (old, new);
    }

    fn was_removed(&mut self) {}

    fn was_selected(&mut self) {}
    fn was_deselected(&mut self) {}

    fn will_display(&mut self, view: ViewHandle) {
        let _ = view;
    }

    fn did_end_display(&mut self) {}
}

type CurrentFn = Box<dyn Fn() -> AnyItemRef>;
type UpdateFn = Box<dyn FnMut(AnyItemRef, bool)>;

/// The channel through which a coordinator reads and mutates its item.
///
/// `update` is re-entrant safe: updates pushed while the coordinator is
/// still being constructed are captured into the pending model and merged
/// before the state object is returned; later updates are queued by the
/// presentation layer and flushed after the enclosing pass commits.
#[derive(Clone)]
pub struct CoordinatorActions {
    inner: Rc<RefCell<ActionsInner>>,
}

struct ActionsInner {
    current: CurrentFn,
    update: UpdateFn,
}

impl CoordinatorActions {
    pub fn new(
        current: impl Fn() -> AnyItemRef + 'static,
        update: impl FnMut(AnyItemRef, bool) + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ActionsInner {
                current: Box::new(current),
                update: Box::new(update),
            })),
        }
    }

    /// The current item value for this identity.
    pub fn current(&self) -> AnyItemRef {
        (self.inner.borrow().current)()
    }

    /// Pushes a new item value for this identity back into the list.
    pub fn update(&self, new: AnyItemRef, animated: bool) {
        let update = &mut self.inner.borrow_mut().update;
        update(new, animated);
    }

    /// Rewires the update sink. Used by the presentation layer once the
    /// state object owning this identity is fully constructed.
    pub fn set_update(&self, update: impl FnMut(AnyItemRef, bool) + 'static) {
        self.inner.borrow_mut().update = Box::new(update);
    }
}

/// Whether and how an item responds to selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SelectionStyle {
    #[default]
    NotSelectable,
    /// Highlights while pressed, but never stays selected.
    Tappable,
    /// Participates in persistent selection.
    Selectable { is_selected: bool },
}

impl SelectionStyle {
    pub fn is_selected(&self) -> bool {
        matches!(self, SelectionStyle::Selectable { is_selected: true })
    }
}

/// Per-item layout attributes layered over the section and list defaults.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ItemLayouts {
    pub width: CustomWidth,
    /// Spacing to the next item, overriding the appearance's item spacing.
    pub item_spacing: Option<f32>,
}

/// Swipe actions registered alongside an item's content.
#[derive(Clone)]
pub struct SwipeActions {
    pub actions: Vec<SwipeAction>,
}

#[derive(Clone)]
pub struct SwipeAction {
    pub title: String,
    pub is_destructive: bool,
    pub handler: Rc<dyn Fn()>,
}

/// Opts an item into interactive reordering.
#[derive(Clone, Default)]
pub struct ItemReordering {
    /// Veto for a proposed destination. `None` allows all destinations.
    pub can_reorder_to: Option<Rc<dyn Fn(IndexPath) -> bool>>,
}

/// The source and destination of one completed interactive move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReorderResult {
    pub from: IndexPath,
    pub to: IndexPath,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayInfo {
    pub is_first_display: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndDisplayInfo {
    pub is_first_end_display: bool,
}

/// Caller lifecycle hooks carried on an item.
#[derive(Clone, Default)]
pub struct ItemCallbacks {
    pub on_display: Option<Rc<dyn Fn(&DisplayInfo)>>,
    pub on_end_display: Option<Rc<dyn Fn(&EndDisplayInfo)>>,

    pub on_select: Option<Rc<dyn Fn()>>,
    pub on_deselect: Option<Rc<dyn Fn()>>,

    pub on_insert: Option<Rc<dyn Fn()>>,
    pub on_remove: Option<Rc<dyn Fn()>>,
    pub on_move: Option<Rc<dyn Fn()>>,
    pub on_update: Option<Rc<dyn Fn()>>,

    pub on_was_reordered: Option<Rc<dyn Fn(&ReorderResult)>>,
}

/// One item of content within a section.
#[derive(Clone)]
pub struct Item<C: ItemContent> {
    pub content: C,

    pub sizing: Sizing,
    pub layouts: ItemLayouts,
    pub selection_style: SelectionStyle,
    pub swipe_actions: Option<SwipeActions>,
    pub reordering: Option<ItemReordering>,
    pub callbacks: ItemCallbacks,

    identifier: AnyIdentifier,
    reuse_key: ReuseKey,
}

impl<C: ItemContent> Item<C> {
    pub fn new(content: C) -> Self {
        let identifier = AnyIdentifier::new::<C, _>(content.identifier());

        #[cfg(debug_assertions)]
        {
            let second = AnyIdentifier::new::<C, _>(content.identifier());
            if identifier != second {
                panic!(
                    "`{}::identifier()` is not stable: when requested twice, the value changed \
                     from {:?} to {:?}. Identity must be stable for updates to correlate content \
                     correctly.",
                    std::any::type_name::<C>(),
                    identifier,
                    second,
                );
            }
        }

        let sizing = content
            .default_sizing()
            .unwrap_or(Sizing::ThatFits(crate::sizing::Constraint::NONE));
        let selection_style = content.default_selection_style().unwrap_or_default();

        Self {
            content,
            sizing,
            layouts: ItemLayouts::default(),
            selection_style,
            swipe_actions: None,
            reordering: None,
            callbacks: ItemCallbacks::default(),
            identifier,
            reuse_key: ReuseKey::of::<C>(),
        }
    }

    /// Creates an item, configured via the provided builder closure.
    pub fn with(content: C, configure: impl FnOnce(&mut Self)) -> Self {
        let mut item = Self::new(content);
        configure(&mut item);
        item
    }

    pub fn with_sizing(content: C, sizing: Sizing) -> Self {
        Self::with(content, |item| item.sizing = sizing)
    }

    pub fn identifier(&self) -> &AnyIdentifier {
        &self.identifier
    }

    /// Erases this item for storage in a [`crate::Section`].
    pub fn into_any(self) -> AnyItemRef {
        Rc::new(self)
    }
}

/// The erased capability surface of an [`Item`].
pub trait AnyItem {
    fn identifier(&self) -> &AnyIdentifier;
    fn reuse_key(&self) -> ReuseKey;

    fn sizing(&self) -> Sizing;
    fn layouts(&self) -> &ItemLayouts;
    fn selection_style(&self) -> SelectionStyle;
    fn has_swipe_actions(&self) -> bool;
    fn reordering(&self) -> Option<&ItemReordering>;
    fn callbacks(&self) -> &ItemCallbacks;

    fn as_any(&self) -> &dyn Any;

    /// Whether the visual representation matches `other`'s.
    ///
    /// Items of different content types are never equivalent.
    fn any_is_equivalent(&self, other: &dyn AnyItem) -> bool;

    /// Whether a reposition relative to `other` should animate as a move.
    fn any_was_moved(&self, other: &dyn AnyItem) -> bool;

    fn apply(&self, view: &mut dyn Any, reason: ApplyReason);

    fn make_coordinator(&self, actions: CoordinatorActions) -> Option<Box<dyn ItemCoordinator>>;
}

pub type AnyItemRef = Rc<dyn AnyItem>;

impl<C: ItemContent> AnyItem for Item<C> {
    fn identifier(&self) -> &AnyIdentifier {
        &self.identifier
    }

    fn reuse_key(&self) -> ReuseKey {
        self.reuse_key
    }

    fn sizing(&self) -> Sizing {
        self.sizing
    }

    fn layouts(&self) -> &ItemLayouts {
        &self.layouts
    }

    fn selection_style(&self) -> SelectionStyle {
        self.selection_style
    }

    fn has_swipe_actions(&self) -> bool {
        self.swipe_actions.is_some()
    }

    fn reordering(&self) -> Option<&ItemReordering> {
        self.reordering.as_ref()
    }

    fn callbacks(&self) -> &ItemCallbacks {
        &self.callbacks
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn any_is_equivalent(&self, other: &dyn AnyItem) -> bool {
        match other.as_any().downcast_ref::<Item<C>>() {
            Some(other) => self.content.is_equivalent(&other.content),
            None => false,
        }
    }

    fn any_was_moved(&self, other: &dyn AnyItem) -> bool {
        match other.as_any().downcast_ref::<Item<C>>() {
            Some(other) => self.content.was_moved(&other.content),
            None => true,
        }
    }

    fn apply(&self, view: &mut dyn Any, reason: ApplyReason) {
        self.content.apply(view, reason);
    }

    fn make_coordinator(&self, actions: CoordinatorActions) -> Option<Box<dyn ItemCoordinator>> {
        self.content.make_coordinator(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct TestContent {
        id: u32,
        value: String,
    }

    impl ItemContent for TestContent {
        type Identifier = u32;

        fn identifier(&self) -> u32 {
            self.id
        }

        fn is_equivalent(&self, other: &Self) -> bool {
            self.value == other.value
        }

        fn apply(&self, _view: &mut dyn Any, _reason: ApplyReason) {}
    }

    thread_local! {
        static NEXT_UNSTABLE_ID: Cell<u32> = const { Cell::new(0) };
    }

    struct UnstableContent;

    impl ItemContent for UnstableContent {
        type Identifier = u32;

        fn identifier(&self) -> u32 {
            // Deliberately different on every read.
            NEXT_UNSTABLE_ID.with(|next| {
                let id = next.get();
                next.set(id + 1);
                id
            })
        }

        fn is_equivalent(&self, _other: &Self) -> bool {
            true
        }

        fn apply(&self, _view: &mut dyn Any, _reason: ApplyReason) {}
    }

    #[test]
    fn test_identifier_captured_once_is_stable() {
        let a = Item::new(TestContent {
            id: 1,
            value: "a".into(),
        });
        let b = Item::new(TestContent {
            id: 1,
            value: "b".into(),
        });

        assert_eq!(a.identifier(), b.identifier());
        assert!(!a.any_is_equivalent(&b));
    }

    #[test]
    #[should_panic(expected = "is not stable")]
    fn test_unstable_identifier_panics() {
        let _ = Item::new(UnstableContent);
    }

    #[test]
    fn test_cross_type_items_never_equivalent() {
        struct OtherContent;

        impl ItemContent for OtherContent {
            type Identifier = u32;

            fn identifier(&self) -> u32 {
                1
            }

            fn is_equivalent(&self, _other: &Self) -> bool {
                true
            }

            fn apply(&self, _view: &mut dyn Any, _reason: ApplyReason) {}
        }

        let a = Item::new(TestContent {
            id: 1,
            value: "a".into(),
        });
        let b = Item::new(OtherContent);

        assert!(!a.any_is_equivalent(&b));
        assert!(a.any_was_moved(&b));
        assert_ne!(a.identifier(), b.identifier());
    }
}
