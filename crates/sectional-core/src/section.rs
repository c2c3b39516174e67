//! Sections: an identified run of items with optional header and footer.

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::header_footer::AnyHeaderFooterRef;
use crate::identifier::AnyIdentifier;
use crate::item::{AnyItemRef, Item, ItemContent, ReorderResult};
use crate::width::CustomWidth;

/// Number of columns items wrap into, and the spacing between them.
///
/// `count == 1` is the plain single-column list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Columns {
    pub count: usize,
    pub spacing: f32,
}

impl Columns {
    pub const ONE: Columns = Columns {
        count: 1,
        spacing: 0.0,
    };

    pub fn new(count: usize, spacing: f32) -> Self {
        assert!(count >= 1, "A section must have at least one column.");

        Self { count, spacing }
    }
}

impl Default for Columns {
    fn default() -> Self {
        Self::ONE
    }
}

/// Per-section layout attributes layered over the list defaults.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SectionLayouts {
    pub width: CustomWidth,
    pub columns: Columns,
}

/// Hooks a section registers for list-driven events.
#[derive(Clone, Default)]
pub struct SectionCallbacks {
    /// Fired when an interactive move of one of this section's items
    /// completes, after the item's own callback.
    pub on_item_reordered: Option<Rc<dyn Fn(&ReorderResult)>>,
}

/// One identified run of items, with optional header and footer.
#[derive(Clone)]
pub struct Section {
    identifier: AnyIdentifier,

    pub header: Option<AnyHeaderFooterRef>,
    pub footer: Option<AnyHeaderFooterRef>,
    pub items: Vec<AnyItemRef>,

    pub layouts: SectionLayouts,
    pub callbacks: SectionCallbacks,
}

impl Section {
    /// Creates an empty section identified by `value`.
    ///
    /// The identity is scoped to `Section` itself; use
    /// [`Section::new_for`] to scope it to a caller type instead.
    pub fn new<V>(value: V) -> Self
    where
        V: Hash + Eq + fmt::Debug + 'static,
    {
        Self::with_identifier(AnyIdentifier::new::<Section, _>(value))
    }

    /// Creates an empty section whose identity is scoped to the content
    /// type `C`, so sections built by different features never collide.
    pub fn new_for<C: 'static, V>(value: V) -> Self
    where
        V: Hash + Eq + fmt::Debug + 'static,
    {
        Self::with_identifier(AnyIdentifier::new::<C, _>(value))
    }

    fn with_identifier(identifier: AnyIdentifier) -> Self {
        Self {
            identifier,
            header: None,
            footer: None,
            items: Vec::new(),
            layouts: SectionLayouts::default(),
            callbacks: SectionCallbacks::default(),
        }
    }

    /// Creates a section, configured via the provided builder closure.
    pub fn with<V>(value: V, configure: impl FnOnce(&mut Self)) -> Self
    where
        V: Hash + Eq + fmt::Debug + 'static,
    {
        let mut section = Self::new(value);
        configure(&mut section);
        section
    }

    pub fn identifier(&self) -> &AnyIdentifier {
        &self.identifier
    }

    /// Appends one erased item.
    pub fn add_any(&mut self, item: AnyItemRef) {
        self.items.push(item);
    }

    /// Appends one item built from `content` with its default attributes.
    pub fn add<C: ItemContent>(&mut self, content: C) {
        self.add_any(Item::new(content).into_any());
    }

    /// Appends a fully configured item.
    pub fn add_item<C: ItemContent>(&mut self, item: Item<C>) {
        self.add_any(item.into_any());
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// A copy containing only the first `limit` items.
    pub(crate) fn up_to(&self, limit: usize) -> Section {
        let mut truncated = self.clone();
        truncated.items.truncate(limit);
        truncated
    }
}

impl<C: ItemContent> std::ops::AddAssign<Item<C>> for Section {
    fn add_assign(&mut self, item: Item<C>) {
        self.add_item(item);
    }
}

impl std::ops::AddAssign<AnyItemRef> for Section {
    fn add_assign(&mut self, item: AnyItemRef) {
        self.add_any(item);
    }
}

impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("identifier", &self.identifier)
            .field("items", &self.items.len())
            .field("header", &self.header.is_some())
            .field("footer", &self.footer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    use crate::item::ApplyReason;

    struct Row(u32);

    impl ItemContent for Row {
        type Identifier = u32;

        fn identifier(&self) -> u32 {
            self.0
        }

        fn is_equivalent(&self, other: &Self) -> bool {
            self.0 == other.0
        }

        fn apply(&self, _view: &mut dyn Any, _reason: ApplyReason) {}
    }

    #[test]
    fn test_identity_scoping() {
        struct FeatureA;
        struct FeatureB;

        let plain = Section::new("s");
        let a = Section::new_for::<FeatureA, _>("s");
        let b = Section::new_for::<FeatureB, _>("s");

        assert_ne!(plain.identifier(), a.identifier());
        assert_ne!(a.identifier(), b.identifier());
        assert_eq!(a.identifier(), Section::new_for::<FeatureA, _>("s").identifier());
    }

    #[test]
    fn test_up_to_truncates() {
        let section = Section::with("s", |section| {
            for id in 0..5 {
                section.add(Row(id));
            }
        });

        assert_eq!(section.up_to(2).len(), 2);
        assert_eq!(section.up_to(10).len(), 5);
        assert_eq!(section.up_to(0).len(), 0);
    }

    #[test]
    #[should_panic(expected = "at least one column")]
    fn test_zero_columns_rejected() {
        let _ = Columns::new(0, 10.0);
    }
}
