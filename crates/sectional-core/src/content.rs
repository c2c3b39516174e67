//! The root content value describing one full list.

use std::fmt;
use std::hash::Hash;

use crate::header_footer::AnyHeaderFooterRef;
use crate::identifier::AnyIdentifier;
use crate::index_path::IndexPath;
use crate::item::AnyItemRef;
use crate::section::Section;

/// How much of the content is measured and laid out at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagingBehavior {
    /// Only a window of items past the furthest visible index path is laid
    /// out; more is paged in as the user scrolls. Avoids measuring tens of
    /// thousands of off-screen items up front.
    Paged { page_size: usize },

    /// All items are laid out regardless of visibility.
    IncludeAllContent,
}

impl PagingBehavior {
    pub const DEFAULT_PAGE_SIZE: usize = 250;
}

impl Default for PagingBehavior {
    fn default() -> Self {
        PagingBehavior::Paged {
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// A kind of element the content may carry, for [`Content::contains_any`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentFilter {
    ListHeader,
    ListFooter,
    OverscrollFooter,
    Sections,
    Items,
}

/// The full description of a list: sections plus list-level chrome.
#[derive(Clone, Default)]
pub struct Content {
    /// Optional identity for the content as a whole. Two contents with
    /// different identifiers are treated as unrelated and never diffed
    /// against each other item by item.
    pub identifier: Option<AnyIdentifier>,

    pub paging_behavior: PagingBehavior,

    pub header: Option<AnyHeaderFooterRef>,
    pub footer: Option<AnyHeaderFooterRef>,

    /// Shown past the end of the content while the user overscrolls.
    pub overscroll_footer: Option<AnyHeaderFooterRef>,

    pub sections: Vec<Section>,
}

impl Content {
    pub fn new(configure: impl FnOnce(&mut Self)) -> Self {
        let mut content = Self::default();
        configure(&mut content);
        content
    }

    pub fn identified_by<C: 'static, V>(mut self, value: V) -> Self
    where
        V: Hash + Eq + Clone + fmt::Debug + 'static,
    {
        self.identifier = Some(AnyIdentifier::new::<C, _>(value));
        self
    }

    pub fn add(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Section::is_empty)
    }

    /// Total number of items across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// Sections with at least one item.
    pub fn non_empty_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|section| !section.is_empty())
    }

    /// Whether `index_path` refers to an existing item.
    pub fn contains(&self, index_path: IndexPath) -> bool {
        self.sections
            .get(index_path.section)
            .is_some_and(|section| index_path.item < section.len())
    }

    /// The item at `index_path`.
    ///
    /// Panics when out of bounds; check with [`Content::contains`] first.
    pub fn item(&self, index_path: IndexPath) -> &AnyItemRef {
        &self.sections[index_path.section].items[index_path.item]
    }

    /// The first item in the content, if any.
    pub fn first_item(&self) -> Option<&AnyItemRef> {
        self.non_empty_sections()
            .next()
            .and_then(|section| section.items.first())
    }

    /// The last item in the content, if any.
    pub fn last_item(&self) -> Option<&AnyItemRef> {
        self.last_index_path().map(|path| self.item(path))
    }

    /// Whether the content has any element of the given kinds.
    pub fn contains_any(&self, filters: &[ContentFilter]) -> bool {
        filters.iter().any(|filter| match filter {
            ContentFilter::ListHeader => self.header.is_some(),
            ContentFilter::ListFooter => self.footer.is_some(),
            ContentFilter::OverscrollFooter => self.overscroll_footer.is_some(),
            ContentFilter::Sections => !self.sections.is_empty(),
            ContentFilter::Items => !self.is_empty(),
        })
    }

    /// The index path of the first item whose identity equals `identifier`.
    pub fn first_index_path(&self, identifier: &AnyIdentifier) -> Option<IndexPath> {
        for (section_index, section) in self.sections.iter().enumerate() {
            for (item_index, item) in section.items.iter().enumerate() {
                if item.identifier() == identifier {
                    return Some(IndexPath::new(section_index, item_index));
                }
            }
        }

        None
    }

    /// The index path of the last item in the content, if any.
    pub fn last_index_path(&self) -> Option<IndexPath> {
        self.sections
            .iter()
            .enumerate()
            .rev()
            .find(|(_, section)| !section.is_empty())
            .map(|(section_index, section)| IndexPath::new(section_index, section.len() - 1))
    }

    /// Moves the item at `from` so it ends up at `to`.
    ///
    /// Panics when either index path is out of bounds.
    pub fn move_item(&mut self, from: IndexPath, to: IndexPath) {
        if from == to {
            return;
        }

        let item = self.sections[from.section].items.remove(from.item);
        self.sections[to.section].items.insert(to.item, item);
    }

    /// Drops sections with no items.
    pub fn remove_empty_sections(&mut self) {
        self.sections.retain(|section| !section.is_empty());
    }

    /// A bounded copy for layout, windowed past `index_path` according to
    /// the paging behavior.
    ///
    /// Sections before `index_path.section` are kept whole. From that
    /// section on, a budget of `index_path.item + page_size` items is spent
    /// in order; a section reached with no budget left is dropped, and the
    /// section that exhausts the budget keeps only its leading items.
    pub fn slice_to(&self, index_path: IndexPath) -> ContentSlice {
        let page_size = match self.paging_behavior {
            PagingBehavior::Paged { page_size } => page_size,
            PagingBehavior::IncludeAllContent => {
                return ContentSlice {
                    contains_all_items: true,
                    content: self.clone(),
                };
            }
        };

        let mut sliced = self.clone();
        let mut remaining = index_path.item + page_size;

        sliced.sections = self
            .sections
            .iter()
            .enumerate()
            .filter_map(|(section_index, section)| {
                if section_index < index_path.section {
                    Some(section.clone())
                } else if remaining == 0 {
                    None
                } else {
                    let truncated = section.up_to(remaining);
                    remaining -= truncated.len();
                    Some(truncated)
                }
            })
            .collect();

        let slice = ContentSlice {
            contains_all_items: sliced.item_count() == self.item_count(),
            content: sliced,
        };

        log::trace!(
            "sliced content to {index_path:?}: {} of {} items",
            slice.content.item_count(),
            self.item_count(),
        );

        slice
    }
}

impl std::ops::AddAssign<Section> for Content {
    fn add_assign(&mut self, section: Section) {
        self.add(section);
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Content")
            .field("sections", &self.sections)
            .field("header", &self.header.is_some())
            .field("footer", &self.footer.is_some())
            .field("overscroll_footer", &self.overscroll_footer.is_some())
            .finish()
    }
}

/// The result of windowing a [`Content`] via [`Content::slice_to`].
#[derive(Clone, Debug)]
pub struct ContentSlice {
    /// Whether the slice covers every item of the source content. When
    /// false, scrolling near the end must re-slice with a further cursor.
    pub contains_all_items: bool,

    pub content: Content,
}

impl ContentSlice {
    /// A slice of everything, used when no windowing applies.
    pub fn complete(content: Content) -> Self {
        Self {
            contains_all_items: true,
            content,
        }
    }
}

impl Default for ContentSlice {
    fn default() -> Self {
        Self::complete(Content::default())
    }
}
