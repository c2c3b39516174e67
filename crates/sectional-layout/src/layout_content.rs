//! The mutable geometry tree a layout pass writes into.
//!
//! The presentation layer builds one [`ListLayoutContent`] per rebuild:
//! each element carries its layout attributes plus a measurer closure that
//! routes back into that element's memoized size cache. Layout algorithms
//! then fill in frames and z-indexes in place, and the finished tree is
//! snapshotted into [`ListLayoutAttributes`] for dispatch to the platform.

use std::rc::Rc;

use sectional_core::{
    AnyIdentifier, ElementKey, HeaderFooterLayouts, IndexPath, ItemLayouts, LayoutDirection,
    MeasureInfo, Rect, SectionLayouts, Size,
};

/// Resolves an element's size for a constraint, consulting and filling the
/// element's size cache.
pub type Measurer = Rc<dyn Fn(&MeasureInfo) -> Size>;

/// Geometry and measurement state for one header/footer slot.
pub struct SupplementaryLayoutInfo {
    pub layouts: HeaderFooterLayouts,
    pub measurer: Measurer,

    /// The frame the element renders at, including any pinning.
    pub frame: Rect,
    /// The frame ignoring pinning; sticky positioning restores from here.
    pub default_frame: Rect,
    /// Set while the element is pinned to the viewport edge.
    pub pinned_origin: Option<f32>,
    pub z_index: u8,
}

impl SupplementaryLayoutInfo {
    pub fn new(layouts: HeaderFooterLayouts, measurer: Measurer) -> Self {
        Self {
            layouts,
            measurer,
            frame: Rect::ZERO,
            default_frame: Rect::ZERO,
            pinned_origin: None,
            z_index: 0,
        }
    }

    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
        self.default_frame = frame;
        self.pinned_origin = None;
    }

    fn attributes(&self) -> LayoutAttributes {
        LayoutAttributes {
            frame: self.frame,
            z_index: self.z_index,
            pinned: self.pinned_origin.is_some(),
        }
    }
}

/// Geometry and measurement state for one item.
pub struct ItemLayoutInfo {
    pub identifier: AnyIdentifier,

    /// The index path the item currently occupies. Diverges from the
    /// content's index path only mid-gesture during interactive reorder.
    pub live_index_path: IndexPath,

    pub layouts: ItemLayouts,
    pub measurer: Measurer,

    pub frame: Rect,
    pub z_index: u8,
}

impl ItemLayoutInfo {
    pub fn new(
        identifier: AnyIdentifier,
        index_path: IndexPath,
        layouts: ItemLayouts,
        measurer: Measurer,
    ) -> Self {
        Self {
            identifier,
            live_index_path: index_path,
            layouts,
            measurer,
            frame: Rect::ZERO,
            z_index: 0,
        }
    }

    fn attributes(&self) -> LayoutAttributes {
        LayoutAttributes {
            frame: self.frame,
            z_index: self.z_index,
            pinned: false,
        }
    }
}

/// One section's slice of the geometry tree.
pub struct SectionLayoutInfo {
    pub layouts: SectionLayouts,
    pub header: Option<SupplementaryLayoutInfo>,
    pub footer: Option<SupplementaryLayoutInfo>,
    pub items: Vec<ItemLayoutInfo>,

    /// Union of every element frame in the section.
    pub frame: Rect,
    /// Union of the item frames only; the sticky clamp's lower bound.
    pub contents_frame: Rect,
}

impl SectionLayoutInfo {
    pub fn new(
        layouts: SectionLayouts,
        header: Option<SupplementaryLayoutInfo>,
        footer: Option<SupplementaryLayoutInfo>,
        items: Vec<ItemLayoutInfo>,
    ) -> Self {
        Self {
            layouts,
            header,
            footer,
            items,
            frame: Rect::ZERO,
            contents_frame: Rect::ZERO,
        }
    }

    /// Recomputes `frame` and `contents_frame` from the element frames.
    pub fn update_frames(&mut self) {
        let mut contents = Rect::ZERO;
        for item in &self.items {
            contents = contents.union(&item.frame);
        }
        if let Some(footer) = &self.footer {
            contents = contents.union(&footer.default_frame);
        }

        let mut frame = contents;
        if let Some(header) = &self.header {
            frame = frame.union(&header.default_frame);
        }

        self.contents_frame = contents;
        self.frame = frame;
    }
}

/// The complete geometry tree for one laid-out list.
pub struct ListLayoutContent {
    pub direction: LayoutDirection,

    pub header: Option<SupplementaryLayoutInfo>,
    pub footer: Option<SupplementaryLayoutInfo>,
    pub overscroll_footer: Option<SupplementaryLayoutInfo>,
    pub sections: Vec<SectionLayoutInfo>,

    /// Aggregate extent of the laid-out content; set by the layout pass.
    pub content_size: Size,
}

impl ListLayoutContent {
    pub fn new(
        direction: LayoutDirection,
        header: Option<SupplementaryLayoutInfo>,
        footer: Option<SupplementaryLayoutInfo>,
        overscroll_footer: Option<SupplementaryLayoutInfo>,
        sections: Vec<SectionLayoutInfo>,
    ) -> Self {
        Self {
            direction,
            header,
            footer,
            overscroll_footer,
            sections,
            content_size: Size::ZERO,
        }
    }

    pub fn empty(direction: LayoutDirection) -> Self {
        Self::new(direction, None, None, None, Vec::new())
    }

    pub fn item(&self, index_path: IndexPath) -> &ItemLayoutInfo {
        &self.sections[index_path.section].items[index_path.item]
    }

    pub fn item_mut(&mut self, index_path: IndexPath) -> &mut ItemLayoutInfo {
        &mut self.sections[index_path.section].items[index_path.item]
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|section| section.items.len()).sum()
    }

    /// Moves an item's layout info during an interactive reorder and
    /// renumbers every live index path to match.
    pub fn move_item(&mut self, from: IndexPath, to: IndexPath) {
        if from == to {
            return;
        }

        let info = self.sections[from.section].items.remove(from.item);
        self.sections[to.section].items.insert(to.item, info);

        self.reindex_live_paths();
    }

    /// Resets every item's live index path to its structural position.
    pub fn reindex_live_paths(&mut self) {
        for (section_index, section) in self.sections.iter_mut().enumerate() {
            for (item_index, item) in section.items.iter_mut().enumerate() {
                item.live_index_path = IndexPath::new(section_index, item_index);
            }
        }
    }

    /// Shifts every element frame by `delta` along the scroll axis.
    pub fn shift_along_axis(&mut self, delta: f32) {
        if delta == 0.0 {
            return;
        }

        let (dx, dy) = match self.direction {
            LayoutDirection::Vertical => (0.0, delta),
            LayoutDirection::Horizontal => (delta, 0.0),
        };

        let shift = |info: &mut SupplementaryLayoutInfo| {
            info.frame = info.frame.translate(dx, dy);
            info.default_frame = info.default_frame.translate(dx, dy);
        };

        if let Some(header) = &mut self.header {
            shift(header);
        }
        if let Some(footer) = &mut self.footer {
            shift(footer);
        }

        for section in &mut self.sections {
            if let Some(header) = &mut section.header {
                shift(header);
            }
            if let Some(footer) = &mut section.footer {
                shift(footer);
            }
            for item in &mut section.items {
                item.frame = item.frame.translate(dx, dy);
            }

            section.frame = section.frame.translate(dx, dy);
            section.contents_frame = section.contents_frame.translate(dx, dy);
        }
    }

    /// Snapshots the finished geometry for dispatch and comparison.
    pub fn attributes(&self) -> ListLayoutAttributes {
        let mut elements = Vec::new();

        if let Some(header) = &self.header {
            elements.push((ElementKey::ListHeader, header.attributes()));
        }

        for (section_index, section) in self.sections.iter().enumerate() {
            if let Some(header) = &section.header {
                elements.push((ElementKey::SectionHeader(section_index), header.attributes()));
            }
            for (item_index, item) in section.items.iter().enumerate() {
                elements.push((
                    ElementKey::Item(IndexPath::new(section_index, item_index)),
                    item.attributes(),
                ));
            }
            if let Some(footer) = &section.footer {
                elements.push((ElementKey::SectionFooter(section_index), footer.attributes()));
            }
        }

        if let Some(footer) = &self.footer {
            elements.push((ElementKey::ListFooter, footer.attributes()));
        }
        if let Some(overscroll) = &self.overscroll_footer {
            elements.push((ElementKey::OverscrollFooter, overscroll.attributes()));
        }

        ListLayoutAttributes {
            content_size: self.content_size,
            elements,
        }
    }
}

/// Final geometry for one element, as the platform consumes it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutAttributes {
    pub frame: Rect,
    pub z_index: u8,
    /// Whether the frame reflects a sticky pin rather than natural flow.
    pub pinned: bool,
}

/// An ordered snapshot of every element's final geometry.
///
/// Element order is deterministic: list header, then each section's
/// header, items, footer, then list footer, then overscroll footer.
#[derive(Clone, Debug, PartialEq)]
pub struct ListLayoutAttributes {
    pub content_size: Size,
    pub elements: Vec<(ElementKey, LayoutAttributes)>,
}

impl ListLayoutAttributes {
    pub fn frame(&self, key: ElementKey) -> Option<Rect> {
        self.elements
            .iter()
            .find(|(element, _)| *element == key)
            .map(|(_, attributes)| attributes.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurer() -> Measurer {
        Rc::new(|_: &MeasureInfo| Size::ZERO)
    }

    fn item(section: usize, index: usize) -> ItemLayoutInfo {
        ItemLayoutInfo::new(
            AnyIdentifier::new::<(), _>((section, index)),
            IndexPath::new(section, index),
            ItemLayouts::default(),
            measurer(),
        )
    }

    fn content_with_items(counts: &[usize]) -> ListLayoutContent {
        let sections = counts
            .iter()
            .enumerate()
            .map(|(section_index, &count)| {
                let items = (0..count).map(|index| item(section_index, index)).collect();
                SectionLayoutInfo::new(SectionLayouts::default(), None, None, items)
            })
            .collect();

        ListLayoutContent::new(LayoutDirection::Vertical, None, None, None, sections)
    }

    #[test]
    fn test_move_item_renumbers_live_paths() {
        let mut content = content_with_items(&[2, 2]);
        let moved = content.item(IndexPath::new(0, 0)).identifier.clone();

        content.move_item(IndexPath::new(0, 0), IndexPath::new(1, 1));

        assert_eq!(content.sections[0].items.len(), 1);
        assert_eq!(content.sections[1].items.len(), 3);
        assert_eq!(content.item(IndexPath::new(1, 1)).identifier, moved);

        for (section_index, section) in content.sections.iter().enumerate() {
            for (item_index, item) in section.items.iter().enumerate() {
                assert_eq!(item.live_index_path, IndexPath::new(section_index, item_index));
            }
        }
    }

    #[test]
    fn test_shift_along_axis_moves_every_frame() {
        let mut content = content_with_items(&[1]);
        content.item_mut(IndexPath::ZERO).frame = Rect::new(0.0, 10.0, 100.0, 20.0);
        content.sections[0].update_frames();

        content.shift_along_axis(5.0);

        assert_eq!(content.item(IndexPath::ZERO).frame, Rect::new(0.0, 15.0, 100.0, 20.0));
        assert_eq!(content.sections[0].frame.y, 15.0);
    }
}
