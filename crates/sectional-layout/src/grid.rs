//! Fixed-cell grid layout.

use sectional_core::{CustomWidth, HorizontalPadding, LayoutDirection, Size};

use crate::behavior::Behavior;
use crate::layout_content::ListLayoutContent;
use crate::linear::{place_supplementary, RootWidth};
use crate::list_layout::{
    adjust_positions_for_underflow, position_sticky_section_headers, set_z_indexes,
    update_overscroll_footer_position, LayoutContext, ListLayout, ScrollViewProperties,
};

/// Packs fixed-size cells as many per row as fit, spacing them out of the
/// leftover width. Headers and footers occupy full rows around each
/// section's grid region. Item sizing specs are ignored; every cell is
/// `cell_size`.
pub struct GridListLayout {
    pub cell_size: Size,
}

impl GridListLayout {
    pub fn new(cell_size: Size) -> Self {
        Self { cell_size }
    }
}

impl ListLayout for GridListLayout {
    fn layout(&mut self, context: &LayoutContext<'_>, content: &mut ListLayoutContent) {
        let direction = content.direction;
        let appearance = context.appearance;
        let defaults = appearance.layout;
        let sizing = appearance.sizing;

        let (main_leading, main_trailing, cross_padding) = match direction {
            LayoutDirection::Vertical => (
                defaults.padding.top,
                defaults.padding.bottom,
                HorizontalPadding::new(defaults.padding.left, defaults.padding.right),
            ),
            LayoutDirection::Horizontal => (
                defaults.padding.left,
                defaults.padding.right,
                HorizontalPadding::new(defaults.padding.top, defaults.padding.bottom),
            ),
        };

        let available = direction.cross(context.viewport.size);
        let width = defaults.width.resolve(available, cross_padding);
        let root = RootWidth {
            available,
            origin: cross_padding.left
                + ((available - cross_padding.total() - width) / 2.0).max(0.0),
            width,
        };

        let cell_cross = direction.cross(self.cell_size);
        let cell_main = direction.main(self.cell_size);

        let per_row = ((root.width / cell_cross).floor() as usize).max(1);
        // A single column has no gaps to distribute leftover width into.
        let spacing = if per_row > 1 {
            (root.width - per_row as f32 * cell_cross) / (per_row - 1) as f32
        } else {
            0.0
        };

        let mut last = main_leading;

        if let Some(header) = &mut content.header {
            last = place_supplementary(
                header,
                direction,
                last,
                root,
                CustomWidth::Default,
                sizing.list_header_height,
            );
        }

        for section in &mut content.sections {
            let section_width = section.layouts.width;

            if let Some(header) = &mut section.header {
                last = place_supplementary(
                    header,
                    direction,
                    last,
                    root,
                    section_width,
                    sizing.section_header_height,
                );
            }

            let row_count = section.items.len().div_ceil(per_row);

            for (row_index, row) in section.items.chunks_mut(per_row).enumerate() {
                for (column, item) in row.iter_mut().enumerate() {
                    let origin = root.origin + column as f32 * (cell_cross + spacing);
                    item.frame = direction.rect(last, origin, cell_main, cell_cross);
                }

                last += cell_main;

                if row_index + 1 < row_count {
                    last += spacing;
                }
            }

            if let Some(footer) = &mut section.footer {
                last = place_supplementary(
                    footer,
                    direction,
                    last,
                    root,
                    section_width,
                    sizing.section_footer_height,
                );
            }

            section.update_frames();
        }

        if let Some(footer) = &mut content.footer {
            last = place_supplementary(
                footer,
                direction,
                last,
                root,
                CustomWidth::Default,
                sizing.list_footer_height,
            );
        }

        content.content_size = direction.size(last + main_trailing, available);

        if let Some(overscroll) = &mut content.overscroll_footer {
            place_supplementary(
                overscroll,
                direction,
                direction.main(content.content_size),
                root,
                CustomWidth::Default,
                sizing.overscroll_footer_height,
            );
        }

        set_z_indexes(content);
        adjust_positions_for_underflow(context, content);
        position_sticky_section_headers(context, content);
        update_overscroll_footer_position(context, content);
    }

    fn scroll_view_properties(&self, behavior: &Behavior) -> ScrollViewProperties {
        ScrollViewProperties {
            is_paging_enabled: false,
            always_bounce: behavior.underflow.always_bounce,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use sectional_core::{
        AnyIdentifier, IndexPath, ItemLayouts, MeasureInfo, Rect, SectionLayouts,
    };

    use crate::appearance::Appearance;
    use crate::layout_content::{ItemLayoutInfo, Measurer, SectionLayoutInfo};
    use crate::viewport::Viewport;

    fn ignored() -> Measurer {
        Rc::new(|_: &MeasureInfo| Size::ZERO)
    }

    fn content_with_items(count: usize) -> ListLayoutContent {
        let items = (0..count)
            .map(|index| {
                ItemLayoutInfo::new(
                    AnyIdentifier::new::<(), _>(index),
                    IndexPath::new(0, index),
                    ItemLayouts::default(),
                    ignored(),
                )
            })
            .collect();

        ListLayoutContent::new(
            LayoutDirection::Vertical,
            None,
            None,
            None,
            vec![SectionLayoutInfo::new(SectionLayouts::default(), None, None, items)],
        )
    }

    #[test]
    fn test_cells_pack_and_space_from_leftover() {
        let appearance = Appearance::default();
        let behavior = Behavior::default();
        let context = LayoutContext {
            viewport: Viewport::new(Size::new(210.0, 1000.0)),
            appearance: &appearance,
            behavior: &behavior,
        };

        let mut content = content_with_items(3);
        GridListLayout::new(Size::new(100.0, 80.0)).layout(&context, &mut content);

        // floor(210 / 100) = 2 per row; leftover 10 becomes the one gap.
        assert_eq!(
            content.item(IndexPath::new(0, 0)).frame,
            Rect::new(0.0, 0.0, 100.0, 80.0)
        );
        assert_eq!(
            content.item(IndexPath::new(0, 1)).frame,
            Rect::new(110.0, 0.0, 100.0, 80.0)
        );
        assert_eq!(
            content.item(IndexPath::new(0, 2)).frame,
            Rect::new(0.0, 90.0, 100.0, 80.0)
        );
        assert_eq!(content.content_size.height, 170.0);
    }

    #[test]
    fn test_oversized_cell_still_gets_one_column() {
        let appearance = Appearance::default();
        let behavior = Behavior::default();
        let context = LayoutContext {
            viewport: Viewport::new(Size::new(80.0, 1000.0)),
            appearance: &appearance,
            behavior: &behavior,
        };

        let mut content = content_with_items(2);
        GridListLayout::new(Size::new(100.0, 50.0)).layout(&context, &mut content);

        // One column, no spacing: rows stack directly.
        assert_eq!(
            content.item(IndexPath::new(0, 0)).frame,
            Rect::new(0.0, 0.0, 100.0, 50.0)
        );
        assert_eq!(
            content.item(IndexPath::new(0, 1)).frame,
            Rect::new(0.0, 50.0, 100.0, 50.0)
        );
    }
}
