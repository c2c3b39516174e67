//! The default layout: sequential placement along the scroll axis.

use log::trace;

use sectional_core::{CustomWidth, HorizontalPadding, LayoutDirection, MeasureInfo, Size};

use crate::behavior::Behavior;
use crate::layout_content::{ListLayoutContent, SupplementaryLayoutInfo};
use crate::list_layout::{
    adjust_positions_for_underflow, position_sticky_section_headers, set_z_indexes,
    update_overscroll_footer_position, LayoutContext, ListLayout, ScrollViewProperties,
};

/// Sequential list layout with optional multi-column sections, sticky
/// section headers, underflow alignment, and an overscroll footer.
#[derive(Default)]
pub struct LinearListLayout;

/// The cross-axis placement resolved for the list as a whole.
#[derive(Clone, Copy)]
pub(crate) struct RootWidth {
    pub(crate) available: f32,
    pub(crate) origin: f32,
    pub(crate) width: f32,
}

impl ListLayout for LinearListLayout {
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

        let has_sections = content.sections.iter().any(|section| {
            !section.items.is_empty() || section.header.is_some() || section.footer.is_some()
        });

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
            if has_sections {
                last += defaults.header_to_first_section_spacing;
            }
        }

        let section_count = content.sections.len();

        for (section_index, section) in content.sections.iter_mut().enumerate() {
            let section_width = section.layouts.width;
            let columns = section.layouts.columns;
            let is_empty =
                section.items.is_empty() && section.header.is_none() && section.footer.is_none();

            if is_empty {
                section.update_frames();
                continue;
            }

            if let Some(header) = &mut section.header {
                last = place_supplementary(
                    header,
                    direction,
                    last,
                    root,
                    section_width,
                    sizing.section_header_height,
                );
                if !section.items.is_empty() {
                    last += defaults.section_header_bottom_spacing;
                }
            }

            if columns.count == 1 {
                let count = section.items.len();

                for (index, item) in section.items.iter_mut().enumerate() {
                    let position = item
                        .layouts
                        .width
                        .merge(section_width)
                        .position(root.available, root.origin, root.width);

                    let extent = measure(
                        &item.measurer,
                        direction,
                        position.width,
                        sizing.item_height,
                    );

                    item.frame = direction.rect(last, position.origin, extent, position.width);
                    last = direction.max_main(item.frame);

                    if index + 1 < count {
                        last += item.layouts.item_spacing.unwrap_or(defaults.item_spacing);
                    }
                }
            } else {
                let section_position =
                    section_width.position(root.available, root.origin, root.width);
                let column_width = (section_position.width
                    - columns.spacing * (columns.count - 1) as f32)
                    / columns.count as f32;

                let row_count = section.items.len().div_ceil(columns.count);

                for (row_index, row) in section.items.chunks_mut(columns.count).enumerate() {
                    let mut row_extent: f32 = 0.0;

                    for (column, item) in row.iter_mut().enumerate() {
                        let origin = section_position.origin
                            + column as f32 * (column_width + columns.spacing);

                        let extent = measure(
                            &item.measurer,
                            direction,
                            column_width,
                            sizing.item_height,
                        );

                        item.frame = direction.rect(last, origin, extent, column_width);
                        row_extent = row_extent.max(extent);
                    }

                    last += row_extent;

                    if row_index + 1 < row_count {
                        last += defaults.item_spacing;
                    }
                }
            }

            if let Some(footer) = &mut section.footer {
                if !section.items.is_empty() {
                    last += defaults.item_to_section_footer_spacing;
                }
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

            if section_index + 1 < section_count {
                last += defaults.inter_section_spacing(section.footer.is_some());
            }
        }

        if let Some(footer) = &mut content.footer {
            if has_sections {
                last += defaults.last_section_to_footer_spacing;
            }
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

        // Overscroll footer sits past the content; its natural slot is the
        // content end, refined against the viewport below.
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

        trace!(
            "linear layout complete: {} sections, content size {:?}",
            content.sections.len(),
            content.content_size,
        );
    }

    fn scroll_view_properties(&self, behavior: &Behavior) -> ScrollViewProperties {
        ScrollViewProperties {
            is_paging_enabled: false,
            always_bounce: behavior.underflow.always_bounce,
        }
    }
}

fn measure(
    measurer: &crate::layout_content::Measurer,
    direction: LayoutDirection,
    width: f32,
    default_extent: f32,
) -> f32 {
    let info = MeasureInfo {
        size_constraint: direction.size(f32::INFINITY, width),
        default_size: direction.size(default_extent, width),
        direction,
    };

    direction.main(measurer(&info))
}

pub(crate) fn place_supplementary(
    info: &mut SupplementaryLayoutInfo,
    direction: LayoutDirection,
    last: f32,
    root: RootWidth,
    containing_width: CustomWidth,
    default_extent: f32,
) -> f32 {
    let position = info
        .layouts
        .width
        .merge(containing_width)
        .position(root.available, root.origin, root.width);

    let extent = measure(&info.measurer, direction, position.width, default_extent);

    info.set_frame(direction.rect(last, position.origin, extent, position.width));

    direction.max_main(info.frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use sectional_core::{
        AnyIdentifier, Columns, ElementKey, HeaderFooterLayouts, IndexPath, ItemLayouts, Point,
        Rect, SectionLayouts,
    };

    use crate::appearance::Appearance;
    use crate::behavior::UnderflowAlignment;
    use crate::layout_content::{ItemLayoutInfo, Measurer, SectionLayoutInfo};
    use crate::viewport::Viewport;

    fn fixed(extent: f32) -> Measurer {
        Rc::new(move |info: &MeasureInfo| {
            info.direction
                .size(extent, info.direction.cross(info.size_constraint))
        })
    }

    fn supplementary(extent: f32) -> SupplementaryLayoutInfo {
        SupplementaryLayoutInfo::new(HeaderFooterLayouts::default(), fixed(extent))
    }

    fn item(section: usize, index: usize, extent: f32) -> ItemLayoutInfo {
        ItemLayoutInfo::new(
            AnyIdentifier::new::<(), _>((section, index)),
            IndexPath::new(section, index),
            ItemLayouts::default(),
            fixed(extent),
        )
    }

    /// Header 50, section "first" (header 55, item 20, footer 45), section
    /// "second" (items 40 and 60), footer 70, in a 200-wide list.
    fn two_section_content(direction: LayoutDirection) -> ListLayoutContent {
        ListLayoutContent::new(
            direction,
            Some(supplementary(50.0)),
            Some(supplementary(70.0)),
            None,
            vec![
                SectionLayoutInfo::new(
                    SectionLayouts::default(),
                    Some(supplementary(55.0)),
                    Some(supplementary(45.0)),
                    vec![item(0, 0, 20.0)],
                ),
                SectionLayoutInfo::new(
                    SectionLayouts::default(),
                    None,
                    None,
                    vec![item(1, 0, 40.0), item(1, 1, 60.0)],
                ),
            ],
        )
    }

    fn context<'a>(
        appearance: &'a Appearance,
        behavior: &'a Behavior,
        viewport: Viewport,
    ) -> LayoutContext<'a> {
        LayoutContext {
            viewport,
            appearance,
            behavior,
        }
    }

    #[test]
    fn test_vertical_placement() {
        let appearance = Appearance::default();
        let behavior = Behavior::default();
        let viewport = Viewport::new(Size::new(200.0, 1000.0));

        let mut content = two_section_content(LayoutDirection::Vertical);
        LinearListLayout.layout(&context(&appearance, &behavior, viewport), &mut content);

        let attributes = content.attributes();

        assert_eq!(
            attributes.frame(ElementKey::ListHeader),
            Some(Rect::new(0.0, 0.0, 200.0, 50.0))
        );
        assert_eq!(
            attributes.frame(ElementKey::SectionHeader(0)),
            Some(Rect::new(0.0, 50.0, 200.0, 55.0))
        );
        assert_eq!(
            attributes.frame(ElementKey::Item(IndexPath::new(0, 0))),
            Some(Rect::new(0.0, 105.0, 200.0, 20.0))
        );
        assert_eq!(
            attributes.frame(ElementKey::SectionFooter(0)),
            Some(Rect::new(0.0, 125.0, 200.0, 45.0))
        );
        assert_eq!(
            attributes.frame(ElementKey::Item(IndexPath::new(1, 0))),
            Some(Rect::new(0.0, 170.0, 200.0, 40.0))
        );
        assert_eq!(
            attributes.frame(ElementKey::Item(IndexPath::new(1, 1))),
            Some(Rect::new(0.0, 210.0, 200.0, 60.0))
        );
        assert_eq!(
            attributes.frame(ElementKey::ListFooter),
            Some(Rect::new(0.0, 270.0, 200.0, 70.0))
        );

        assert_eq!(content.sections[0].frame, Rect::new(0.0, 50.0, 200.0, 120.0));
        assert_eq!(content.sections[1].frame, Rect::new(0.0, 170.0, 200.0, 100.0));
        assert_eq!(content.content_size, Size::new(200.0, 340.0));
    }

    #[test]
    fn test_horizontal_placement_mirrors_vertical() {
        let appearance = Appearance::new(|appearance| {
            appearance.direction = LayoutDirection::Horizontal;
        });
        let behavior = Behavior::default();
        let viewport = Viewport::new(Size::new(1000.0, 200.0));

        let mut content = two_section_content(LayoutDirection::Horizontal);
        LinearListLayout.layout(&context(&appearance, &behavior, viewport), &mut content);

        let attributes = content.attributes();

        assert_eq!(
            attributes.frame(ElementKey::ListHeader),
            Some(Rect::new(0.0, 0.0, 50.0, 200.0))
        );
        assert_eq!(
            attributes.frame(ElementKey::Item(IndexPath::new(1, 1))),
            Some(Rect::new(210.0, 0.0, 60.0, 200.0))
        );
        assert_eq!(content.content_size, Size::new(340.0, 200.0));
    }

    #[test]
    fn test_layout_is_idempotent() {
        let appearance = Appearance::new(|appearance| {
            appearance.sticky_section_headers = true;
        });
        let behavior = Behavior::default();
        let viewport = Viewport::new(Size::new(200.0, 1000.0));

        let mut first = two_section_content(LayoutDirection::Vertical);
        LinearListLayout.layout(&context(&appearance, &behavior, viewport), &mut first);

        let mut second = two_section_content(LayoutDirection::Vertical);
        LinearListLayout.layout(&context(&appearance, &behavior, viewport), &mut second);
        LinearListLayout.layout(&context(&appearance, &behavior, viewport), &mut second);

        assert_eq!(first.attributes(), second.attributes());
    }

    #[test]
    fn test_underflow_bottom_shifts_everything() {
        let appearance = Appearance::default();
        let behavior = Behavior::default();
        let viewport = Viewport::new(Size::new(200.0, 600.0));

        let mut plain = two_section_content(LayoutDirection::Vertical);
        LinearListLayout.layout(&context(&appearance, &behavior, viewport), &mut plain);

        let mut aligned_behavior = Behavior::default();
        aligned_behavior.underflow.alignment = UnderflowAlignment::Bottom;

        let mut aligned = two_section_content(LayoutDirection::Vertical);
        LinearListLayout.layout(&context(&appearance, &aligned_behavior, viewport), &mut aligned);

        // Content is 340 tall in a 600 viewport; everything drops by 260.
        let delta = 600.0 - 340.0;

        for ((key, plain), (aligned_key, aligned)) in plain
            .attributes()
            .elements
            .iter()
            .zip(aligned.attributes().elements.iter())
        {
            assert_eq!(key, aligned_key);
            assert_eq!(aligned.frame.y, plain.frame.y + delta, "element {key:?}");
        }
    }

    #[test]
    fn test_sticky_header_clamps_to_section() {
        let appearance = Appearance::new(|appearance| {
            appearance.sticky_section_headers = true;
        });
        let behavior = Behavior::default();

        let mut content = two_section_content(LayoutDirection::Vertical);

        let laid_out = |offset: f32, content: &mut ListLayoutContent| {
            let mut viewport = Viewport::new(Size::new(200.0, 100.0));
            viewport.content_offset = Point::new(0.0, offset);
            LinearListLayout.layout(&context(&appearance, &behavior, viewport), content);
            content.sections[0].header.as_ref().unwrap().frame
        };

        // Section "first" spans y 50..170 with a 55-tall header.

        // Not yet reached: natural position, unpinned.
        assert_eq!(laid_out(0.0, &mut content).y, 50.0);

        // Scrolled into the section: pinned to the viewport top.
        assert_eq!(laid_out(80.0, &mut content).y, 80.0);

        // Scrolled past: clamped to section bottom minus header height.
        assert_eq!(laid_out(400.0, &mut content).y, 170.0 - 55.0);
        assert!(content.sections[0].header.as_ref().unwrap().pinned_origin.is_some());
    }

    #[test]
    fn test_two_column_section() {
        let appearance = Appearance::default();
        let behavior = Behavior::default();
        let viewport = Viewport::new(Size::new(210.0, 1000.0));

        let mut content = ListLayoutContent::new(
            LayoutDirection::Vertical,
            None,
            None,
            None,
            vec![SectionLayoutInfo::new(
                SectionLayouts {
                    columns: Columns::new(2, 10.0),
                    ..SectionLayouts::default()
                },
                None,
                None,
                vec![item(0, 0, 30.0), item(0, 1, 50.0), item(0, 2, 40.0)],
            )],
        );

        LinearListLayout.layout(&context(&appearance, &behavior, viewport), &mut content);

        // (210 - 10) / 2 = 100 per column.
        assert_eq!(
            content.item(IndexPath::new(0, 0)).frame,
            Rect::new(0.0, 0.0, 100.0, 30.0)
        );
        assert_eq!(
            content.item(IndexPath::new(0, 1)).frame,
            Rect::new(110.0, 0.0, 100.0, 50.0)
        );
        // Second row starts below the tallest item of the first.
        assert_eq!(
            content.item(IndexPath::new(0, 2)).frame,
            Rect::new(0.0, 50.0, 100.0, 40.0)
        );
        assert_eq!(content.content_size.height, 90.0);
    }
}
