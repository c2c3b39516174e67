//! Paged layout: one viewport-sized page per item.

use sectional_core::LayoutDirection;

use crate::behavior::Behavior;
use crate::layout_content::ListLayoutContent;
use crate::list_layout::{
    set_z_indexes, update_overscroll_footer_position, LayoutContext, ListLayout,
    ScrollViewProperties,
};

/// Gives every item exactly one viewport-sized page along the scroll axis,
/// in content order. Snapping between pages is delegated to the platform's
/// paging primitive via [`ScrollViewProperties::is_paging_enabled`].
///
/// Headers, footers, and item sizing specs do not participate; pages fill
/// the viewport.
#[derive(Default)]
pub struct PagedListLayout;

impl ListLayout for PagedListLayout {
    fn layout(&mut self, context: &LayoutContext<'_>, content: &mut ListLayoutContent) {
        let direction = content.direction;
        let page = direction.main(context.viewport.size);
        let cross = direction.cross(context.viewport.size);

        let mut page_index = 0;

        for section in &mut content.sections {
            for item in &mut section.items {
                item.frame = direction.rect(page_index as f32 * page, 0.0, page, cross);
                page_index += 1;
            }

            section.update_frames();
        }

        content.content_size = direction.size(page_index as f32 * page, cross);

        if let Some(overscroll) = &mut content.overscroll_footer {
            let extent = direction.main(overscroll.default_frame.size());
            let frame = direction.rect(direction.main(content.content_size), 0.0, extent, cross);
            overscroll.set_frame(frame);
        }

        set_z_indexes(content);
        update_overscroll_footer_position(context, content);
    }

    fn scroll_view_properties(&self, _behavior: &Behavior) -> ScrollViewProperties {
        ScrollViewProperties {
            is_paging_enabled: true,
            always_bounce: false,
        }
    }

    // Pages never pin or underflow; the full pass already places
    // everything scroll-independently.
    fn update_layout(&mut self, context: &LayoutContext<'_>, content: &mut ListLayoutContent) {
        update_overscroll_footer_position(context, content);
    }
}
