//! The layout algorithm trait and the passes every algorithm shares.

use crate::appearance::Appearance;
use crate::behavior::Behavior;
use crate::layout_content::ListLayoutContent;
use crate::viewport::Viewport;

/// Everything a layout pass reads besides the content itself.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    pub viewport: Viewport,
    pub appearance: &'a Appearance,
    pub behavior: &'a Behavior,
}

/// Properties the platform scroll view must adopt for a layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ScrollViewProperties {
    pub is_paging_enabled: bool,
    pub always_bounce: bool,
}

/// One pluggable layout algorithm.
///
/// `layout` performs the full pass: measure every element, assign frames
/// and z-indexes, and set the aggregate content size. It must be
/// idempotent — the same inputs produce the same geometry. `update_layout`
/// is the cheap scroll-dependent pass run as the content offset changes.
pub trait ListLayout {
    fn layout(&mut self, context: &LayoutContext<'_>, content: &mut ListLayoutContent);

    fn scroll_view_properties(&self, behavior: &Behavior) -> ScrollViewProperties;

    fn update_layout(&mut self, context: &LayoutContext<'_>, content: &mut ListLayoutContent) {
        position_sticky_section_headers(context, content);
        update_overscroll_footer_position(context, content);
    }
}

pub(crate) mod z_index {
    pub const LIST_HEADER: u8 = 5;
    pub const SECTION_HEADER: u8 = 4;
    pub const ITEM: u8 = 3;
    pub const SECTION_FOOTER: u8 = 2;
    pub const LIST_FOOTER: u8 = 1;
    pub const OVERSCROLL_FOOTER: u8 = 0;
}

/// Assigns the deterministic z-index ordering: list header above section
/// headers, above items, above section footers, above the list footer,
/// above the overscroll footer. Headers must stack over content while
/// pinned or overlapping.
pub fn set_z_indexes(content: &mut ListLayoutContent) {
    if let Some(header) = &mut content.header {
        header.z_index = z_index::LIST_HEADER;
    }
    if let Some(footer) = &mut content.footer {
        footer.z_index = z_index::LIST_FOOTER;
    }
    if let Some(overscroll) = &mut content.overscroll_footer {
        overscroll.z_index = z_index::OVERSCROLL_FOOTER;
    }

    for section in &mut content.sections {
        if let Some(header) = &mut section.header {
            header.z_index = z_index::SECTION_HEADER;
        }
        if let Some(footer) = &mut section.footer {
            footer.z_index = z_index::SECTION_FOOTER;
        }
        for item in &mut section.items {
            item.z_index = z_index::ITEM;
        }
    }
}

/// Pins section headers to the viewport's leading edge while their
/// section's content is scrolled underneath.
///
/// The pinned origin is clamped between the header's natural position and
/// the section's trailing edge minus the header extent, so a header never
/// escapes its own section.
pub fn position_sticky_section_headers(context: &LayoutContext<'_>, content: &mut ListLayoutContent) {
    if !context.appearance.sticky_section_headers {
        return;
    }

    let direction = content.direction;
    let visible_origin = direction.main_offset(context.viewport.content_offset);

    for section in &mut content.sections {
        let Some(header) = &mut section.header else {
            continue;
        };

        let natural = direction.main_origin(header.default_frame);
        let extent = direction.main(header.default_frame.size());
        let max_origin = (direction.max_main(section.frame) - extent).max(natural);

        let pinned = visible_origin.clamp(natural, max_origin);

        if pinned > natural {
            header.pinned_origin = Some(pinned);
            header.frame = match direction.is_vertical() {
                true => {
                    let mut frame = header.default_frame;
                    frame.y = pinned;
                    frame
                }
                false => {
                    let mut frame = header.default_frame;
                    frame.x = pinned;
                    frame
                }
            };
        } else {
            header.pinned_origin = None;
            header.frame = header.default_frame;
        }
    }
}

/// Places the overscroll footer just past whichever is further: the
/// content's end or the viewport's end. It only becomes visible while the
/// user drags beyond the scrollable bounds.
pub fn update_overscroll_footer_position(
    context: &LayoutContext<'_>,
    content: &mut ListLayoutContent,
) {
    let direction = content.direction;
    let content_end = direction.main(content.content_size);
    let viewport_end = direction.main(context.viewport.size);

    let Some(overscroll) = &mut content.overscroll_footer else {
        return;
    };

    let origin = content_end.max(viewport_end);

    let mut frame = overscroll.default_frame;
    match direction.is_vertical() {
        true => frame.y = origin,
        false => frame.x = origin,
    }
    overscroll.frame = frame;
}

/// Shifts all content by the underflow alignment when it is shorter than
/// the viewport.
pub fn adjust_positions_for_underflow(context: &LayoutContext<'_>, content: &mut ListLayoutContent) {
    let direction = content.direction;

    let delta = context.behavior.underflow.alignment.offset(
        direction.main(content.content_size),
        direction.main(context.viewport.size),
    );

    content.shift_along_axis(delta);
}
