//! Visual configuration for list layout.

use sectional_core::{EdgeInsets, LayoutDirection, WidthConstraint};

/// The visual constants a layout pass reads: scroll axis, default sizes,
/// paddings, and spacings. Purely declarative; changing the appearance
/// forces a full layout rebuild.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Appearance {
    pub direction: LayoutDirection,

    /// Pin each section's header to the top of the viewport while any of
    /// the section's content is scrolled under it.
    pub sticky_section_headers: bool,

    pub sizing: SizingDefaults,
    pub layout: LayoutDefaults,
}

impl Appearance {
    pub fn new(configure: impl FnOnce(&mut Self)) -> Self {
        let mut appearance = Self::default();
        configure(&mut appearance);
        appearance
    }
}

/// Fallback extents used when an element's sizing is [`Sizing::Default`].
///
/// [`Sizing::Default`]: sectional_core::Sizing::Default
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizingDefaults {
    pub item_height: f32,
    pub section_header_height: f32,
    pub section_footer_height: f32,
    pub list_header_height: f32,
    pub list_footer_height: f32,
    pub overscroll_footer_height: f32,
}

impl Default for SizingDefaults {
    fn default() -> Self {
        Self {
            item_height: 50.0,
            section_header_height: 60.0,
            section_footer_height: 40.0,
            list_header_height: 60.0,
            list_footer_height: 60.0,
            overscroll_footer_height: 60.0,
        }
    }
}

/// Paddings, width constraint, and inter-element spacings.
///
/// All spacings default to zero; extents accumulate purely from element
/// sizes unless the caller opts in to spacing.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LayoutDefaults {
    /// Padding around the entire content, applied on the scroll axis ends
    /// and subtracted from the cross-axis width.
    pub padding: EdgeInsets,

    /// List-level width constraint; the base of the item/section/list
    /// width override chain.
    pub width: WidthConstraint,

    /// Below the list header, above the first section.
    pub header_to_first_section_spacing: f32,

    /// Between two sections, by whether the earlier one has a footer.
    pub inter_section_spacing_with_footer: f32,
    pub inter_section_spacing_without_footer: f32,

    /// Below a section header, above its first item.
    pub section_header_bottom_spacing: f32,

    /// Between adjacent items, unless an item overrides it.
    pub item_spacing: f32,

    /// Between a section's last item and its footer.
    pub item_to_section_footer_spacing: f32,

    /// Above the list footer.
    pub last_section_to_footer_spacing: f32,
}

impl LayoutDefaults {
    /// Spacing to apply after a section, depending on its footer.
    pub fn inter_section_spacing(&self, has_footer: bool) -> f32 {
        if has_footer {
            self.inter_section_spacing_with_footer
        } else {
            self.inter_section_spacing_without_footer
        }
    }
}
