//! Choosing a layout algorithm.

use sectional_core::Size;

use crate::grid::GridListLayout;
use crate::linear::LinearListLayout;
use crate::list_layout::ListLayout;
use crate::paged::PagedListLayout;

/// Which layout algorithm a list uses, plus its configuration.
///
/// Changing the description forces a full layout rebuild with a freshly
/// created algorithm instance.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum LayoutDescription {
    #[default]
    Linear,
    Grid {
        cell_size: Size,
    },
    Paged,
}

impl LayoutDescription {
    pub fn create(&self) -> Box<dyn ListLayout> {
        match *self {
            LayoutDescription::Linear => Box::new(LinearListLayout),
            LayoutDescription::Grid { cell_size } => Box::new(GridListLayout::new(cell_size)),
            LayoutDescription::Paged => Box::new(PagedListLayout),
        }
    }
}
