//! Content model and identity primitives for Sectional lists.
//!
//! This crate holds the value types a caller builds a list out of —
//! [`Content`], [`Section`], [`Item`], [`HeaderFooter`] — together with the
//! identity, sizing, and geometry primitives shared by the layout and
//! presentation crates. Everything here is plain data; diffing, layout, and
//! view management live in the higher-level crates.

mod content;
mod direction;
mod element;
mod geometry;
mod header_footer;
mod identifier;
mod index_path;
mod item;
mod section;
mod sizing;
mod update_callbacks;
mod width;

pub use content::*;
pub use direction::*;
pub use element::*;
pub use geometry::*;
pub use header_footer::*;
pub use identifier::*;
pub use index_path::*;
pub use item::*;
pub use section::*;
pub use sizing::*;
pub use update_callbacks::*;
pub use width::*;

pub mod prelude {
    pub use crate::content::{Content, PagingBehavior};
    pub use crate::header_footer::{HeaderFooter, HeaderFooterContent};
    pub use crate::index_path::IndexPath;
    pub use crate::item::{Item, ItemContent};
    pub use crate::section::Section;
    pub use crate::sizing::Sizing;
}
