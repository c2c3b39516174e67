//! Layout algorithms for Sectional lists.
//!
//! Consumes a geometry tree built by the presentation layer
//! ([`ListLayoutContent`], with per-element measurer closures) plus the
//! caller's [`Appearance`] and [`Behavior`], and assigns every element an
//! absolute frame and z-index. Algorithms are pluggable behind
//! [`ListLayout`], selected by [`LayoutDescription`].

mod appearance;
mod behavior;
mod description;
mod grid;
mod layout_content;
mod linear;
mod list_layout;
mod needed_layout;
mod paged;
mod viewport;

pub use appearance::*;
pub use behavior::*;
pub use description::*;
pub use grid::*;
pub use layout_content::*;
pub use linear::LinearListLayout;
pub use list_layout::*;
pub use needed_layout::*;
pub use paged::*;
pub use viewport::*;
