//! Handles and keys naming individual elements to the platform.

use crate::index_path::IndexPath;

/// An opaque, non-owning handle to a platform view.
///
/// The platform owns the actual view objects; the engine only routes
/// handles back to it for measurement, content application, and geometry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ViewHandle(pub u64);

/// Names one element of a laid-out list to the platform.
///
/// Items are addressed by index path; header/footer slots are structural
/// positions, since only one of each exists at a time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ElementKey {
    ListHeader,
    ListFooter,
    OverscrollFooter,
    SectionHeader(usize),
    SectionFooter(usize),
    Item(IndexPath),
}
