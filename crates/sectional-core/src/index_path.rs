//! Addresses of items within sectioned content.

use std::fmt;

/// The position of an item: section index, then item index within it.
///
/// Ordering is by section first, then item, matching visual order in a
/// laid-out list.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    pub const ZERO: IndexPath = IndexPath {
        section: 0,
        item: 0,
    };
}

impl fmt::Debug for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_section_major() {
        assert!(IndexPath::new(0, 5) < IndexPath::new(1, 0));
        assert!(IndexPath::new(1, 0) < IndexPath::new(1, 1));
        assert_eq!(IndexPath::new(2, 3), IndexPath::new(2, 3));
    }
}
