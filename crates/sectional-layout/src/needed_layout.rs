//! Tracking how much layout work the next pass owes.

/// How much of the layout must be redone, ordered by cost.
///
/// `Relayout` repositions the existing layout content (scroll-dependent
/// work: sticky headers, overscroll). `Rebuild` reconstructs the layout
/// content from presentation state first (content, width, or appearance
/// changed).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum NeededLayout {
    #[default]
    None,
    Relayout,
    Rebuild,
}

impl NeededLayout {
    /// Requests at least `other`; never downgrades pending work.
    pub fn merge(&mut self, other: NeededLayout) {
        *self = (*self).max(other);
    }

    /// Consumes the pending request, resetting to `None`.
    pub fn take(&mut self) -> NeededLayout {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_never_downgrades() {
        let mut needed = NeededLayout::None;

        needed.merge(NeededLayout::Relayout);
        assert_eq!(needed, NeededLayout::Relayout);

        needed.merge(NeededLayout::Rebuild);
        assert_eq!(needed, NeededLayout::Rebuild);

        needed.merge(NeededLayout::Relayout);
        assert_eq!(needed, NeededLayout::Rebuild);

        assert_eq!(needed.take(), NeededLayout::Rebuild);
        assert_eq!(needed, NeededLayout::None);
    }
}
