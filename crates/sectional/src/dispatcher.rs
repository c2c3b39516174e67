//! Converting a diff into the ordered batch the platform applies.

use smallvec::SmallVec;

use sectional_core::IndexPath;

use crate::diff::SectionedDiff;

/// One structural batch, in the order the platform must apply it:
/// deletions (descending, so earlier removals never shift later ones),
/// then insertions (ascending), then moves.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BatchChanges {
    pub deleted_sections: SmallVec<[usize; 4]>,
    pub inserted_sections: SmallVec<[usize; 4]>,

    pub deleted_items: SmallVec<[IndexPath; 8]>,
    pub inserted_items: SmallVec<[IndexPath; 8]>,
    pub moved_items: SmallVec<[(IndexPath, IndexPath); 4]>,
}

impl BatchChanges {
    pub fn from_diff(diff: &SectionedDiff) -> Self {
        let mut changes = BatchChanges {
            deleted_sections: diff.deleted_sections.iter().copied().collect(),
            inserted_sections: diff.inserted_sections.iter().copied().collect(),
            deleted_items: diff.deleted_items.iter().copied().collect(),
            inserted_items: diff.inserted_items.iter().copied().collect(),
            moved_items: diff.moved_items.iter().copied().collect(),
        };

        changes.deleted_sections.sort_unstable_by(|a, b| b.cmp(a));
        changes.inserted_sections.sort_unstable();
        changes.deleted_items.sort_unstable_by(|a, b| b.cmp(a));
        changes.inserted_items.sort_unstable();
        changes.moved_items.sort_unstable_by_key(|&(_, to)| to);

        changes
    }

    pub fn is_empty(&self) -> bool {
        self.deleted_sections.is_empty()
            && self.inserted_sections.is_empty()
            && self.deleted_items.is_empty()
            && self.inserted_items.is_empty()
            && self.moved_items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        let diff = SectionedDiff {
            deleted_sections: vec![1, 3],
            inserted_sections: vec![2, 0],
            deleted_items: vec![IndexPath::new(0, 1), IndexPath::new(0, 4), IndexPath::new(2, 0)],
            inserted_items: vec![IndexPath::new(1, 2), IndexPath::new(0, 0)],
            moved_items: vec![],
            matched_items: vec![],
            matched_sections: vec![],
        };

        let changes = BatchChanges::from_diff(&diff);

        assert_eq!(changes.deleted_sections.as_slice(), &[3, 1]);
        assert_eq!(changes.inserted_sections.as_slice(), &[0, 2]);
        assert_eq!(
            changes.deleted_items.as_slice(),
            &[IndexPath::new(2, 0), IndexPath::new(0, 4), IndexPath::new(0, 1)]
        );
        assert_eq!(
            changes.inserted_items.as_slice(),
            &[IndexPath::new(0, 0), IndexPath::new(1, 2)]
        );
        assert!(!changes.is_empty());
        assert!(BatchChanges::default().is_empty());
    }
}
