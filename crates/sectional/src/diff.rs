//! Identity diffing between the live state and a new content snapshot.
//!
//! Sections and items are correlated purely by identifier. Matched
//! elements survive in place; everything else becomes a structural insert
//! or delete. Duplicate identifiers within one snapshot are a caller
//! error with defined behavior: matching is first-match-wins in order,
//! and the surplus occurrences diff as plain inserts/deletes.

use std::collections::VecDeque;

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use sectional_core::{AnyIdentifier, AnyItemRef, Content, IndexPath};

/// What the diff sees of the previous update's state tree.
pub struct SectionSnapshot {
    pub identifier: AnyIdentifier,
    pub items: Vec<AnyItemRef>,
}

/// A section present in both snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionMatch {
    pub old_index: usize,
    pub new_index: usize,

    /// The section changed relative order. Its state survives, but the
    /// platform sees a delete plus an insert; section-level move
    /// animations are not worth the index-path hazards they create.
    pub moved: bool,
}

/// An item identity present in both snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemMatch {
    pub from: IndexPath,
    pub to: IndexPath,

    /// A structural move op is dispatched for this item.
    pub moved: bool,

    /// The old and new content are visually equivalent.
    pub equivalent: bool,
}

/// The complete difference between two content snapshots.
///
/// The `*_sections` and `*_items` fields are the platform-facing
/// structural ops, already filtered to the platform's conventions (items
/// inside deleted or inserted sections are covered by the section op).
/// `matched_items` is the full set of identity survivors the state update
/// consumes, regardless of what the platform is told.
#[derive(Default)]
pub struct SectionedDiff {
    pub deleted_sections: Vec<usize>,
    pub inserted_sections: Vec<usize>,
    pub matched_sections: Vec<SectionMatch>,

    pub deleted_items: Vec<IndexPath>,
    pub inserted_items: Vec<IndexPath>,
    pub moved_items: Vec<(IndexPath, IndexPath)>,
    pub matched_items: Vec<ItemMatch>,
}

impl SectionedDiff {
    pub fn calculate(old: &[SectionSnapshot], new: &Content) -> Self {
        let mut diff = SectionedDiff::default();

        diff.match_sections(old, new);
        diff.match_items(old, new);

        debug!(
            "diff: {}+/{}- sections, {}+/{}-/{}> items, {} matched",
            diff.inserted_sections.len(),
            diff.deleted_sections.len(),
            diff.inserted_items.len(),
            diff.deleted_items.len(),
            diff.moved_items.len(),
            diff.matched_items.len(),
        );

        diff
    }

    /// Whether applying this diff changes anything at all.
    pub fn has_changes(&self) -> bool {
        !self.deleted_sections.is_empty()
            || !self.inserted_sections.is_empty()
            || !self.deleted_items.is_empty()
            || !self.inserted_items.is_empty()
            || !self.moved_items.is_empty()
            || self.matched_items.iter().any(|matched| !matched.equivalent)
    }

    fn match_sections(&mut self, old: &[SectionSnapshot], new: &Content) {
        let mut by_identifier: FxHashMap<&AnyIdentifier, VecDeque<usize>> = FxHashMap::default();
        for (index, section) in old.iter().enumerate() {
            by_identifier.entry(&section.identifier).or_default().push_back(index);
        }

        for (new_index, section) in new.sections.iter().enumerate() {
            let matched = by_identifier
                .get_mut(section.identifier())
                .and_then(VecDeque::pop_front);

            match matched {
                Some(old_index) => self.matched_sections.push(SectionMatch {
                    old_index,
                    new_index,
                    moved: false,
                }),
                None => self.inserted_sections.push(new_index),
            }
        }

        let matched_old: FxHashSet<usize> =
            self.matched_sections.iter().map(|m| m.old_index).collect();
        for old_index in 0..old.len() {
            if !matched_old.contains(&old_index) {
                self.deleted_sections.push(old_index);
            }
        }

        let old_order: Vec<usize> = self.matched_sections.iter().map(|m| m.old_index).collect();
        let stationary = longest_increasing_run(&old_order);
        for (index, matched) in self.matched_sections.iter_mut().enumerate() {
            matched.moved = !stationary.contains(&index);
        }

        // Reordered sections become a delete plus an insert.
        for matched in &self.matched_sections {
            if matched.moved {
                self.deleted_sections.push(matched.old_index);
                self.inserted_sections.push(matched.new_index);
            }
        }
    }

    fn match_items(&mut self, old: &[SectionSnapshot], new: &Content) {
        let surviving_old: FxHashSet<usize> = self
            .matched_sections
            .iter()
            .filter(|m| !m.moved)
            .map(|m| m.old_index)
            .collect();
        let surviving_new: FxHashSet<usize> = self
            .matched_sections
            .iter()
            .filter(|m| !m.moved)
            .map(|m| m.new_index)
            .collect();

        let mut by_identifier: FxHashMap<&AnyIdentifier, VecDeque<(IndexPath, &AnyItemRef)>> =
            FxHashMap::default();
        for (section_index, section) in old.iter().enumerate() {
            for (item_index, item) in section.items.iter().enumerate() {
                by_identifier
                    .entry(item.identifier())
                    .or_default()
                    .push_back((IndexPath::new(section_index, item_index), item));
            }
        }

        let mut matched_old_paths = FxHashSet::default();

        for (section_index, section) in new.sections.iter().enumerate() {
            for (item_index, item) in section.items.iter().enumerate() {
                let to = IndexPath::new(section_index, item_index);

                let matched = by_identifier
                    .get_mut(item.identifier())
                    .and_then(VecDeque::pop_front);

                match matched {
                    Some((from, old_item)) => {
                        matched_old_paths.insert(from);
                        self.matched_items.push(ItemMatch {
                            from,
                            to,
                            moved: false,
                            equivalent: old_item.any_is_equivalent(item.as_ref()),
                        });
                    }
                    None => {
                        if surviving_new.contains(&section_index) {
                            self.inserted_items.push(to);
                        }
                    }
                }
            }
        }

        for (section_index, section) in old.iter().enumerate() {
            if !surviving_old.contains(&section_index) {
                continue;
            }
            for item_index in 0..section.items.len() {
                let from = IndexPath::new(section_index, item_index);
                if !matched_old_paths.contains(&from) {
                    self.deleted_items.push(from);
                }
            }
        }

        // Structural ops for survivors whose section fate differs: an item
        // leaving a deleted section must still be inserted into its
        // surviving destination, and vice versa.
        let mut movable: Vec<usize> = Vec::new();
        for (index, matched) in self.matched_items.iter().enumerate() {
            let old_survives = surviving_old.contains(&matched.from.section);
            let new_survives = surviving_new.contains(&matched.to.section);

            match (old_survives, new_survives) {
                (true, true) => movable.push(index),
                (false, true) => self.inserted_items.push(matched.to),
                (true, false) => self.deleted_items.push(matched.from),
                (false, false) => {}
            }
        }

        // Move detection among survivors in surviving sections: the
        // largest set of items whose old order still holds stays put;
        // everything else gets a move op.
        let old_order: Vec<IndexPath> = movable
            .iter()
            .map(|&index| self.matched_items[index].from)
            .collect();
        let stationary = longest_increasing_run(&old_order);

        for (rank, &index) in movable.iter().enumerate() {
            if !stationary.contains(&rank) {
                let matched = &mut self.matched_items[index];
                matched.moved = true;
                self.moved_items.push((matched.from, matched.to));
            }
        }
    }
}

/// Positions within `values` of one longest strictly-increasing
/// subsequence. Elements outside it are the minimal set to move.
fn longest_increasing_run<T: Ord + Copy>(values: &[T]) -> FxHashSet<usize> {
    let mut tails: Vec<usize> = Vec::new();
    let mut prev: Vec<Option<usize>> = vec![None; values.len()];

    for (index, &value) in values.iter().enumerate() {
        let position = tails.partition_point(|&tail| values[tail] < value);
        if position > 0 {
            prev[index] = Some(tails[position - 1]);
        }
        if position == tails.len() {
            tails.push(index);
        } else {
            tails[position] = index;
        }
    }

    let mut keep = FxHashSet::default();
    let mut current = tails.last().copied();
    while let Some(index) = current {
        keep.insert(index);
        current = prev[index];
    }

    keep
}
