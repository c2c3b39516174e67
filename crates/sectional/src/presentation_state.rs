//! The live shadow tree mirroring the last content snapshot.

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;
use rustc_hash::FxHashMap;

use sectional_core::{
    AnyHeaderFooterRef, AnyIdentifier, ApplyReason, Content, ElementKey, IndexPath,
    LayoutDirection, MeasureInfo, SectionCallbacks, SectionLayouts, SizeKey, UpdateCallbacks,
};
use sectional_layout::{
    ItemLayoutInfo, ListLayoutContent, Measurer, SectionLayoutInfo, SupplementaryLayoutInfo,
};

use crate::diff::{SectionSnapshot, SectionedDiff};
use crate::header_footer_state::HeaderFooterState;
use crate::host::ViewHost;
use crate::item_state::{ItemState, PendingUpdates};
use crate::measure::MeasurementViewCache;

/// One section's slice of the state tree.
pub struct PresentationSection {
    pub identifier: AnyIdentifier,
    pub layouts: SectionLayouts,
    pub callbacks: SectionCallbacks,

    pub header: Option<HeaderFooterState>,
    pub footer: Option<HeaderFooterState>,
    pub items: Vec<ItemState>,
}

impl PresentationSection {
    fn new(identifier: AnyIdentifier) -> Self {
        Self {
            identifier,
            layouts: SectionLayouts::default(),
            callbacks: SectionCallbacks::default(),
            header: None,
            footer: None,
            items: Vec::new(),
        }
    }
}

/// The mutable shadow of the last applied content: one state object per
/// live identity, plus the un-keyed list-level slots.
///
/// Exclusively owns every [`ItemState`] and its coordinator. Updated in
/// place by each diff; the same identity keeps the same state object for
/// as long as it remains in the content.
#[derive(Default)]
pub struct PresentationState {
    pub header: Option<HeaderFooterState>,
    pub footer: Option<HeaderFooterState>,
    pub overscroll_footer: Option<HeaderFooterState>,
    pub sections: Vec<PresentationSection>,
}

impl PresentationState {
    /// What the next diff compares against.
    pub fn snapshot(&self) -> Vec<SectionSnapshot> {
        self.sections
            .iter()
            .map(|section| SectionSnapshot {
                identifier: section.identifier.clone(),
                items: section.items.iter().map(ItemState::item).collect(),
            })
            .collect()
    }

    pub fn item_at(&self, index_path: IndexPath) -> Option<&ItemState> {
        self.sections.get(index_path.section)?.items.get(index_path.item)
    }

    pub fn item_at_mut(&mut self, index_path: IndexPath) -> Option<&mut ItemState> {
        self.sections
            .get_mut(index_path.section)?
            .items
            .get_mut(index_path.item)
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|section| section.items.len()).sum()
    }

    pub fn header_footer_at_mut(&mut self, key: ElementKey) -> Option<&mut HeaderFooterState> {
        match key {
            ElementKey::ListHeader => self.header.as_mut(),
            ElementKey::ListFooter => self.footer.as_mut(),
            ElementKey::OverscrollFooter => self.overscroll_footer.as_mut(),
            ElementKey::SectionHeader(index) => self.sections.get_mut(index)?.header.as_mut(),
            ElementKey::SectionFooter(index) => self.sections.get_mut(index)?.footer.as_mut(),
            ElementKey::Item(_) => None,
        }
    }

    /// Moves an item's state during an interactive reorder.
    pub fn move_item(&mut self, from: IndexPath, to: IndexPath) {
        if from == to {
            return;
        }

        let state = self.sections[from.section].items.remove(from.item);
        self.sections[to.section].items.insert(to.item, state);
    }

    /// Finds the state for `identifier`, first match in visual order.
    pub fn index_path_for(&self, identifier: &AnyIdentifier) -> Option<IndexPath> {
        for (section_index, section) in self.sections.iter().enumerate() {
            for (item_index, item) in section.items.iter().enumerate() {
                if &item.identifier() == identifier {
                    return Some(IndexPath::new(section_index, item_index));
                }
            }
        }

        None
    }

    /// Drops every memoized size. Called when the measurement basis
    /// changes structurally, e.g. the list width changed.
    pub fn reset_cached_sizes(&mut self) {
        let clear = |slot: &mut Option<HeaderFooterState>| {
            if let Some(state) = slot {
                state.clear_cached_sizes();
            }
        };

        clear(&mut self.header);
        clear(&mut self.footer);
        clear(&mut self.overscroll_footer);

        for section in &mut self.sections {
            clear(&mut section.header);
            clear(&mut section.footer);
            for item in &mut section.items {
                item.sizes_handle().borrow_mut().clear();
            }
        }
    }

    /// Applies a diffed content snapshot to the tree.
    ///
    /// Matched identities keep their state object and are updated in
    /// place; new identities get fresh state (and coordinators); vanished
    /// identities are torn down. Caller-facing side effects queue into
    /// `callbacks`.
    pub fn update(
        &mut self,
        new: &Content,
        diff: &SectionedDiff,
        pending: &PendingUpdates,
        callbacks: &mut UpdateCallbacks,
    ) {
        update_slot(&mut self.header, &new.header);
        update_slot(&mut self.footer, &new.footer);
        update_slot(&mut self.overscroll_footer, &new.overscroll_footer);

        let mut old_sections: Vec<Option<PresentationSection>> =
            std::mem::take(&mut self.sections).into_iter().map(Some).collect();

        // Pool every old item state by identifier, in visual order, so
        // matching below is first-match-wins like the diff's.
        let mut pool: FxHashMap<AnyIdentifier, Vec<(IndexPath, ItemState)>> = FxHashMap::default();
        for (section_index, section) in old_sections.iter_mut().enumerate() {
            let section = section.as_mut().unwrap_or_else(|| unreachable!());
            for (item_index, state) in section.items.drain(..).enumerate() {
                pool.entry(state.identifier())
                    .or_default()
                    .push((IndexPath::new(section_index, item_index), state));
            }
        }
        for states in pool.values_mut() {
            states.reverse();
        }

        let matched_by_new: FxHashMap<usize, usize> = diff
            .matched_sections
            .iter()
            .map(|matched| (matched.new_index, matched.old_index))
            .collect();

        for (new_index, new_section) in new.sections.iter().enumerate() {
            let mut shell = match matched_by_new.get(&new_index) {
                Some(&old_index) => old_sections[old_index]
                    .take()
                    .unwrap_or_else(|| unreachable!("section matched twice")),
                None => PresentationSection::new(new_section.identifier().clone()),
            };

            shell.identifier = new_section.identifier().clone();
            shell.layouts = new_section.layouts;
            shell.callbacks = new_section.callbacks.clone();

            update_slot(&mut shell.header, &new_section.header);
            update_slot(&mut shell.footer, &new_section.footer);

            shell.items = new_section
                .items
                .iter()
                .enumerate()
                .map(|(item_index, item)| {
                    let to = IndexPath::new(new_index, item_index);

                    match pool.get_mut(item.identifier()).and_then(Vec::pop) {
                        Some((from, mut state)) => {
                            state.update(item.clone(), from != to, callbacks);
                            state
                        }
                        None => ItemState::new(item.clone(), pending, callbacks),
                    }
                })
                .collect();

            self.sections.push(shell);
        }

        for (_, states) in pool {
            for (_, mut state) in states {
                state.tear_down(callbacks);
            }
        }

        trace!(
            "presentation state updated: {} sections, {} items",
            self.sections.len(),
            self.item_count(),
        );
    }

    /// Tears down every live state, firing removal notifications.
    pub fn tear_down_all(&mut self, callbacks: &mut UpdateCallbacks) {
        for section in &mut self.sections {
            for item in &mut section.items {
                item.tear_down(callbacks);
            }
        }

        self.sections.clear();
        self.header = None;
        self.footer = None;
        self.overscroll_footer = None;
    }

    /// Builds the geometry tree for a layout pass; every element's
    /// measurer routes through its state's size cache into the host.
    pub fn build_layout_content(
        &self,
        direction: LayoutDirection,
        host: &Rc<RefCell<dyn ViewHost>>,
        measurement_views: &Rc<RefCell<MeasurementViewCache>>,
    ) -> ListLayoutContent {
        let supplementary = |state: &HeaderFooterState| {
            SupplementaryLayoutInfo::new(
                state.layouts(),
                header_footer_measurer(state, host, measurement_views),
            )
        };

        let sections = self
            .sections
            .iter()
            .enumerate()
            .map(|(section_index, section)| {
                let items = section
                    .items
                    .iter()
                    .enumerate()
                    .map(|(item_index, item)| {
                        ItemLayoutInfo::new(
                            item.identifier(),
                            IndexPath::new(section_index, item_index),
                            item.layouts(),
                            item_measurer(item, host, measurement_views),
                        )
                    })
                    .collect();

                SectionLayoutInfo::new(
                    section.layouts,
                    section.header.as_ref().map(supplementary),
                    section.footer.as_ref().map(supplementary),
                    items,
                )
            })
            .collect();

        ListLayoutContent::new(
            direction,
            self.header.as_ref().map(supplementary),
            self.footer.as_ref().map(supplementary),
            self.overscroll_footer.as_ref().map(supplementary),
            sections,
        )
    }
}

fn update_slot(slot: &mut Option<HeaderFooterState>, new: &Option<AnyHeaderFooterRef>) {
    match (slot.as_mut(), new) {
        (Some(state), Some(content)) => {
            state.update(content.clone());
        }
        (None, Some(content)) => *slot = Some(HeaderFooterState::new(content.clone())),
        (Some(_), None) => *slot = None,
        (None, None) => {}
    }
}

fn item_measurer(
    state: &ItemState,
    host: &Rc<RefCell<dyn ViewHost>>,
    measurement_views: &Rc<RefCell<MeasurementViewCache>>,
) -> Measurer {
    let current = state.current_handle();
    let sizes = state.sizes_handle();
    let host = host.clone();
    let measurement_views = measurement_views.clone();

    Rc::new(move |info: &MeasureInfo| {
        let item = current.borrow().clone();
        let key = SizeKey::new(info, item.sizing());

        if let Some(size) = sizes.borrow().get(&key).copied() {
            return size;
        }

        let size = item.sizing().measure(info, |constraint| {
            let reuse_key = item.reuse_key();
            let pooled = measurement_views.borrow_mut().pop(reuse_key);

            let mut host = host.borrow_mut();
            let view = pooled.unwrap_or_else(|| host.create_or_reuse_view(reuse_key));

            item.apply(host.view_mut(view), ApplyReason::Measurement);
            let measured = host.measure(view, constraint);
            drop(host);

            measurement_views.borrow_mut().push(reuse_key, view);
            measured
        });

        sizes.borrow_mut().insert(key, size);
        size
    })
}

fn header_footer_measurer(
    state: &HeaderFooterState,
    host: &Rc<RefCell<dyn ViewHost>>,
    measurement_views: &Rc<RefCell<MeasurementViewCache>>,
) -> Measurer {
    let current = state.current_handle();
    let sizes = state.sizes_handle();
    let host = host.clone();
    let measurement_views = measurement_views.clone();

    Rc::new(move |info: &MeasureInfo| {
        let content = current.borrow().clone();
        let key = SizeKey::new(info, content.sizing());

        if let Some(size) = sizes.borrow().get(&key).copied() {
            return size;
        }

        let size = content.sizing().measure(info, |constraint| {
            let reuse_key = content.reuse_key();
            let pooled = measurement_views.borrow_mut().pop(reuse_key);

            let mut host = host.borrow_mut();
            let view = pooled.unwrap_or_else(|| host.create_or_reuse_view(reuse_key));

            content.apply(host.view_mut(view), ApplyReason::Measurement);
            let measured = host.measure(view, constraint);
            drop(host);

            measurement_views.borrow_mut().push(reuse_key, view);
            measured
        });

        sizes.borrow_mut().insert(key, size);
        size
    })
}

/// A from-scratch helper for measurement-only state trees: diffs `content`
/// against nothing and returns the populated tree.
pub(crate) fn from_content(
    content: &Content,
    pending: &PendingUpdates,
    callbacks: &mut UpdateCallbacks,
) -> PresentationState {
    let mut state = PresentationState::default();
    let diff = SectionedDiff::calculate(&[], content);
    state.update(content, &diff, pending, callbacks);
    state
}
