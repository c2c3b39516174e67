//! Canned content types for exercising the engine.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use sectional_core::{
    AnyItem, ApplyReason, Content, CoordinatorActions, HeaderFooter, HeaderFooterContent, Item,
    ItemContent, ItemCoordinator, Section,
};

use crate::host::TestView;

/// The simplest useful item: identified by `id`, equivalent when `text`
/// matches, records its text into the bound [`TestView`].
#[derive(Clone, Debug, PartialEq)]
pub struct TestRow {
    pub id: u32,
    pub text: String,
}

impl TestRow {
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self { id, text: text.into() }
    }
}

impl ItemContent for TestRow {
    type Identifier = u32;

    fn identifier(&self) -> u32 {
        self.id
    }

    fn is_equivalent(&self, other: &Self) -> bool {
        self.text == other.text
    }

    fn apply(&self, view: &mut dyn Any, _reason: ApplyReason) {
        if let Some(view) = view.downcast_mut::<TestView>() {
            view.applied.push(self.text.clone());
        }
    }
}

/// Shared log of coordinator lifecycle events, in firing order.
pub type CoordinatorLog = Rc<RefCell<Vec<String>>>;

/// An item whose coordinator reports every lifecycle hook into a shared
/// log, for asserting on state survival across updates.
#[derive(Clone)]
pub struct CoordinatedRow {
    pub id: u32,
    pub text: String,
    pub log: CoordinatorLog,
    pub live_coordinators: Rc<Cell<usize>>,
}

impl CoordinatedRow {
    pub fn new(id: u32, text: impl Into<String>, log: &CoordinatorLog, live: &Rc<Cell<usize>>) -> Self {
        Self {
            id,
            text: text.into(),
            log: log.clone(),
            live_coordinators: live.clone(),
        }
    }
}

struct LoggingCoordinator {
    id: u32,
    log: CoordinatorLog,
    live: Rc<Cell<usize>>,
}

impl LoggingCoordinator {
    fn record(&self, event: &str) {
        self.log.borrow_mut().push(format!("{}:{event}", self.id));
    }
}

impl ItemCoordinator for LoggingCoordinator {
    fn was_created(&mut self) {
        self.record("created");
    }

    fn was_updated(&mut self, _old: &dyn AnyItem, _new: &dyn AnyItem) {
        self.record("updated");
    }

    fn was_removed(&mut self) {
        self.record("removed");
        self.live.set(self.live.get() - 1);
    }

    fn was_selected(&mut self) {
        self.record("selected");
    }

    fn was_deselected(&mut self) {
        self.record("deselected");
    }
}

impl ItemContent for CoordinatedRow {
    type Identifier = u32;

    fn identifier(&self) -> u32 {
        self.id
    }

    fn is_equivalent(&self, other: &Self) -> bool {
        self.text == other.text
    }

    fn apply(&self, view: &mut dyn Any, _reason: ApplyReason) {
        if let Some(view) = view.downcast_mut::<TestView>() {
            view.applied.push(self.text.clone());
        }
    }

    fn make_coordinator(&self, _actions: CoordinatorActions) -> Option<Box<dyn ItemCoordinator>> {
        self.live_coordinators.set(self.live_coordinators.get() + 1);
        Some(Box::new(LoggingCoordinator {
            id: self.id,
            log: self.log.clone(),
            live: self.live_coordinators.clone(),
        }))
    }
}

/// A header or footer equivalent when its title matches.
#[derive(Clone, Debug, PartialEq)]
pub struct TestHeader {
    pub title: String,
}

impl TestHeader {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }
}

impl HeaderFooterContent for TestHeader {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.title == other.title
    }

    fn apply(&self, view: &mut dyn Any, _reason: ApplyReason) {
        if let Some(view) = view.downcast_mut::<TestView>() {
            view.applied.push(self.title.clone());
        }
    }
}

/// One section of [`TestRow`]s identified by `id`.
pub fn rows_section(id: &'static str, rows: &[(u32, &str)]) -> Section {
    Section::with(id, |section| {
        for &(row_id, text) in rows {
            section.add(TestRow::new(row_id, text));
        }
    })
}

/// Content made of [`rows_section`]s.
pub fn rows_content(sections: &[(&'static str, &[(u32, &str)])]) -> Content {
    Content::new(|content| {
        for &(id, rows) in sections {
            content.add(rows_section(id, rows));
        }
    })
}

/// A standalone erased item for tests that bypass content building.
pub fn row_item(id: u32, text: &str) -> Item<TestRow> {
    Item::new(TestRow::new(id, text))
}

/// A standalone erased header for list or section chrome.
pub fn header(title: &str) -> HeaderFooter<TestHeader> {
    HeaderFooter::new(TestHeader::new(title))
}
