//! A recording [`ViewHost`] for driving the engine in tests.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use sectional::{BatchChanges, ViewHost};
use sectional_core::{ElementKey, Point, Rect, ReuseKey, Size, ViewHandle};
use sectional_layout::{LayoutAttributes, ScrollViewProperties};

/// The view object tests inspect after content application.
#[derive(Default)]
pub struct TestView {
    pub apply_count: usize,
    /// Whatever the test content chose to record about itself.
    pub applied: Vec<String>,
}

/// One recording host: hands out numbered view handles, measures with
/// configurable per-reuse-key sizes, and remembers everything the engine
/// told it.
pub struct RecordingHost {
    next_view: u64,
    views: FxHashMap<ViewHandle, TestView>,
    view_keys: FxHashMap<ViewHandle, ReuseKey>,
    measure_sizes: FxHashMap<ReuseKey, Size>,
    default_measure_size: Size,

    pub geometry: Vec<(ElementKey, LayoutAttributes)>,
    pub batches: Vec<(BatchChanges, bool)>,
    pub content_sizes: Vec<Size>,
    pub scroll_view_properties: Vec<ScrollViewProperties>,
    pub scrolls: Vec<(Point, bool)>,
    pub created_views: usize,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            next_view: 0,
            views: FxHashMap::default(),
            view_keys: FxHashMap::default(),
            measure_sizes: FxHashMap::default(),
            default_measure_size: Size::new(300.0, 44.0),
            geometry: Vec::new(),
            batches: Vec::new(),
            content_sizes: Vec::new(),
            scroll_view_properties: Vec::new(),
            scrolls: Vec::new(),
            created_views: 0,
        }
    }

    /// A host ready to hand to a controller, plus the shared handle tests
    /// keep for inspection.
    pub fn shared() -> Rc<RefCell<RecordingHost>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Sets the size `measure` reports for views of `reuse_key`.
    pub fn set_measure_size(&mut self, reuse_key: ReuseKey, size: Size) {
        self.measure_sizes.insert(reuse_key, size);
    }

    pub fn set_default_measure_size(&mut self, size: Size) {
        self.default_measure_size = size;
    }

    /// The most recent frame applied for `key`.
    pub fn frame(&self, key: ElementKey) -> Option<Rect> {
        self.geometry
            .iter()
            .rev()
            .find(|(applied, _)| *applied == key)
            .map(|(_, attributes)| attributes.frame)
    }

    /// The most recent z-index applied for `key`.
    pub fn z_index(&self, key: ElementKey) -> Option<u8> {
        self.geometry
            .iter()
            .rev()
            .find(|(applied, _)| *applied == key)
            .map(|(_, attributes)| attributes.z_index)
    }

    pub fn last_content_size(&self) -> Option<Size> {
        self.content_sizes.last().copied()
    }

    pub fn last_batch(&self) -> Option<&(BatchChanges, bool)> {
        self.batches.last()
    }

    pub fn view(&self, view: ViewHandle) -> &TestView {
        &self.views[&view]
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewHost for RecordingHost {
    fn create_or_reuse_view(&mut self, reuse_key: ReuseKey) -> ViewHandle {
        let handle = ViewHandle(self.next_view);
        self.next_view += 1;
        self.created_views += 1;
        self.views.insert(handle, TestView::default());
        self.view_keys.insert(handle, reuse_key);
        handle
    }

    fn view_mut(&mut self, view: ViewHandle) -> &mut dyn Any {
        let view = self
            .views
            .get_mut(&view)
            .unwrap_or_else(|| panic!("unknown view handle {view:?}"));
        view.apply_count += 1;
        view
    }

    fn measure(&mut self, view: ViewHandle, constraint: Size) -> Size {
        let size = self
            .view_keys
            .get(&view)
            .and_then(|key| self.measure_sizes.get(key))
            .copied()
            .unwrap_or(self.default_measure_size);

        Size::new(size.width.min(constraint.width), size.height.min(constraint.height))
    }

    fn apply_geometry(&mut self, key: ElementKey, attributes: &LayoutAttributes) {
        self.geometry.push((key, *attributes));
    }

    fn update_content_size(&mut self, size: Size) {
        self.content_sizes.push(size);
    }

    fn apply_batch(&mut self, changes: &BatchChanges, animated: bool) {
        self.batches.push((changes.clone(), animated));
    }

    fn update_scroll_view_properties(&mut self, properties: ScrollViewProperties) {
        self.scroll_view_properties.push(properties);
    }

    fn scroll_to(&mut self, offset: Point, animated: bool) {
        self.scrolls.push((offset, animated));
    }
}
