//! Pooling of throwaway measurement views.

use rustc_hash::FxHashMap;

use sectional_core::{ReuseKey, ViewHandle};

/// A pool of views used only to measure content, keyed by reuse key.
///
/// Sizing a `ThatFits` element needs a real view to apply content to and
/// ask for a fitting size. Constructing one per measurement would dominate
/// the layout pass, so measured-with views return here and are handed out
/// again for the next element of the same shape.
#[derive(Default)]
pub struct MeasurementViewCache {
    views: FxHashMap<ReuseKey, Vec<ViewHandle>>,
}

impl MeasurementViewCache {
    pub fn pop(&mut self, reuse_key: ReuseKey) -> Option<ViewHandle> {
        self.views.get_mut(&reuse_key)?.pop()
    }

    pub fn push(&mut self, reuse_key: ReuseKey, view: ViewHandle) {
        self.views.entry(reuse_key).or_default().push(view);
    }

    pub fn clear(&mut self) {
        self.views.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pooled_views_are_reused_per_key() {
        struct ContentA;
        struct ContentB;

        let key_a = ReuseKey::of::<ContentA>();
        let key_b = ReuseKey::of::<ContentB>();

        let mut cache = MeasurementViewCache::default();

        assert_eq!(cache.pop(key_a), None);

        cache.push(key_a, ViewHandle(1));
        cache.push(key_b, ViewHandle(2));

        assert_eq!(cache.pop(key_a), Some(ViewHandle(1)));
        assert_eq!(cache.pop(key_a), None);
        assert_eq!(cache.pop(key_b), Some(ViewHandle(2)));
    }
}
