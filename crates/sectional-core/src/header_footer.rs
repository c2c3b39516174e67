//! Header and footer slots.
//!
//! Unlike items, headers and footers carry no diffable identity: only one
//! exists per slot (list header, list footer, section header, section
//! footer, overscroll footer), located by structural position. When new
//! content is not equivalent to the old, the slot is replaced wholesale.

use std::any::Any;
use std::rc::Rc;

use crate::identifier::ReuseKey;
use crate::item::ApplyReason;
use crate::sizing::Sizing;
use crate::width::CustomWidth;

/// Caller-supplied header/footer content.
pub trait HeaderFooterContent: 'static {
    /// Whether the visual representation is unchanged from `other`.
    fn is_equivalent(&self, other: &Self) -> bool;

    /// Pushes this content into a platform view.
    fn apply(&self, view: &mut dyn Any, reason: ApplyReason);

    fn default_sizing(&self) -> Option<Sizing> {
        None
    }
}

/// Layout attributes layered over the containing defaults.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct HeaderFooterLayouts {
    pub width: CustomWidth,
}

/// One header or footer slot's content.
#[derive(Clone)]
pub struct HeaderFooter<C: HeaderFooterContent> {
    pub content: C,
    pub sizing: Sizing,
    pub layouts: HeaderFooterLayouts,

    reuse_key: ReuseKey,
}

impl<C: HeaderFooterContent> HeaderFooter<C> {
    pub fn new(content: C) -> Self {
        let sizing = content.default_sizing().unwrap_or_default();

        Self {
            content,
            sizing,
            layouts: HeaderFooterLayouts::default(),
            reuse_key: ReuseKey::of::<C>(),
        }
    }

    pub fn with(content: C, configure: impl FnOnce(&mut Self)) -> Self {
        let mut header_footer = Self::new(content);
        configure(&mut header_footer);
        header_footer
    }

    pub fn with_sizing(content: C, sizing: Sizing) -> Self {
        Self::with(content, |hf| hf.sizing = sizing)
    }

    pub fn into_any(self) -> AnyHeaderFooterRef {
        Rc::new(self)
    }
}

/// The erased capability surface of a [`HeaderFooter`].
pub trait AnyHeaderFooter {
    fn reuse_key(&self) -> ReuseKey;
    fn sizing(&self) -> Sizing;
    fn layouts(&self) -> HeaderFooterLayouts;

    fn as_any(&self) -> &dyn Any;

    /// Whether the visual representation matches `other`'s.
    ///
    /// Content of different concrete types is never equivalent.
    fn any_is_equivalent(&self, other: &dyn AnyHeaderFooter) -> bool;

    fn apply(&self, view: &mut dyn Any, reason: ApplyReason);
}

pub type AnyHeaderFooterRef = Rc<dyn AnyHeaderFooter>;

impl<C: HeaderFooterContent> AnyHeaderFooter for HeaderFooter<C> {
    fn reuse_key(&self) -> ReuseKey {
        self.reuse_key
    }

    fn sizing(&self) -> Sizing {
        self.sizing
    }

    fn layouts(&self) -> HeaderFooterLayouts {
        self.layouts
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn any_is_equivalent(&self, other: &dyn AnyHeaderFooter) -> bool {
        match other.as_any().downcast_ref::<HeaderFooter<C>>() {
            Some(other) => self.content.is_equivalent(&other.content),
            None => false,
        }
    }

    fn apply(&self, view: &mut dyn Any, reason: ApplyReason) {
        self.content.apply(view, reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Title(&'static str);

    impl HeaderFooterContent for Title {
        fn is_equivalent(&self, other: &Self) -> bool {
            self.0 == other.0
        }

        fn apply(&self, _view: &mut dyn Any, _reason: ApplyReason) {}
    }

    #[test]
    fn test_equivalence_compares_content() {
        let a = HeaderFooter::new(Title("a"));
        let b = HeaderFooter::new(Title("a"));
        let c = HeaderFooter::new(Title("c"));

        assert!(a.any_is_equivalent(&b));
        assert!(!a.any_is_equivalent(&c));
    }
}
