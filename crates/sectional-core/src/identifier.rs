//! Stable identity and view-reuse keys.
//!
//! Two distinct keys correlate content across updates:
//!
//! - [`AnyIdentifier`] answers "is this the *same* element as before" and
//!   drives diffing. It is derived from a caller-supplied hashable value
//!   plus the concrete content type, so identifiers from different content
//!   types never collide.
//! - [`ReuseKey`] answers "can these two elements share a recycled view".
//!   It is derived from the content type alone; many identities share one
//!   reuse key.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use rustc_hash::FxHasher;

/// A type-erased, hashable element identity.
///
/// Equality requires both the originating content type and the wrapped
/// value to match. The hash is computed once at construction; comparing and
/// hashing identifiers is cheap regardless of the wrapped value.
#[derive(Clone)]
pub struct AnyIdentifier {
    content_type: TypeId,
    type_name: &'static str,
    hash: u64,
    value: Rc<dyn ErasedIdentifierValue>,
}

impl AnyIdentifier {
    /// Creates an identifier for content type `C` wrapping `value`.
    pub fn new<C: 'static, V>(value: V) -> Self
    where
        V: Hash + Eq + fmt::Debug + 'static,
    {
        let content_type = TypeId::of::<C>();

        let mut hasher = FxHasher::default();
        content_type.hash(&mut hasher);
        value.hash(&mut hasher);

        Self {
            content_type,
            type_name: type_name::<C>(),
            hash: hasher.finish(),
            value: Rc::new(value),
        }
    }

    /// The `TypeId` of the content type this identifier belongs to.
    pub fn content_type(&self) -> TypeId {
        self.content_type
    }

    /// Downcasts the wrapped value, if it has type `V`.
    pub fn value<V: 'static>(&self) -> Option<&V> {
        self.value.as_any().downcast_ref()
    }
}

impl PartialEq for AnyIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.content_type == other.content_type
            && self.value.erased_eq(other.value.as_any())
    }
}

impl Eq for AnyIdentifier {}

impl Hash for AnyIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Debug for AnyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier<{}>({:?})", short_type_name(self.type_name), self.value)
    }
}

trait ErasedIdentifierValue: fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn erased_eq(&self, other: &dyn Any) -> bool;
}

impl<V: Hash + Eq + fmt::Debug + 'static> ErasedIdentifierValue for V {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn erased_eq(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<V>().is_some_and(|other| other == self)
    }
}

/// A key pooling recycled platform views by content type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReuseKey {
    content_type: TypeId,
    type_name: &'static str,
}

impl ReuseKey {
    pub fn of<C: 'static>() -> Self {
        Self {
            content_type: TypeId::of::<C>(),
            type_name: type_name::<C>(),
        }
    }
}

impl fmt::Debug for ReuseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReuseKey({})", short_type_name(self.type_name))
    }
}

fn short_type_name(name: &'static str) -> &'static str {
    name.rsplit("::").next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ContentA;
    struct ContentB;

    #[test]
    fn test_identifier_equality_requires_type_and_value() {
        let a1 = AnyIdentifier::new::<ContentA, _>("row");
        let a2 = AnyIdentifier::new::<ContentA, _>("row");
        let a3 = AnyIdentifier::new::<ContentA, _>("other");
        let b1 = AnyIdentifier::new::<ContentB, _>("row");

        assert_eq!(a1, a2);
        assert_ne!(a1, a3);
        assert_ne!(a1, b1);
    }

    #[test]
    fn test_identifier_hash_is_stable() {
        use std::collections::hash_map::DefaultHasher;

        let hash = |id: &AnyIdentifier| {
            let mut hasher = DefaultHasher::new();
            id.hash(&mut hasher);
            hasher.finish()
        };

        let a = AnyIdentifier::new::<ContentA, _>(7_u64);
        let b = AnyIdentifier::new::<ContentA, _>(7_u64);

        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn test_reuse_key_pools_by_type() {
        assert_eq!(ReuseKey::of::<ContentA>(), ReuseKey::of::<ContentA>());
        assert_ne!(ReuseKey::of::<ContentA>(), ReuseKey::of::<ContentB>());
    }
}
