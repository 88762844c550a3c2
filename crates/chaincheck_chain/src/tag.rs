//! Runtime type tags.

use std::any::{type_name, TypeId};
use std::borrow::Cow;
use std::fmt;

/// Raw name used for error sources whose concrete type is not registered.
const UNREGISTERED_ERROR: &str = "dyn core::error::Error";

/// Raw name used for panics carrying a text payload.
const PANIC: &str = "panic";

/// Opaque, comparable tag identifying the runtime type of a chain element.
///
/// Tags built from a static type carry its `TypeId` and its compiler-provided
/// name. Tags for values whose type is only known by name (expected elements
/// written by hand, panics, unregistered error sources) carry no `TypeId`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeTag {
    id: Option<TypeId>,
    raw: Cow<'static, str>,
}

impl TypeTag {
    /// Tag for the static type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeTag {
            id: Some(TypeId::of::<T>()),
            raw: Cow::Borrowed(type_name::<T>()),
        }
    }

    /// Tag carrying only a name.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        TypeTag {
            id: None,
            raw: name.into(),
        }
    }

    /// Tag for an error source whose concrete type could not be identified.
    pub fn unregistered() -> Self {
        Self::named(UNREGISTERED_ERROR)
    }

    /// Tag for a panic with a text payload.
    pub fn panic() -> Self {
        Self::named(PANIC)
    }

    /// The `TypeId`, when the tag was built from a static type.
    #[inline]
    pub fn type_id(&self) -> Option<TypeId> {
        self.id
    }

    /// The raw, unresolved type name.
    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
