//! Type name resolution.
//!
//! Two separate jobs live here:
//!
//! - [`TypeRegistry`] turns a `&dyn Error` into a [`TypeTag`]. Stable Rust has
//!   no way to ask a trait object for its concrete type, so the registry
//!   tests each registered type with `downcast_ref`.
//! - [`TypeNameResolver`] turns a tag into the name shown in reports.

use std::any::TypeId;
use std::error::Error;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::tag::TypeTag;

/// Resolves a type tag to a human-readable name.
pub trait TypeNameResolver {
    /// Resolve `tag`, or return `None` if it cannot be resolved.
    ///
    /// The returned string may borrow from the resolver's own state, so it
    /// is only valid until the next call.
    fn resolve<'a>(&'a mut self, tag: &'a TypeTag) -> Option<&'a str>;
}

/// Resolve `tag` through `resolver`, falling back to the raw tag name.
pub(crate) fn display_name(resolver: &mut dyn TypeNameResolver, tag: &TypeTag) -> String {
    match resolver.resolve(tag) {
        Some(name) => name.to_owned(),
        None => tag.raw().to_owned(),
    }
}

/// Which resolver a run uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeNameStyle {
    /// Strip module paths: `alloc::boxed::Box<my::Error>` becomes `Box<Error>`,
    /// unless another type already showed up under that name.
    #[default]
    Short,
    /// Show the compiler-provided name unchanged.
    Full,
}

impl TypeNameStyle {
    /// Create a resolver for this style.
    pub fn resolver(self) -> Box<dyn TypeNameResolver> {
        match self {
            TypeNameStyle::Short => Box::new(ShortTypeNames::new()),
            TypeNameStyle::Full => Box::new(FullTypeNames),
        }
    }
}

/// Resolver that returns raw names unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct FullTypeNames;

impl TypeNameResolver for FullTypeNames {
    fn resolve<'a>(&'a mut self, tag: &'a TypeTag) -> Option<&'a str> {
        let raw = tag.raw();
        if raw.is_empty() {
            None
        } else {
            Some(raw)
        }
    }
}

/// Resolver that strips module paths from every path in a type name.
///
/// Two distinct types never share a name: once a short name is taken, any
/// other type that shortens to it keeps its full name. A type keeps the
/// name it was first given for the lifetime of the resolver.
#[derive(Debug, Default)]
pub struct ShortTypeNames {
    buf: String,
    /// Raw name to display name.
    assigned: FxHashMap<String, String>,
    taken: FxHashSet<String>,
}

impl ShortTypeNames {
    pub fn new() -> Self {
        ShortTypeNames::default()
    }
}

impl TypeNameResolver for ShortTypeNames {
    fn resolve<'a>(&'a mut self, tag: &'a TypeTag) -> Option<&'a str> {
        let raw = tag.raw();
        if raw.is_empty() {
            return None;
        }
        if !self.assigned.contains_key(raw) {
            shorten_into(raw, &mut self.buf);
            let name = if self.taken.contains(self.buf.as_str()) {
                tracing::debug!(raw, short = %self.buf, "short type name taken, keeping full name");
                raw.to_owned()
            } else {
                self.buf.clone()
            };
            self.taken.insert(name.clone());
            self.assigned.insert(raw.to_owned(), name);
        }
        self.assigned.get(raw).map(String::as_str)
    }
}

/// Whether `c` ends a path segment in a type name.
#[inline]
fn ends_path(c: char) -> bool {
    !(c.is_alphanumeric() || c == '_' || c == '{' || c == '}')
}

/// Write `raw` into `out`, dropping everything before the last `::` of each path.
fn shorten_into(raw: &str, out: &mut String) {
    out.clear();
    // Start of the path currently being copied, as an offset into `out`.
    let mut path_start = 0;
    let mut rest = raw;
    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("::") {
            out.truncate(path_start);
            rest = after;
            continue;
        }
        out.push(c);
        if ends_path(c) {
            path_start = out.len();
        }
        rest = &rest[c.len_utf8()..];
    }
}

type Matcher = fn(&(dyn Error + 'static)) -> bool;

fn is_type<T: Error + 'static>(error: &(dyn Error + 'static)) -> bool {
    error.is::<T>()
}

/// A type the registry can recognize behind `dyn Error`.
struct RegisteredType {
    tag: TypeTag,
    matches: Matcher,
}

/// Error types that can be identified behind a `dyn Error`.
///
/// The default registry knows the public error types of the standard library.
pub struct TypeRegistry {
    types: Vec<RegisteredType>,
    known: FxHashSet<TypeId>,
}

impl TypeRegistry {
    /// A registry that knows no types.
    pub fn empty() -> Self {
        TypeRegistry {
            types: Vec::new(),
            known: FxHashSet::default(),
        }
    }

    /// A registry pre-populated with the standard library's error types.
    pub fn with_std_types() -> Self {
        let mut registry = Self::empty();
        registry
            .register::<std::io::Error>()
            .register::<std::fmt::Error>()
            .register::<std::num::ParseIntError>()
            .register::<std::num::ParseFloatError>()
            .register::<std::num::TryFromIntError>()
            .register::<std::str::ParseBoolError>()
            .register::<std::char::ParseCharError>()
            .register::<std::char::CharTryFromError>()
            .register::<std::str::Utf8Error>()
            .register::<std::string::FromUtf8Error>()
            .register::<std::string::FromUtf16Error>()
            .register::<std::array::TryFromSliceError>()
            .register::<std::net::AddrParseError>()
            .register::<std::env::VarError>()
            .register::<std::ffi::NulError>()
            .register::<std::time::SystemTimeError>()
            .register::<std::cell::BorrowError>()
            .register::<std::cell::BorrowMutError>()
            .register::<std::sync::mpsc::RecvError>();
        registry
    }

    /// Make `T` recognizable. Registering a type twice has no effect.
    pub fn register<T: Error + 'static>(&mut self) -> &mut Self {
        if self.known.insert(TypeId::of::<T>()) {
            self.types.push(RegisteredType {
                tag: TypeTag::of::<T>(),
                matches: is_type::<T>,
            });
        }
        self
    }

    /// Whether `T` has been registered.
    pub fn contains<T: Error + 'static>(&self) -> bool {
        self.known.contains(&TypeId::of::<T>())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Identify the concrete type behind `error`.
    ///
    /// Unregistered types get [`TypeTag::unregistered`].
    pub fn identify(&self, error: &(dyn Error + 'static)) -> TypeTag {
        self.types
            .iter()
            .find(|registered| (registered.matches)(error))
            .map_or_else(TypeTag::unregistered, |registered| registered.tag.clone())
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_std_types()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.types.iter().map(|registered| registered.tag.raw()))
            .finish()
    }
}

#[cfg(test)]
mod tests;
