//! Error chain value types.
//!
//! Both sides of a comparison use the same element type: an [`ErrorChain`]
//! is what was caught, an [`ExpectedPattern`] is what the test author asked
//! for. Both are ordered from the outermost error to the root cause.

use std::borrow::Cow;
use std::ops::Deref;

use smallvec::SmallVec;

use crate::resolve::{display_name, TypeNameResolver};
use crate::tag::TypeTag;

/// One level of an error chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChainElement {
    tag: TypeTag,
    display_name: String,
    message: Option<String>,
}

impl ChainElement {
    /// A known element.
    pub fn new(tag: TypeTag, display_name: impl Into<String>, message: impl Into<String>) -> Self {
        ChainElement {
            tag,
            display_name: display_name.into(),
            message: Some(message.into()),
        }
    }

    /// The sentinel for a value that is not an introspectable error.
    ///
    /// It has an empty display name and no message at all, which is distinct
    /// from an empty message.
    pub fn unknown() -> Self {
        ChainElement {
            tag: TypeTag::named(""),
            display_name: String::new(),
            message: None,
        }
    }

    #[inline]
    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    #[inline]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether this is the "unknown" sentinel.
    #[inline]
    pub fn is_unknown(&self) -> bool {
        self.display_name.is_empty()
    }

    /// Lines of the message, or none for the unknown sentinel.
    pub fn message_lines(&self) -> Vec<&str> {
        if self.is_unknown() {
            Vec::new()
        } else {
            split_into_lines(self.message())
        }
    }
}

/// Two elements are equal when both display names and both messages are.
///
/// An absent message never equals an empty one.
pub fn elements_equal(a: &ChainElement, b: &ChainElement) -> bool {
    a.display_name == b.display_name && a.message == b.message
}

/// Split a message on line breaks.
///
/// An absent message has no lines; an empty message has one empty line.
pub fn split_into_lines(message: Option<&str>) -> Vec<&str> {
    match message {
        Some(text) => text.split('\n').collect(),
        None => Vec::new(),
    }
}

/// A captured chain of errors, outermost first. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorChain {
    elements: SmallVec<[ChainElement; 4]>,
}

impl ErrorChain {
    /// Start a chain at its outermost element.
    pub(crate) fn starting_with(outermost: ChainElement) -> Self {
        let mut elements = SmallVec::new();
        elements.push(outermost);
        ErrorChain { elements }
    }

    /// Append the next, deeper cause.
    pub(crate) fn push(&mut self, cause: ChainElement) {
        self.elements.push(cause);
    }
}

impl Deref for ErrorChain {
    type Target = [ChainElement];

    fn deref(&self) -> &[ChainElement] {
        &self.elements
    }
}

/// One expected level, as written by the test author.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expect {
    /// An error of a static type, named through the active resolver.
    Type { tag: TypeTag, message: String },
    /// An error whose display name is given literally.
    Named { name: String, message: String },
}

impl Expect {
    /// Expect an error of type `T` with the given message.
    pub fn of<T: ?Sized + 'static>(message: impl Into<String>) -> Self {
        Expect::Type {
            tag: TypeTag::of::<T>(),
            message: message.into(),
        }
    }

    /// Expect an error displayed as `name` with the given message.
    pub fn named(name: impl Into<String>, message: impl Into<String>) -> Self {
        Expect::Named {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Expect a panic with the given message.
    pub fn panic(message: impl Into<String>) -> Self {
        Expect::Type {
            tag: TypeTag::panic(),
            message: message.into(),
        }
    }
}

/// The chain a test expects, outermost first. Empty accepts any error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpectedPattern {
    elements: Vec<ChainElement>,
}

impl ExpectedPattern {
    /// The empty pattern, accepting any error chain.
    pub fn any() -> Self {
        ExpectedPattern::default()
    }

    /// Resolve author-written expectations to display names.
    ///
    /// Uses the same resolver as capture so both sides name types alike.
    pub fn resolve(expectations: &[Expect], resolver: &mut dyn TypeNameResolver) -> Self {
        let elements = expectations
            .iter()
            .map(|expect| match expect {
                Expect::Type { tag, message } => {
                    let name = display_name(resolver, tag);
                    ChainElement::new(tag.clone(), name, message.as_str())
                }
                Expect::Named { name, message } => ChainElement::new(
                    TypeTag::named(Cow::Owned(name.clone())),
                    name.as_str(),
                    message.as_str(),
                ),
            })
            .collect();
        ExpectedPattern { elements }
    }

    /// A pattern that matches exactly the given chain.
    pub fn from_chain(chain: &ErrorChain) -> Self {
        ExpectedPattern {
            elements: chain.to_vec(),
        }
    }

    /// Build a pattern from already-resolved elements.
    pub fn from_elements(elements: Vec<ChainElement>) -> Self {
        ExpectedPattern { elements }
    }
}

impl Deref for ExpectedPattern {
    type Target = [ChainElement];

    fn deref(&self) -> &[ChainElement] {
        &self.elements
    }
}

#[cfg(test)]
mod tests;
