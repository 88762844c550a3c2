//! Values that escape a test body or a checked expression.
//!
//! A test body returns [`Flow`]. Its error side, [`Escape`], is either a
//! [`Raised`] value (something went wrong) or an [`Interrupt`] (stop this test
//! now; whatever failure caused it has already been recorded).
//!
//! `?` converts any `std::error::Error + Send + Sync + 'static` into both
//! `Raised` and `Escape`, so bodies can propagate ordinary errors directly.

use std::any::Any;
use std::error::Error;
use std::fmt;

use crate::tag::TypeTag;

/// Result type of test bodies.
pub type Flow<T = ()> = Result<T, Escape>;

/// Control signal that ends the current test body early.
///
/// It does not fail the test by itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Interrupt;

/// Why a body stopped before completing normally.
#[derive(Debug)]
pub enum Escape {
    /// An error escaped.
    Raised(Raised),
    /// The body was interrupted.
    Interrupt,
}

impl Escape {
    #[inline]
    pub fn is_interrupt(&self) -> bool {
        matches!(self, Escape::Interrupt)
    }
}

impl From<Interrupt> for Escape {
    fn from(_: Interrupt) -> Self {
        Escape::Interrupt
    }
}

impl From<Raised> for Escape {
    fn from(raised: Raised) -> Self {
        Escape::Raised(raised)
    }
}

impl<E: Error + Send + Sync + 'static> From<E> for Escape {
    fn from(error: E) -> Self {
        Escape::Raised(Raised::new(error))
    }
}

/// A value that escaped, with everything needed to describe its cause chain.
pub enum Raised {
    /// An error value.
    Error {
        /// The error's type, or `None` to identify it through the registry.
        tag: Option<TypeTag>,
        error: Box<dyn Error + Send + Sync + 'static>,
        /// Cause attached with [`Raised::nest`]. Takes precedence over
        /// `error.source()`.
        cause: Option<Box<Raised>>,
    },
    /// A panic whose payload was a string.
    Panic { message: String },
    /// A value that is not an error and cannot be introspected.
    Foreign(Box<dyn Any + Send>),
}

impl Raised {
    /// Wrap a typed error.
    pub fn new<E: Error + Send + Sync + 'static>(error: E) -> Self {
        Raised::Error {
            tag: Some(TypeTag::of::<E>()),
            error: Box::new(error),
            cause: None,
        }
    }

    /// Wrap an already boxed error. Its type is identified at capture time.
    pub fn boxed(error: Box<dyn Error + Send + Sync + 'static>) -> Self {
        Raised::Error {
            tag: None,
            error,
            cause: None,
        }
    }

    /// Wrap an arbitrary value that is not an error.
    pub fn foreign<T: Any + Send>(value: T) -> Self {
        Raised::Foreign(Box::new(value))
    }

    /// Interpret a panic payload caught with `catch_unwind`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<String>() {
            Ok(message) => return Raised::Panic { message: *message },
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<&'static str>() {
            Ok(message) => {
                return Raised::Panic {
                    message: (*message).to_owned(),
                }
            }
            Err(payload) => payload,
        };
        match payload.downcast::<Raised>() {
            Ok(raised) => *raised,
            Err(payload) => Raised::Foreign(payload),
        }
    }

    /// Make `self` the cause of `outer`, returning the combined value.
    ///
    /// `outer` becomes the outermost element of the captured chain.
    #[must_use]
    pub fn nest<E: Error + Send + Sync + 'static>(self, outer: E) -> Self {
        Raised::Error {
            tag: Some(TypeTag::of::<E>()),
            error: Box::new(outer),
            cause: Some(Box::new(self)),
        }
    }

    /// Whether this is a value that cannot be introspected.
    #[inline]
    pub fn is_foreign(&self) -> bool {
        matches!(self, Raised::Foreign(_))
    }
}

impl<E: Error + Send + Sync + 'static> From<E> for Raised {
    fn from(error: E) -> Self {
        Raised::new(error)
    }
}

impl fmt::Debug for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raised::Error { tag, error, cause } => f
                .debug_struct("Error")
                .field("tag", tag)
                .field("error", error)
                .field("cause", cause)
                .finish(),
            Raised::Panic { message } => f.debug_struct("Panic").field("message", message).finish(),
            Raised::Foreign(_) => f.write_str("Foreign(..)"),
        }
    }
}

/// Attach an outer error to the error side of a `Result`.
pub trait NestExt<T> {
    /// Nest the error, if any, inside the error built by `outer`.
    fn nest_in<O, F>(self, outer: F) -> Result<T, Raised>
    where
        O: Error + Send + Sync + 'static,
        F: FnOnce() -> O;
}

impl<T, E: Into<Raised>> NestExt<T> for Result<T, E> {
    fn nest_in<O, F>(self, outer: F) -> Result<T, Raised>
    where
        O: Error + Send + Sync + 'static,
        F: FnOnce() -> O,
    {
        self.map_err(|error| error.into().nest(outer()))
    }
}
