//! Error chain capture.
//!
//! Walks a [`Raised`] value from the outermost error to its root cause and
//! records one [`ChainElement`] per level. Explicitly nested causes (see
//! [`Raised::nest`]) are followed first; otherwise the walk continues through
//! `std::error::Error::source()`.

use std::error::Error;

use crate::error::ChainError;
use crate::model::{ChainElement, ErrorChain};
use crate::raised::Raised;
use crate::resolve::{display_name, TypeNameResolver, TypeRegistry};
use crate::tag::TypeTag;

/// Maximum number of elements in a captured chain.
///
/// Anything deeper is treated as a cycle in the cause graph.
pub const MAX_CHAIN_DEPTH: usize = 128;

/// One level still to be described.
#[derive(Clone, Copy)]
enum Level<'r> {
    Raised(&'r Raised),
    Source(&'r (dyn Error + 'static)),
}

/// Captures error chains, naming each level through a resolver.
pub struct ChainCapture<'a> {
    registry: &'a TypeRegistry,
    resolver: &'a mut dyn TypeNameResolver,
}

impl<'a> ChainCapture<'a> {
    pub fn new(registry: &'a TypeRegistry, resolver: &'a mut dyn TypeNameResolver) -> Self {
        ChainCapture { registry, resolver }
    }

    /// Capture the chain of `raised`, outermost first.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn capture(&mut self, raised: &Raised) -> Result<ErrorChain, ChainError> {
        let (outermost, mut next) = self.describe(Level::Raised(raised));
        let mut chain = ErrorChain::starting_with(outermost);

        while let Some(level) = next {
            if chain.len() == MAX_CHAIN_DEPTH {
                tracing::warn!(limit = MAX_CHAIN_DEPTH, "error chain exceeds capture limit");
                return Err(ChainError::TooDeep {
                    limit: MAX_CHAIN_DEPTH,
                });
            }
            let (element, following) = self.describe(level);
            chain.push(element);
            next = following;
        }

        tracing::debug!(depth = chain.len(), "captured error chain");
        Ok(chain)
    }

    /// Describe one level and find the level below it.
    fn describe<'r>(&mut self, level: Level<'r>) -> (ChainElement, Option<Level<'r>>) {
        match level {
            Level::Raised(Raised::Error { tag, error, cause }) => {
                let tag = match tag {
                    Some(tag) => tag.clone(),
                    None => self.registry.identify(&**error),
                };
                let element = self.element(tag, error.to_string());
                let next = match cause.as_deref() {
                    Some(cause) => Some(Level::Raised(cause)),
                    None => error.source().map(Level::Source),
                };
                (element, next)
            }
            Level::Raised(Raised::Panic { message }) => {
                (self.element(TypeTag::panic(), message.clone()), None)
            }
            Level::Raised(Raised::Foreign(_)) => (ChainElement::unknown(), None),
            Level::Source(error) => {
                let tag = self.registry.identify(error);
                let element = self.element(tag, error.to_string());
                (element, error.source().map(Level::Source))
            }
        }
    }

    fn element(&mut self, tag: TypeTag, message: String) -> ChainElement {
        let name = display_name(&mut *self.resolver, &tag);
        ChainElement::new(tag, name, message)
    }
}

#[cfg(test)]
mod tests;
