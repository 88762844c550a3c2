//! Error chain capture, comparison and rendering.
//!
//! A failing check in `chaincheck` does not just say "an error happened". It
//! records the whole chain of causes, outermost first, and lines it up against
//! the chain the test author expected:
//!
//! ```text
//! Raised (escaping value)
//!     │
//!     ▼
//! ChainCapture ──► ErrorChain ◄── ExpectedPattern
//!                      │              │
//!                      └──► compare ◄─┘
//!                              │
//!                              ▼
//!                      ComparisonVerdict ──► render() ──► aligned text
//! ```
//!
//! Type names come from a [`TypeNameResolver`]; since `dyn Error` carries no
//! runtime type information on stable Rust, nested causes are identified by
//! probing the types known to a [`TypeRegistry`].

mod capture;
mod compare;
mod error;
mod model;
mod raised;
mod render;
mod resolve;
mod tag;

pub use capture::{ChainCapture, MAX_CHAIN_DEPTH};
pub use compare::{compare, ComparisonVerdict, ElementDiff, LinePair, PresentationMode};
pub use error::ChainError;
pub use model::{
    elements_equal, split_into_lines, ChainElement, ErrorChain, Expect, ExpectedPattern,
};
pub use raised::{Escape, Flow, Interrupt, NestExt, Raised};
pub use render::{render, render_chain, MESSAGE_INDENT};
pub use resolve::{FullTypeNames, ShortTypeNames, TypeNameResolver, TypeNameStyle, TypeRegistry};
pub use tag::TypeTag;
