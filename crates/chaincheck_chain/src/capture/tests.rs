#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use crate::model::{Expect, ExpectedPattern};
use crate::resolve::{FullTypeNames, ShortTypeNames};

#[derive(Debug, thiserror::Error)]
#[error("runtime failure")]
struct RuntimeFailure;

#[derive(Debug, thiserror::Error)]
#[error("while doing stuff:")]
struct LogicFailure {
    #[source]
    inner: RuntimeFailure,
}

#[derive(Debug, thiserror::Error)]
#[error("layer")]
struct Layer;

fn capture_with(registry: &TypeRegistry, raised: &Raised) -> Result<ErrorChain, ChainError> {
    let mut resolver = ShortTypeNames::new();
    ChainCapture::new(registry, &mut resolver).capture(raised)
}

fn names(chain: &ErrorChain) -> Vec<&str> {
    chain.iter().map(ChainElement::display_name).collect()
}

#[test]
fn test_capture_single_error() {
    let chain = capture_with(&TypeRegistry::empty(), &Raised::new(RuntimeFailure)).unwrap();
    assert_eq!(names(&chain), vec!["RuntimeFailure"]);
    assert_eq!(chain[0].message(), Some("runtime failure"));
    assert_eq!(chain[0].tag(), &TypeTag::of::<RuntimeFailure>());
}

#[test]
fn test_capture_follows_registered_sources() {
    let mut registry = TypeRegistry::empty();
    registry.register::<RuntimeFailure>();
    let raised = Raised::new(LogicFailure {
        inner: RuntimeFailure,
    });
    let chain = capture_with(&registry, &raised).unwrap();
    assert_eq!(names(&chain), vec!["LogicFailure", "RuntimeFailure"]);
    assert_eq!(chain[1].message(), Some("runtime failure"));
}

#[test]
fn test_capture_unregistered_source_keeps_message() {
    let raised = Raised::new(LogicFailure {
        inner: RuntimeFailure,
    });
    let chain = capture_with(&TypeRegistry::empty(), &raised).unwrap();
    assert_eq!(names(&chain), vec!["LogicFailure", "dyn Error"]);
    assert_eq!(chain[1].message(), Some("runtime failure"));
}

#[test]
fn test_capture_boxed_error_identified_by_registry() {
    let raised = Raised::boxed(Box::new("x".parse::<i32>().unwrap_err()));
    let chain = capture_with(&TypeRegistry::default(), &raised).unwrap();
    assert_eq!(names(&chain), vec!["ParseIntError"]);
}

#[test]
fn test_capture_foreign_value_is_single_unknown() {
    let chain = capture_with(&TypeRegistry::default(), &Raised::foreign(42_i32)).unwrap();
    assert_eq!(chain.len(), 1);
    assert!(chain[0].is_unknown());
    assert_eq!(chain[0].message(), None);
}

#[test]
fn test_capture_nested_foreign_value() {
    let raised = Raised::foreign(42_i32).nest(RuntimeFailure);
    let chain = capture_with(&TypeRegistry::default(), &raised).unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[0].display_name(), "RuntimeFailure");
    assert!(chain[1].is_unknown());
}

#[test]
fn test_capture_nest_takes_precedence_over_source() {
    let raised = Raised::new(Layer).nest(LogicFailure {
        inner: RuntimeFailure,
    });
    let chain = capture_with(&TypeRegistry::empty(), &raised).unwrap();
    assert_eq!(names(&chain), vec!["LogicFailure", "Layer"]);
}

#[test]
fn test_capture_panic_message() {
    let raised = Raised::Panic {
        message: "index out of bounds".to_owned(),
    };
    let chain = capture_with(&TypeRegistry::default(), &raised).unwrap();
    assert_eq!(names(&chain), vec!["panic"]);
    assert_eq!(chain[0].message(), Some("index out of bounds"));
}

#[test]
fn test_capture_uses_given_resolver() {
    let registry = TypeRegistry::empty();
    let mut resolver = FullTypeNames;
    let chain = ChainCapture::new(&registry, &mut resolver)
        .capture(&Raised::new(Layer))
        .unwrap();
    assert_eq!(chain[0].display_name(), std::any::type_name::<Layer>());
}

fn nested(depth: usize) -> Raised {
    let mut raised = Raised::new(Layer);
    for _ in 1..depth {
        raised = raised.nest(Layer);
    }
    raised
}

#[test]
fn test_capture_at_depth_limit() {
    let chain = capture_with(&TypeRegistry::empty(), &nested(MAX_CHAIN_DEPTH)).unwrap();
    assert_eq!(chain.len(), MAX_CHAIN_DEPTH);
}

#[test]
fn test_capture_beyond_depth_limit() {
    let result = capture_with(&TypeRegistry::empty(), &nested(MAX_CHAIN_DEPTH + 1));
    assert_eq!(
        result.unwrap_err(),
        ChainError::TooDeep {
            limit: MAX_CHAIN_DEPTH
        }
    );
}

mod first {
    #[derive(Debug, thiserror::Error)]
    #[error("bad")]
    pub struct Error;
}

mod second {
    #[derive(Debug, thiserror::Error)]
    #[error("bad")]
    pub struct Error;
}

#[test]
fn test_same_named_types_from_different_modules_differ() {
    let registry = TypeRegistry::empty();
    let mut resolver = ShortTypeNames::new();
    let expected = ExpectedPattern::resolve(&[Expect::of::<first::Error>("bad")], &mut resolver);
    let chain = ChainCapture::new(&registry, &mut resolver)
        .capture(&Raised::new(second::Error))
        .unwrap();

    assert_eq!(expected[0].display_name(), "Error");
    assert!(chain[0].display_name().ends_with("second::Error"));
    assert!(!crate::compare(&chain, &expected).matched());

    let same = ChainCapture::new(&registry, &mut resolver)
        .capture(&Raised::new(first::Error))
        .unwrap();
    assert!(crate::compare(&same, &expected).matched());
}
