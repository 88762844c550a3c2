use super::*;
use crate::resolve::ShortTypeNames;

/// Only ever used as a type.
enum Marker {}

#[test]
fn test_split_absent_message_has_no_lines() {
    assert!(split_into_lines(None).is_empty());
}

#[test]
fn test_split_empty_message_has_one_line() {
    assert_eq!(split_into_lines(Some("")), vec![""]);
}

#[test]
fn test_split_keeps_trailing_empty_line() {
    assert_eq!(split_into_lines(Some("a\nb\n")), vec!["a", "b", ""]);
}

#[test]
fn test_elements_equal_distinguishes_absent_from_empty() {
    let unknown = ChainElement::unknown();
    let empty = ChainElement::new(TypeTag::named(""), "", "");
    assert!(!elements_equal(&unknown, &empty));
    assert!(elements_equal(&unknown, &ChainElement::unknown()));
}

#[test]
fn test_elements_equal_ignores_tag_identity() {
    let a = ChainElement::new(TypeTag::of::<Marker>(), "Marker", "boom");
    let b = ChainElement::new(TypeTag::named("Marker"), "Marker", "boom");
    assert!(elements_equal(&a, &b));
}

#[test]
fn test_unknown_element_has_no_message_lines() {
    assert!(ChainElement::unknown().message_lines().is_empty());
    assert!(ChainElement::unknown().is_unknown());
}

#[test]
fn test_chain_grows_outermost_first() {
    let mut chain = ErrorChain::starting_with(ChainElement::new(TypeTag::named("Outer"), "Outer", "a"));
    assert_eq!(chain.len(), 1);
    chain.push(ChainElement::new(TypeTag::named("Inner"), "Inner", "b"));
    assert_eq!(chain[0].display_name(), "Outer");
    assert_eq!(chain[1].display_name(), "Inner");
    assert_eq!(chain.len(), 2);
}

#[test]
fn test_resolve_pattern_uses_resolver_for_types() {
    let mut resolver = ShortTypeNames::new();
    let pattern = ExpectedPattern::resolve(
        &[Expect::of::<Marker>("boom"), Expect::named("Custom", "x")],
        &mut resolver,
    );
    assert_eq!(pattern.len(), 2);
    assert_eq!(pattern[0].display_name(), "Marker");
    assert_eq!(pattern[0].message(), Some("boom"));
    assert_eq!(pattern[1].display_name(), "Custom");
}

#[test]
fn test_expect_panic_resolves_to_panic_name() {
    let mut resolver = ShortTypeNames::new();
    let pattern = ExpectedPattern::resolve(&[Expect::panic("oops")], &mut resolver);
    assert_eq!(pattern[0].display_name(), "panic");
}
