use super::*;
use crate::tag::TypeTag;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn el(name: &str, message: &str) -> ChainElement {
    ChainElement::new(TypeTag::named(name.to_owned()), name, message)
}

fn chain(elements: Vec<ChainElement>) -> ErrorChain {
    let mut iter = elements.into_iter();
    let mut chain = ErrorChain::starting_with(iter.next().unwrap_or_else(ChainElement::unknown));
    for element in iter {
        chain.push(element);
    }
    chain
}

fn pattern(elements: Vec<ChainElement>) -> ExpectedPattern {
    ExpectedPattern::from_elements(elements)
}

#[test]
fn test_empty_pattern_matches_anything() {
    let verdict = compare(&chain(vec![el("A", "x")]), &ExpectedPattern::any());
    assert!(verdict.matched());
    assert_eq!(verdict.expected_count(), 0);
    assert!(verdict.element_diffs().is_empty());
}

#[test]
fn test_exact_chain_matches() {
    let actual = chain(vec![el("LogicFailure", "while doing stuff:"), el("RuntimeFailure", "fail")]);
    let verdict = compare(&actual, &ExpectedPattern::from_chain(&actual));
    assert!(verdict.matched());
    assert_eq!(verdict.presentation(), PresentationMode::MessageOnly);
}

#[test]
fn test_message_mismatch_is_message_only() {
    let actual = chain(vec![el("LogicFailure", "while doing stuff:"), el("RuntimeFailure", "fail")]);
    let expected = pattern(vec![
        el("LogicFailure", "while doing stuff:"),
        el("RuntimeFailure", "failure"),
    ]);
    let verdict = compare(&actual, &expected);
    assert!(!verdict.matched());
    assert_eq!(verdict.presentation(), PresentationMode::MessageOnly);
    assert!(verdict.element_diffs()[0].matched());
    assert!(!verdict.element_diffs()[1].matched());
    assert!(verdict.element_diffs()[1].names_match());
}

#[test]
fn test_extra_expected_element_is_full() {
    let actual = chain(vec![el("RuntimeFailure", "fail")]);
    let expected = pattern(vec![el("RuntimeFailure", "fail"), el("Cause", "deeper")]);
    let verdict = compare(&actual, &expected);
    assert!(!verdict.matched());
    assert_eq!(verdict.presentation(), PresentationMode::Full);

    let diffs = verdict.element_diffs();
    assert_eq!(diffs.len(), 2);
    assert!(diffs[0].matched());
    assert!(diffs[1].actual().is_none());
    assert_eq!(diffs[1].expected().map(ChainElement::display_name), Some("Cause"));
}

#[test]
fn test_extra_caught_element_is_full() {
    let actual = chain(vec![el("Outer", "a"), el("Inner", "b")]);
    let expected = pattern(vec![el("Outer", "a")]);
    let verdict = compare(&actual, &expected);
    assert!(!verdict.matched());
    assert_eq!(verdict.presentation(), PresentationMode::Full);

    let diffs = verdict.element_diffs();
    assert_eq!(diffs.len(), 2);
    assert!(diffs[0].matched());
    assert!(diffs[1].expected().is_none());
    assert_eq!(
        diffs[1].lines(),
        &[LinePair {
            actual: Some("b".to_owned()),
            expected: None,
        }]
    );
}

#[test]
fn test_type_mismatch_is_full() {
    let actual = chain(vec![el("A", "x")]);
    let expected = pattern(vec![el("B", "x")]);
    let verdict = compare(&actual, &expected);
    assert!(!verdict.matched());
    assert_eq!(verdict.presentation(), PresentationMode::Full);
}

#[test]
fn test_lines_are_aligned_with_padding() {
    let actual = chain(vec![el("A", "one\ntwo\nthree")]);
    let expected = pattern(vec![el("A", "one\n2")]);
    let verdict = compare(&actual, &expected);
    let lines = verdict.element_diffs()[0].lines();
    assert_eq!(
        lines,
        &[
            LinePair {
                actual: Some("one".to_owned()),
                expected: Some("one".to_owned()),
            },
            LinePair {
                actual: Some("two".to_owned()),
                expected: Some("2".to_owned()),
            },
            LinePair {
                actual: Some("three".to_owned()),
                expected: None,
            },
        ]
    );
    assert!(lines[0].matches());
    assert!(!lines[1].matches());
    assert!(!lines[2].matches());
}

#[test]
fn test_absent_side_contributes_no_lines() {
    let actual = chain(vec![el("A", "x")]);
    let expected = pattern(vec![el("A", "x"), el("B", "y\nz")]);
    let verdict = compare(&actual, &expected);
    let lines = verdict.element_diffs()[1].lines();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|pair| pair.actual.is_none()));
}

#[test]
fn test_unknown_element_matches_unknown_expectation() {
    let actual = chain(vec![ChainElement::unknown()]);
    let verdict = compare(&actual, &pattern(vec![ChainElement::unknown()]));
    assert!(verdict.matched());
    assert!(verdict.element_diffs()[0].lines().is_empty());
}

fn arb_element() -> impl Strategy<Value = ChainElement> {
    ("[A-D]", "[a-c\n]{0,6}").prop_map(|(name, message)| el(&name, &message))
}

fn arb_elements() -> impl Strategy<Value = Vec<ChainElement>> {
    prop::collection::vec(arb_element(), 1..5)
}

proptest! {
    #[test]
    fn prop_chain_matches_itself(elements in arb_elements()) {
        let actual = chain(elements);
        let verdict = compare(&actual, &ExpectedPattern::from_chain(&actual));
        prop_assert!(verdict.matched());
    }

    #[test]
    fn prop_empty_pattern_always_matches(elements in arb_elements()) {
        prop_assert!(compare(&chain(elements), &ExpectedPattern::any()).matched());
    }

    #[test]
    fn prop_compare_is_symmetric(a in arb_elements(), b in arb_elements()) {
        let (ca, cb) = (chain(a), chain(b));
        let forward = compare(&ca, &ExpectedPattern::from_chain(&cb));
        let backward = compare(&cb, &ExpectedPattern::from_chain(&ca));
        prop_assert_eq!(forward.matched(), backward.matched());
        prop_assert_eq!(forward.presentation(), backward.presentation());
    }

    #[test]
    fn prop_length_mismatch_never_matches(
        elements in arb_elements(),
        extra in arb_element(),
    ) {
        let actual = chain(elements.clone());
        let mut longer = elements;
        longer.push(extra);
        let verdict = compare(&actual, &pattern(longer));
        prop_assert!(!verdict.matched());
        prop_assert_eq!(verdict.presentation(), PresentationMode::Full);
        prop_assert_eq!(verdict.element_diffs().len(), verdict.expected_count());
    }

    #[test]
    fn prop_shorter_pattern_never_matches(
        elements in arb_elements(),
        extra in arb_element(),
    ) {
        let mut longer = elements.clone();
        longer.push(extra);
        let verdict = compare(&chain(longer), &pattern(elements));
        prop_assert!(!verdict.matched());
        prop_assert_eq!(verdict.presentation(), PresentationMode::Full);
        let last = &verdict.element_diffs()[verdict.actual_count() - 1];
        prop_assert!(last.expected().is_none());
        prop_assert!(last.lines().iter().all(|pair| pair.expected.is_none()));
    }

    #[test]
    fn prop_diff_count_is_longest_side(a in arb_elements(), b in arb_elements()) {
        let verdict = compare(&chain(a.clone()), &pattern(b.clone()));
        prop_assert_eq!(verdict.element_diffs().len(), a.len().max(b.len()));
    }
}
