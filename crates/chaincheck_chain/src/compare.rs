//! Chain comparison.
//!
//! Compares a captured [`ErrorChain`] with an [`ExpectedPattern`] index by
//! index, outermost first, and keeps enough detail to render a side-by-side
//! diff afterwards.

use crate::model::{elements_equal, ChainElement, ErrorChain, ExpectedPattern};

/// How a verdict should be displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresentationMode {
    /// Every type matched; only messages differ. Show message rows only.
    MessageOnly,
    /// Show type and message rows for every index.
    Full,
}

/// One row of a message alignment.
///
/// `None` means that side had no line left at this position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinePair {
    pub actual: Option<String>,
    pub expected: Option<String>,
}

impl LinePair {
    /// Both lines exist and are equal.
    pub fn matches(&self) -> bool {
        matches!((&self.actual, &self.expected), (Some(a), Some(e)) if a == e)
    }
}

/// Comparison of one chain index. At least one side is present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementDiff {
    actual: Option<ChainElement>,
    expected: Option<ChainElement>,
    lines: Vec<LinePair>,
}

impl ElementDiff {
    fn new(actual: Option<&ChainElement>, expected: Option<&ChainElement>) -> Option<Self> {
        if actual.is_none() && expected.is_none() {
            return None;
        }
        let lines = align_lines(
            &actual.map(ChainElement::message_lines).unwrap_or_default(),
            &expected
                .map(ChainElement::message_lines)
                .unwrap_or_default(),
        );
        Some(ElementDiff {
            actual: actual.cloned(),
            expected: expected.cloned(),
            lines,
        })
    }

    #[inline]
    pub fn actual(&self) -> Option<&ChainElement> {
        self.actual.as_ref()
    }

    #[inline]
    pub fn expected(&self) -> Option<&ChainElement> {
        self.expected.as_ref()
    }

    /// Message lines of both sides, aligned by position.
    #[inline]
    pub fn lines(&self) -> &[LinePair] {
        &self.lines
    }

    /// Both sides are present and equal.
    pub fn matched(&self) -> bool {
        match (&self.actual, &self.expected) {
            (Some(a), Some(e)) => elements_equal(a, e),
            _ => false,
        }
    }

    /// Both sides are present and have the same display name.
    pub fn names_match(&self) -> bool {
        match (&self.actual, &self.expected) {
            (Some(a), Some(e)) => a.display_name() == e.display_name(),
            _ => false,
        }
    }
}

/// Zip two line lists, padding the shorter one with `None`.
fn align_lines(actual: &[&str], expected: &[&str]) -> Vec<LinePair> {
    let rows = actual.len().max(expected.len());
    (0..rows)
        .map(|i| LinePair {
            actual: actual.get(i).map(|line| (*line).to_owned()),
            expected: expected.get(i).map(|line| (*line).to_owned()),
        })
        .collect()
}

/// Result of comparing a chain against a pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonVerdict {
    matched: bool,
    actual_count: usize,
    expected_count: usize,
    element_diffs: Vec<ElementDiff>,
}

impl ComparisonVerdict {
    #[inline]
    pub fn matched(&self) -> bool {
        self.matched
    }

    #[inline]
    pub fn actual_count(&self) -> usize {
        self.actual_count
    }

    #[inline]
    pub fn expected_count(&self) -> usize {
        self.expected_count
    }

    #[inline]
    pub fn element_diffs(&self) -> &[ElementDiff] {
        &self.element_diffs
    }

    /// Pick the display mode: message-only when the counts agree and every
    /// index has matching display names.
    pub fn presentation(&self) -> PresentationMode {
        if self.actual_count == self.expected_count
            && self.element_diffs.iter().all(ElementDiff::names_match)
        {
            PresentationMode::MessageOnly
        } else {
            PresentationMode::Full
        }
    }
}

/// Compare a captured chain with an expected pattern.
///
/// An empty pattern accepts any chain.
pub fn compare(actual: &ErrorChain, expected: &ExpectedPattern) -> ComparisonVerdict {
    if expected.is_empty() {
        return ComparisonVerdict {
            matched: true,
            actual_count: actual.len(),
            expected_count: 0,
            element_diffs: Vec::new(),
        };
    }

    let rows = actual.len().max(expected.len());
    let element_diffs: Vec<ElementDiff> = (0..rows)
        .filter_map(|i| ElementDiff::new(actual.get(i), expected.get(i)))
        .collect();

    let matched =
        actual.len() == expected.len() && element_diffs.iter().all(ElementDiff::matched);

    ComparisonVerdict {
        matched,
        actual_count: actual.len(),
        expected_count: expected.len(),
        element_diffs,
    }
}

#[cfg(test)]
mod tests;
