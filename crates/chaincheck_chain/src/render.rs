//! Text rendering for chains and verdicts.
//!
//! Output is a list of lines without any log prefix or table indentation;
//! the reporter adds both when printing.

use crate::compare::{ComparisonVerdict, ElementDiff, LinePair, PresentationMode};
use crate::model::ChainElement;

/// Indentation of message lines under their type name.
pub const MESSAGE_INDENT: usize = 4;

const CAUGHT_LABEL: &str = "Caught";
const EXPECTED_LABEL: &str = "Expected";
const UNKNOWN_CELL: &str = "(unknown)";
const NONE_CELL: &str = "(none)";

/// Marker for a side that still has a line at this row.
const LINE_PRESENT: char = ' ';
/// Marker for a side that ran out of lines.
const LINE_MISSING: char = '.';

/// Render a verdict as a two-column `Caught | Expected` table.
///
/// Pure: the same verdict and mode always yield the same lines.
pub fn render(verdict: &ComparisonVerdict, mode: PresentationMode) -> Vec<String> {
    let width = column_width(verdict);
    let mut lines = Vec::with_capacity(1 + verdict.element_diffs().len() * 2);
    lines.push(format!("{CAUGHT_LABEL:<width$} | {EXPECTED_LABEL}"));

    for diff in verdict.element_diffs() {
        if mode == PresentationMode::Full {
            lines.push(type_row(diff, width));
        }
        for pair in diff.lines() {
            lines.push(message_row(pair, width));
        }
    }
    lines
}

fn actual_cell(diff: &ElementDiff) -> &str {
    match diff.actual() {
        Some(element) if element.is_unknown() => UNKNOWN_CELL,
        Some(element) => element.display_name(),
        None => NONE_CELL,
    }
}

fn expected_cell(diff: &ElementDiff) -> &str {
    match diff.expected() {
        Some(element) if element.is_unknown() => UNKNOWN_CELL,
        Some(element) => element.display_name(),
        None => NONE_CELL,
    }
}

fn separator(matches: bool) -> char {
    if matches {
        '|'
    } else {
        '#'
    }
}

fn type_row(diff: &ElementDiff, width: usize) -> String {
    let left = actual_cell(diff);
    let right = expected_cell(diff);
    let sep = separator(diff.names_match());
    format!("{left:<width$} {sep} {right}")
}

fn message_row(pair: &LinePair, width: usize) -> String {
    let marker = |line: &Option<String>| {
        if line.is_some() {
            LINE_PRESENT
        } else {
            LINE_MISSING
        }
    };
    let left_marker = marker(&pair.actual);
    let right_marker = marker(&pair.expected);
    let left = pair.actual.as_deref().unwrap_or_default();
    let right = pair.expected.as_deref().unwrap_or_default();
    let sep = separator(pair.matches());
    let pad = " ".repeat(MESSAGE_INDENT - 1);
    let text_width = width - MESSAGE_INDENT;
    format!("{pad}{left_marker}{left:<text_width$} {sep}    {right_marker}{right}")
}

/// Width of the left column: the widest label, type cell, or indented
/// message line on either side.
fn column_width(verdict: &ComparisonVerdict) -> usize {
    let labels = [CAUGHT_LABEL, EXPECTED_LABEL]
        .iter()
        .map(|label| label.chars().count());

    let cells = verdict.element_diffs().iter().flat_map(|diff| {
        let types = [actual_cell(diff), expected_cell(diff)]
            .into_iter()
            .map(|cell| cell.chars().count());
        let messages = diff.lines().iter().flat_map(|pair| {
            [pair.actual.as_deref(), pair.expected.as_deref()]
                .into_iter()
                .flatten()
                .map(|line| line.chars().count() + MESSAGE_INDENT)
        });
        types.chain(messages)
    });

    labels.chain(cells).max().unwrap_or(MESSAGE_INDENT)
}

/// Render a captured chain as a plain list, outermost first.
///
/// Each element prints its type name followed by its message lines indented
/// by [`MESSAGE_INDENT`]. A known element without a message prints `(null)`
/// unindented.
pub fn render_chain(chain: &[ChainElement]) -> Vec<String> {
    let indent = " ".repeat(MESSAGE_INDENT);
    let mut lines = Vec::new();
    for element in chain {
        if element.is_unknown() {
            lines.push("Unknown error.".to_owned());
            continue;
        }
        lines.push(element.display_name().to_owned());
        match element.message() {
            Some(_) => lines.extend(
                element
                    .message_lines()
                    .into_iter()
                    .map(|line| format!("{indent}{line}")),
            ),
            None => lines.push("(null)".to_owned()),
        }
    }
    lines
}
