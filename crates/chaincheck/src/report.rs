//! Report output.
//!
//! The runner and the checks talk to a [`ReportSink`]; [`Reporter`] is the
//! line-oriented text implementation, writing to stderr by default.
//!
//! ```text
//! ########## [ file   ] --- tests/base.rs
//! 1/2        [ run    ] parses
//!            [     OK ] parses (0.1 ms)
//! 2/2        [ run    ] rejects
//!   .        [   .    ]     Assertion failed at:  tests/base.rs:12
//! ```

use std::io::{self, Write};

use chaincheck_chain::{render_chain, ErrorChain};

use crate::context::Site;
use crate::error::InternalError;
use crate::registry::TestIdentity;
use crate::result::{FailureKind, SuiteReport, TestOutcome};

/// ANSI color codes for terminal output.
mod colors {
    pub const PASS: &str = "\x1b[1;32m"; // Bold green
    pub const FAIL: &str = "\x1b[1;31m"; // Bold red
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Room for the `  0 failed` counter printed after each test.
const FAILED_COUNTER_WIDTH: usize = 10;
/// Filler printed in the counters column of detail lines.
const DETAIL_FILLER: &str = ".       ";
/// Indentation of a chain printed under "Returned an error:".
const ASSERTION_CHAIN_INDENT: usize = 12;
/// Indentation of diff tables and uncaught chains.
const BLOCK_INDENT: usize = 8;

/// Color output mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// A failure being reported from inside a test.
#[derive(Clone, Copy, Debug)]
pub enum Failure<'a> {
    /// A boolean check failed. `error` is set when the condition raised one.
    Assertion {
        site: &'a Site,
        error: Option<&'a ErrorChain>,
    },
    MissingError {
        site: &'a Site,
    },
    /// A must-raise check caught the wrong chain. `table` is the rendered
    /// diff.
    IncorrectError {
        site: &'a Site,
        table: &'a [String],
    },
    Uncaught {
        chain: &'a ErrorChain,
    },
}

impl Failure<'_> {
    pub fn kind(&self) -> FailureKind {
        match self {
            Failure::Assertion { .. } => FailureKind::Assertion,
            Failure::MissingError { .. } => FailureKind::MissingError,
            Failure::IncorrectError { .. } => FailureKind::ChainMismatch,
            Failure::Uncaught { .. } => FailureKind::Uncaught,
        }
    }
}

/// Destination of everything the runner reports.
pub trait ReportSink {
    /// A test is about to run. `position` counts from 1.
    fn test_started(&mut self, position: usize, total: usize, identity: &TestIdentity);

    /// A test has ended. `failed_so_far` includes this test.
    fn test_finished(&mut self, outcome: &TestOutcome, failed_so_far: usize);

    /// A failure inside the current test.
    fn failure(&mut self, failure: &Failure<'_>);

    /// Flush output the test itself may have buffered, so it stays ordered
    /// before the next report line.
    fn flush_user_output(&mut self);

    /// The run has completed.
    fn summary(&mut self, report: &SuiteReport);

    /// The run was aborted.
    fn internal_error(&mut self, error: &InternalError);
}

/// Text reporter with optional color support.
pub struct Reporter<W: Write> {
    writer: W,
    colors: bool,
    counters_width: usize,
    current_file: Option<&'static str>,
}

impl<W: Write> Reporter<W> {
    /// Create a reporter with an explicit color mode.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        Reporter {
            writer,
            colors: mode.should_use_colors(is_tty),
            counters_width: FAILED_COUNTER_WIDTH,
            current_file: None,
        }
    }

    /// Consume the reporter, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn colored(&self, text: &str, color: &str) -> String {
        if self.colors {
            format!("{color}{text}{}", colors::RESET)
        } else {
            text.to_owned()
        }
    }

    /// Write one detail line, prefixed so it lines up under the status
    /// column.
    fn detail(&mut self, indent: usize, text: &str) {
        let _ = writeln!(
            self.writer,
            "{DETAIL_FILLER:>width$} [   .    ] {:indent$}{text}",
            "",
            width = self.counters_width,
        );
    }

    fn detail_lines(&mut self, indent: usize, lines: &[String]) {
        for line in lines {
            self.detail(indent, line);
        }
    }
}

impl Reporter<io::Stderr> {
    /// Create a reporter for stderr, detecting whether it is a terminal.
    pub fn stderr(mode: ColorMode) -> Self {
        let is_tty = io::IsTerminal::is_terminal(&io::stderr());
        Reporter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> ReportSink for Reporter<W> {
    fn test_started(&mut self, position: usize, total: usize, identity: &TestIdentity) {
        let counters = format!("{position}/{total}");
        self.counters_width = counters.len().max(FAILED_COUNTER_WIDTH);

        if self.current_file != Some(identity.file) {
            self.current_file = Some(identity.file);
            let _ = writeln!(
                self.writer,
                "{} [ file   ] --- {}",
                "#".repeat(self.counters_width),
                identity.file
            );
        }

        let _ = writeln!(
            self.writer,
            "{counters:<width$} [ run    ] {}",
            identity.name,
            width = self.counters_width
        );
    }

    fn test_finished(&mut self, outcome: &TestOutcome, failed_so_far: usize) {
        let counter = if failed_so_far == 0 {
            String::new()
        } else {
            format!("{failed_so_far:>3} failed")
        };
        let status = if outcome.failed() {
            self.colored("[   FAIL ]", colors::FAIL)
        } else {
            self.colored("[     OK ]", colors::PASS)
        };
        let millis = outcome.duration.as_secs_f64() * 1000.0;

        let _ = write!(
            self.writer,
            "{counter:<width$} {status} {} ({millis:.1} ms)",
            outcome.identity.name,
            width = self.counters_width
        );
        if outcome.failed() {
            let _ = write!(
                self.writer,
                "   at:  {}:{}",
                outcome.identity.file, outcome.identity.line
            );
        }
        let _ = writeln!(self.writer);
        let _ = self.writer.flush();
    }

    fn failure(&mut self, failure: &Failure<'_>) {
        match *failure {
            Failure::Assertion { site, error } => {
                self.detail(
                    4,
                    &format!("Assertion failed at:  {}:{}", site.file, site.line),
                );
                self.detail(8, &format!("Expression:  {}", site.expr));
                match error {
                    Some(chain) => {
                        self.detail(8, "Returned an error:");
                        self.detail_lines(ASSERTION_CHAIN_INDENT, &render_chain(chain));
                    }
                    None => self.detail(8, "Evaluated to false."),
                }
            }
            Failure::MissingError { site } => {
                self.detail(
                    4,
                    &format!("Missing error at:  {}:{}", site.file, site.line),
                );
            }
            Failure::IncorrectError { site, table } => {
                self.detail(
                    4,
                    &format!("Incorrect error at:  {}:{}", site.file, site.line),
                );
                self.detail(4, "Error chain:");
                self.detail_lines(BLOCK_INDENT, table);
            }
            Failure::Uncaught { chain } => {
                self.detail(4, "Uncaught error:");
                self.detail_lines(BLOCK_INDENT, &render_chain(chain));
            }
        }
    }

    fn flush_user_output(&mut self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        let _ = self.writer.flush();
    }

    fn summary(&mut self, report: &SuiteReport) {
        let _ = writeln!(self.writer);
        if report.has_failures() {
            let _ = writeln!(self.writer, "{}", self.colored("Failed tests:", colors::BOLD));
            let name_width = report
                .failed_tests()
                .map(|o| o.identity.name.chars().count())
                .max()
                .unwrap_or(0);
            for outcome in report.failed_tests() {
                let _ = writeln!(
                    self.writer,
                    "    {:<name_width$}   at:  {}:{}",
                    outcome.identity.name, outcome.identity.file, outcome.identity.line
                );
            }
            let _ = writeln!(self.writer);
            let failed = self.colored(&format!("{} FAILED", report.failed()), colors::FAIL);
            let _ = writeln!(
                self.writer,
                "Ran {} tests, {} passed, {failed}",
                report.total(),
                report.passed()
            );
        } else {
            let line = format!("All {} tests passed", report.total());
            let _ = writeln!(self.writer, "{}", self.colored(&line, colors::PASS));
        }
        let _ = self.writer.flush();
    }

    fn internal_error(&mut self, error: &InternalError) {
        let _ = writeln!(self.writer, "chaincheck: internal error: {error}");
        let _ = self.writer.flush();
    }
}
