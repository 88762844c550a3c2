//! Assertions inside a running test.
//!
//! Every test body receives a [`TestContext`]. Checks report failures
//! through it and return `Err(Interrupt)` when the test should stop, which
//! the body propagates with `?`:
//!
//! ```text
//! fn parses(ctx: &mut TestContext<'_>) -> Flow {
//!     check!(ctx, "42".parse::<i32>() == Ok(42));
//!     must_raise!(ctx, [Expect::of::<ParseIntError>("invalid digit found in string")],
//!         "x".parse::<i32>());
//!     Ok(())
//! }
//! ```
//!
//! A body that ignores the returned `Result` keeps running after a stopping
//! failure; the test is still marked failed.

use std::panic::{self, AssertUnwindSafe};

use chaincheck_chain::{
    compare, render, ChainCapture, ErrorChain, Escape, Expect, ExpectedPattern, Flow, Interrupt,
    Raised, TypeNameResolver, TypeRegistry,
};

use crate::error::InternalError;
use crate::registry::{TestFn, TestIdentity};
use crate::report::{Failure, ReportSink};
use crate::result::FailureKind;

/// Source location and text of a check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Site {
    pub file: &'static str,
    pub line: u32,
    pub expr: &'static str,
}

/// What a failed check does to the rest of the test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnFailure {
    /// End the test body.
    #[default]
    Stop,
    /// Record the failure and keep going.
    Continue,
}

impl OnFailure {
    fn after_failure(self) -> Result<bool, Interrupt> {
        match self {
            OnFailure::Stop => Err(Interrupt),
            OnFailure::Continue => Ok(false),
        }
    }
}

/// Values a boolean check's condition may produce.
pub trait IntoVerdict {
    fn into_verdict(self) -> Result<bool, Escape>;
}

impl IntoVerdict for bool {
    fn into_verdict(self) -> Result<bool, Escape> {
        Ok(self)
    }
}

impl<E: Into<Escape>> IntoVerdict for Result<bool, E> {
    fn into_verdict(self) -> Result<bool, Escape> {
        self.map_err(Into::into)
    }
}

/// Values a must-raise body may produce.
pub trait BodyResult {
    fn into_flow(self) -> Flow;
}

impl BodyResult for () {
    fn into_flow(self) -> Flow {
        Ok(())
    }
}

impl<T, E: Into<Escape>> BodyResult for Result<T, E> {
    fn into_flow(self) -> Flow {
        self.map(|_| ()).map_err(Into::into)
    }
}

/// What a test left behind once its body ended.
#[derive(Debug, Default)]
pub(crate) struct TestRecord {
    pub failures: Vec<FailureKind>,
    /// Set when the test hit an error that must end the whole run.
    pub fatal: Option<InternalError>,
}

/// The slot holding the test currently executing.
#[derive(Debug, Default)]
pub(crate) struct FailureSlot {
    active: Option<TestRecord>,
}

impl FailureSlot {
    /// Open the slot for a new test. It is cleared when the scope drops.
    pub(crate) fn acquire(&mut self) -> FailureScope<'_> {
        self.active = Some(TestRecord::default());
        FailureScope { slot: self }
    }

    #[cfg(test)]
    pub(crate) fn is_vacant(&self) -> bool {
        self.active.is_none()
    }
}

/// RAII guard over the [`FailureSlot`] of the running test.
///
/// Dropping it clears the slot, also while unwinding.
pub(crate) struct FailureScope<'s> {
    slot: &'s mut FailureSlot,
}

impl FailureScope<'_> {
    fn record(&mut self, kind: FailureKind) {
        if let Some(active) = self.slot.active.as_mut() {
            active.failures.push(kind);
        }
    }

    fn set_fatal(&mut self, error: InternalError) {
        if let Some(active) = self.slot.active.as_mut() {
            active.fatal.get_or_insert(error);
        }
    }

    fn failed(&self) -> bool {
        self.slot
            .active
            .as_ref()
            .is_some_and(|active| !active.failures.is_empty())
    }

    /// Take the record out and release the slot.
    fn close(self) -> TestRecord {
        self.slot.active.take().unwrap_or_default()
    }
}

impl Drop for FailureScope<'_> {
    fn drop(&mut self) {
        self.slot.active = None;
    }
}

/// Handle through which a running test performs its checks.
pub struct TestContext<'r> {
    identity: TestIdentity,
    scope: FailureScope<'r>,
    sink: &'r mut dyn ReportSink,
    types: &'r TypeRegistry,
    resolver: &'r mut dyn TypeNameResolver,
}

impl<'r> TestContext<'r> {
    pub(crate) fn new(
        identity: TestIdentity,
        scope: FailureScope<'r>,
        sink: &'r mut dyn ReportSink,
        types: &'r TypeRegistry,
        resolver: &'r mut dyn TypeNameResolver,
    ) -> Self {
        TestContext {
            identity,
            scope,
            sink,
            types,
            resolver,
        }
    }

    /// Whether any failure has been recorded for this test so far.
    pub fn failed(&self) -> bool {
        self.scope.failed()
    }

    /// End the test now without failing it.
    ///
    /// Use as `return ctx.interrupt();`.
    pub fn interrupt(&mut self) -> Flow {
        tracing::debug!(test = self.identity.name, "test interrupted");
        Err(Escape::Interrupt)
    }

    /// Check that `condition` yields `true`.
    ///
    /// A condition that returns an error or panics fails the check, and its
    /// error chain is reported. Returns `Ok(true)` on success, `Ok(false)`
    /// on a failure with [`OnFailure::Continue`], and `Err(Interrupt)` on a
    /// failure with [`OnFailure::Stop`].
    pub fn check<V, F>(
        &mut self,
        on_failure: OnFailure,
        site: Site,
        condition: F,
    ) -> Result<bool, Interrupt>
    where
        V: IntoVerdict,
        F: FnOnce() -> V,
    {
        let verdict = match panic::catch_unwind(AssertUnwindSafe(condition)) {
            Ok(value) => value.into_verdict(),
            Err(payload) => Err(Escape::Raised(Raised::from_panic(payload))),
        };

        match verdict {
            Ok(true) => Ok(true),
            Ok(false) => {
                tracing::debug!(file = site.file, line = site.line, "check evaluated to false");
                self.report(Failure::Assertion {
                    site: &site,
                    error: None,
                });
                on_failure.after_failure()
            }
            Err(Escape::Interrupt) => Err(Interrupt),
            Err(Escape::Raised(raised)) => {
                tracing::debug!(file = site.file, line = site.line, "check raised an error");
                let chain = self.capture(&raised)?;
                self.report(Failure::Assertion {
                    site: &site,
                    error: Some(&chain),
                });
                on_failure.after_failure()
            }
        }
    }

    /// Check that `body` raises an error whose chain matches `expected`.
    ///
    /// An empty `expected` accepts any error. A body that completes, or only
    /// interrupts, is reported as a missing error.
    pub fn must_raise<B, F>(
        &mut self,
        on_failure: OnFailure,
        site: Site,
        expected: &[Expect],
        body: F,
    ) -> Result<bool, Interrupt>
    where
        B: BodyResult,
        F: FnOnce() -> B,
    {
        let flow = match panic::catch_unwind(AssertUnwindSafe(body)) {
            Ok(result) => result.into_flow(),
            Err(payload) => Err(Escape::Raised(Raised::from_panic(payload))),
        };

        let raised = match flow {
            Err(Escape::Raised(raised)) => raised,
            Ok(()) | Err(Escape::Interrupt) => {
                tracing::debug!(file = site.file, line = site.line, "body raised nothing");
                self.report(Failure::MissingError { site: &site });
                return on_failure.after_failure();
            }
        };

        let chain = self.capture(&raised)?;
        let pattern = ExpectedPattern::resolve(expected, &mut *self.resolver);
        let verdict = compare(&chain, &pattern);
        if verdict.matched() {
            return Ok(true);
        }

        tracing::debug!(
            file = site.file,
            line = site.line,
            caught = verdict.actual_count(),
            expected = verdict.expected_count(),
            "error chain mismatch"
        );
        let table = render(&verdict, verdict.presentation());
        self.report(Failure::IncorrectError {
            site: &site,
            table: &table,
        });
        on_failure.after_failure()
    }

    /// Run a test body, recording anything that escapes it.
    pub(crate) fn run_body(&mut self, entry: TestFn) {
        let escaped = match panic::catch_unwind(AssertUnwindSafe(|| entry(&mut *self))) {
            Ok(Ok(())) => return,
            Ok(Err(Escape::Interrupt)) => {
                tracing::debug!(test = self.identity.name, "body ended by interrupt");
                return;
            }
            Ok(Err(Escape::Raised(raised))) => raised,
            Err(payload) => Raised::from_panic(payload),
        };

        if let Ok(chain) = self.capture(&escaped) {
            self.report(Failure::Uncaught { chain: &chain });
        }
    }

    /// Release the failure slot and hand back what the test recorded.
    pub(crate) fn finish(self) -> TestRecord {
        self.scope.close()
    }

    /// Capture a chain. A chain too deep to capture is fatal for the run and
    /// interrupts the test.
    fn capture(&mut self, raised: &Raised) -> Result<ErrorChain, Interrupt> {
        let captured = ChainCapture::new(self.types, &mut *self.resolver).capture(raised);
        match captured {
            Ok(chain) => Ok(chain),
            Err(error) => {
                tracing::error!(test = self.identity.name, %error, "cannot capture error chain");
                self.scope.set_fatal(error.into());
                Err(Interrupt)
            }
        }
    }

    fn report(&mut self, failure: Failure<'_>) {
        self.sink.flush_user_output();
        self.sink.failure(&failure);
        self.scope.record(failure.kind());
    }
}
