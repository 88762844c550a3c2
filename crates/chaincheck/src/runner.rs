//! Test execution engine.
//!
//! Runs registered tests one after another and collects their outcomes.

use std::time::Instant;

use chaincheck_chain::{TypeNameResolver, TypeRegistry};

use crate::config::RunnerConfig;
use crate::context::{FailureSlot, TestContext};
use crate::error::InternalError;
use crate::panics::QuietPanics;
use crate::registry::{Registry, TestCase};
use crate::report::{ReportSink, Reporter};
use crate::result::{SuiteReport, SuiteState, TestOutcome, TestStatus};

/// Test runner.
///
/// A runner runs its registry once. Tests run sequentially in
/// [`TestIdentity`](crate::TestIdentity) order on the calling thread.
pub struct TestRunner<S: ReportSink> {
    config: RunnerConfig,
    registry: Option<Registry>,
    sink: S,
    slot: FailureSlot,
    state: SuiteState,
}

impl<S: ReportSink> TestRunner<S> {
    pub fn new(registry: Registry, config: RunnerConfig, sink: S) -> Self {
        TestRunner {
            config,
            registry: Some(registry),
            sink,
            slot: FailureSlot::default(),
            state: SuiteState::NotStarted,
        }
    }

    #[inline]
    pub fn state(&self) -> SuiteState {
        self.state
    }

    /// Consume the runner, returning the report sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run every registered test.
    ///
    /// Fails without running anything if the registry is empty or has
    /// duplicate tests, and stops early if a test hits a fatal error.
    ///
    /// Panics caught from test bodies are reported as error chains; the panic
    /// hook stays silent for them while the run lasts.
    pub fn run(&mut self) -> Result<SuiteReport, InternalError> {
        let _quiet = QuietPanics::enter();
        let result = match self.registry.take() {
            Some(registry) if self.state == SuiteState::NotStarted => {
                self.state = SuiteState::Running;
                self.run_suite(registry)
            }
            _ => Err(InternalError::AlreadyRan),
        };
        self.state = SuiteState::Completed;

        match &result {
            Ok(report) => self.sink.summary(report),
            Err(error) => self.sink.internal_error(error),
        }
        result
    }

    fn run_suite(&mut self, registry: Registry) -> Result<SuiteReport, InternalError> {
        let suite = registry.into_suite()?;
        let total = suite.cases.len();
        let mut resolver = self.config.type_names.resolver();
        let mut report = SuiteReport::new();
        let start = Instant::now();

        tracing::debug!(tests = total, "starting test suite");

        for (index, case) in suite.cases.iter().enumerate() {
            let outcome = self.run_test(index + 1, total, case, &suite.types, &mut *resolver)?;
            let failed_so_far = report.failed() + usize::from(outcome.failed());
            self.sink.test_finished(&outcome, failed_so_far);
            report.add(outcome);
        }

        tracing::debug!(
            passed = report.passed(),
            failed = report.failed(),
            elapsed_ms = start.elapsed().as_millis(),
            "test suite completed"
        );
        Ok(report)
    }

    /// Run one test through `Pending -> Running -> Passed | Failed`.
    #[tracing::instrument(level = "debug", skip_all, fields(test = case.identity.name))]
    fn run_test(
        &mut self,
        position: usize,
        total: usize,
        case: &TestCase,
        types: &TypeRegistry,
        resolver: &mut dyn TypeNameResolver,
    ) -> Result<TestOutcome, InternalError> {
        let mut outcome = TestOutcome::pending(case.identity);
        self.sink.test_started(position, total, &case.identity);

        outcome.status = TestStatus::Running;
        let start = Instant::now();
        let record = {
            let scope = self.slot.acquire();
            let mut ctx =
                TestContext::new(case.identity, scope, &mut self.sink, types, resolver);
            ctx.run_body(case.entry);
            ctx.finish()
        };
        let duration = start.elapsed();

        if let Some(fatal) = record.fatal {
            return Err(fatal);
        }

        outcome.finish(record.failures, duration);
        tracing::debug!(status = ?outcome.status, "test finished");
        Ok(outcome)
    }
}

/// Run `registry` with a stderr reporter and return the process exit code.
pub fn run_tests(registry: Registry, config: RunnerConfig) -> i32 {
    let sink = Reporter::stderr(config.color);
    let mut runner = TestRunner::new(registry, config, sink);
    match runner.run() {
        Ok(report) => report.exit_code(),
        Err(_) => InternalError::EXIT_CODE,
    }
}
