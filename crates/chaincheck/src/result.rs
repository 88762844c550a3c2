//! Test result types.

use std::time::Duration;

use crate::registry::TestIdentity;

/// Lifecycle of a single test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TestStatus {
    #[default]
    Pending,
    Running,
    Passed,
    Failed,
}

/// What kind of failure a test recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// A boolean check was false or its condition raised an error.
    Assertion,
    /// A must-raise check completed without an error.
    MissingError,
    /// A must-raise check caught a chain that differs from the expected one.
    ChainMismatch,
    /// An error escaped the test body outside any check.
    Uncaught,
}

/// Result of running a single test.
#[derive(Clone, Debug)]
pub struct TestOutcome {
    pub identity: TestIdentity,
    pub status: TestStatus,
    /// Failures in the order they were recorded.
    pub failures: Vec<FailureKind>,
    /// Time taken to run the test body.
    pub duration: Duration,
}

impl TestOutcome {
    /// An outcome for a test that has not started yet.
    pub fn pending(identity: TestIdentity) -> Self {
        TestOutcome {
            identity,
            status: TestStatus::Pending,
            failures: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    /// Close the outcome once the body has ended.
    pub fn finish(&mut self, failures: Vec<FailureKind>, duration: Duration) {
        self.status = if failures.is_empty() {
            TestStatus::Passed
        } else {
            TestStatus::Failed
        };
        self.failures = failures;
        self.duration = duration;
    }

    pub fn passed(&self) -> bool {
        self.status == TestStatus::Passed
    }

    pub fn failed(&self) -> bool {
        self.status == TestStatus::Failed
    }
}

/// Lifecycle of a whole run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SuiteState {
    #[default]
    NotStarted,
    Running,
    Completed,
}

/// Summary of a completed run.
#[derive(Clone, Debug, Default)]
pub struct SuiteReport {
    /// Outcomes in run order.
    pub outcomes: Vec<TestOutcome>,
}

impl SuiteReport {
    pub fn new() -> Self {
        SuiteReport::default()
    }

    pub fn add(&mut self, outcome: TestOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.failed()).count()
    }

    /// Failed tests, in run order.
    pub fn failed_tests(&self) -> impl Iterator<Item = &TestOutcome> + '_ {
        self.outcomes.iter().filter(|o| o.failed())
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// Get exit code: 0 = all pass, 1 = any failure.
    ///
    /// Runs that never produce a report exit with
    /// [`InternalError::EXIT_CODE`](crate::InternalError::EXIT_CODE).
    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_failures())
    }
}
