//! Sequential test runner with error chain verification.
//!
//! Tests are plain functions taking a [`TestContext`] and returning [`Flow`].
//! They are collected into a [`Registry`] and run in order by a
//! [`TestRunner`], which reports progress and failures line by line.
//!
//! Besides boolean checks, a test can demand that an expression raises an
//! error and spell out the whole chain of causes it expects. When the caught
//! chain differs, the failure shows both chains side by side:
//!
//! ```text
//!   .        [   .    ]     Incorrect error at:  tests/base.rs:40
//!   .        [   .    ]     Error chain:
//!   .        [   .    ]         Caught                 | Expected
//!   .        [   .    ]         LogicFailure           | LogicFailure
//!   .        [   .    ]             while doing stuff: |     while doing stuff:
//!   .        [   .    ]         (none)                 # RuntimeFailure
//!   .        [   .    ]            .                   #     fail
//! ```
//!
//! A minimal test binary:
//!
//! ```no_run
//! use chaincheck::{check, register_test, Flow, Registry, RunnerConfig, TestContext};
//!
//! fn adds(ctx: &mut TestContext<'_>) -> Flow {
//!     check!(ctx, 1 + 1 == 2);
//!     Ok(())
//! }
//!
//! let mut registry = Registry::new();
//! register_test!(registry, adds);
//! std::process::exit(chaincheck::run_tests(registry, RunnerConfig::from_env()));
//! ```
//!
//! Causes reached through [`std::error::Error::source`] are shown by type once
//! the type is added with [`Registry::register_error_type`]; any other cause
//! shows up as `dyn Error`.

mod config;
mod context;
mod error;
mod logging;
mod macros;
mod panics;
mod registry;
mod report;
mod result;
mod runner;

pub use config::{RunnerConfig, COLOR_ENV};
pub use context::{BodyResult, IntoVerdict, OnFailure, Site, TestContext};
pub use error::InternalError;
pub use logging::{init_tracing, LOG_ENV};
pub use registry::{Registry, TestCase, TestFn, TestIdentity};
pub use report::{ColorMode, Failure, ReportSink, Reporter};
pub use result::{FailureKind, SuiteReport, SuiteState, TestOutcome, TestStatus};
pub use runner::{run_tests, TestRunner};

pub use chaincheck_chain::{
    ChainElement, ErrorChain, Escape, Expect, Flow, Interrupt, NestExt, Raised, TypeNameStyle,
    TypeRegistry, TypeTag,
};
