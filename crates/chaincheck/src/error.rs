//! Fatal errors that end the whole run.

use chaincheck_chain::ChainError;

/// An error in the framework itself or in how it is used.
///
/// Unlike test failures, these abort the run and never show up as a failed
/// test.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InternalError {
    #[error("no tests to run")]
    NoTests,
    #[error("test `{name}` registered twice at {file}:{line}")]
    DuplicateTest {
        file: &'static str,
        line: u32,
        name: &'static str,
    },
    #[error(transparent)]
    Chain(#[from] ChainError),
    #[error("the test suite has already run")]
    AlreadyRan,
}

impl InternalError {
    /// Process exit status for any internal error.
    pub const EXIT_CODE: i32 = 2;
}
