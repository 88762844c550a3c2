//! Errors raised while analyzing an error chain.

/// Failure to capture an error chain.
///
/// These are never test failures: the runner treats them as fatal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// The cause chain is longer than the capture limit, usually because
    /// `source()` forms a cycle.
    #[error("error chain too deep: more than {limit} nested causes")]
    TooDeep { limit: usize },
}
