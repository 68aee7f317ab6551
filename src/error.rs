//! Error types for svn-runner.

use thiserror::Error;

use crate::execution::RunnerState;

/// Main error type for svn-runner operations.
#[derive(Error, Debug)]
pub enum SvnRunnerError {
    /// I/O error while talking to the subprocess.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The executable could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Another command is already running on this runner.
    #[error("runner busy: another command is already executing")]
    Busy,

    /// Invalid runner state transition attempted.
    #[error("invalid state transition from {from:?} to {to:?}")]
    InvalidStateTransition { from: RunnerState, to: RunnerState },

    /// An output pattern failed to compile.
    #[error("invalid output pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Command output could not be interpreted.
    #[error("output parse error: {0}")]
    ParseError(String),
}

/// Convenience Result type for svn-runner operations.
pub type Result<T> = std::result::Result<T, SvnRunnerError>;
