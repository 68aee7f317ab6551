//! Execution outcome and streaming event types.

use serde::Serialize;

/// How a single `exec` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The process exited on its own.
    Completed {
        /// Exit code, verbatim (`-1` when killed by a signal).
        exit_code: i32,
    },
    /// The run was cancelled through `interrupt`.
    Cancelled,
}

impl ExecOutcome {
    /// Check if the process exited with code 0.
    pub fn success(&self) -> bool {
        matches!(self, ExecOutcome::Completed { exit_code: 0 })
    }

    /// Check if the run was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExecOutcome::Cancelled)
    }

    /// Exit code, if the process completed.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecOutcome::Completed { exit_code } => Some(*exit_code),
            ExecOutcome::Cancelled => None,
        }
    }
}

/// Source of a streamed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSource {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

/// One callback of a run, as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    /// The process was spawned.
    Started,
    /// A text line.
    Line {
        /// Stream the line came from.
        source: OutputSource,
        /// Line content without terminator.
        text: String,
    },
    /// Full stdout of a binary-output run.
    Bytes(Vec<u8>),
    /// The process exited.
    Completed(i32),
    /// The run is over.
    Finished,
}

impl OutputEvent {
    /// Create a stdout line event.
    pub fn stdout(text: impl Into<String>) -> Self {
        OutputEvent::Line {
            source: OutputSource::Stdout,
            text: text.into(),
        }
    }

    /// Create a stderr line event.
    pub fn stderr(text: impl Into<String>) -> Self {
        OutputEvent::Line {
            source: OutputSource::Stderr,
            text: text.into(),
        }
    }

    /// Check if this is the terminal event of a run.
    pub fn is_finished(&self) -> bool {
        matches!(self, OutputEvent::Finished)
    }
}
