//! Subprocess execution of the `svn` client.
//!
//! This module provides:
//! - The [`SvnCommand`] callback trait describing one invocation
//! - [`ProcessRunner`], which spawns `svn` with a fixed locale and streams
//!   its output into a command
//! - Cancellation through [`ProcessRunner::interrupt`]
//! - A channel-based wrapper for async callers
//!
//! # Example
//!
//! ```no_run
//! use svn_runner::execution::{CapturingCommand, ProcessRunner, RunnerConfig};
//!
//! let runner = ProcessRunner::new(RunnerConfig::new());
//! let mut cmd = CapturingCommand::new(["status", "--non-interactive"]);
//! let outcome = runner.exec(&mut cmd).unwrap();
//! println!("{:?}: {} lines", outcome, cmd.output.len());
//! ```

mod command;
mod environment;
mod result;
mod runner;
mod state;
mod stream;

pub use command::{CapturingCommand, SvnCommand};
pub use environment::{apply_locale, default_executable, FORCED_LOCALE};
pub use result::{ExecOutcome, OutputEvent, OutputSource};
pub use runner::{ProcessRunner, RunnerConfig, NO_EXIT_CODE, WAIT_POLL_INTERVAL};
pub use state::{AtomicRunnerState, RunnerState};
pub use stream::{StreamingCommand, EVENT_CHANNEL_CAPACITY};
