//! # svn-runner
//!
//! Drive the Subversion command-line client from Rust.
//!
//! This crate launches `svn` as a subprocess with a fixed, non-localized
//! locale, streams its output line by line into a caller-supplied command
//! object, and classifies each line into a structured notification (path
//! and/or revision).
//!
//! ## Features
//!
//! - **Streaming execution**: output is delivered as it arrives, stdout
//!   before stderr
//! - **Cancellation**: `interrupt` kills the running client from any thread
//! - **Output classification**: an ordered table of known phrasings
//! - **Ready-made commands**: commit, update, checkout, cat, version, ...
//!
//! ## Quick Start
//!
//! ```no_run
//! use svn_runner::commands::{self, GlobalOptions};
//! use svn_runner::{ProcessRunner, RunnerConfig};
//!
//! fn main() -> svn_runner::Result<()> {
//!     svn_runner::logging::try_init().ok();
//!
//!     let runner = ProcessRunner::new(RunnerConfig::new().working_dir("/path/to/wc"));
//!     let mut cmd = commands::update(&GlobalOptions::default(), ["."], None);
//!     runner.exec(&mut cmd)?;
//!
//!     for path in cmd.paths() {
//!         println!("changed: {path}");
//!     }
//!     println!("now at r{:?}", cmd.revision());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod execution;
pub mod logging;
pub mod parser;

// Re-export commonly used types
pub use error::{Result, SvnRunnerError};
pub use execution::{ExecOutcome, OutputEvent, ProcessRunner, RunnerConfig, RunnerState, SvnCommand};
pub use parser::{classify, LineClassifier, LineKind, ParsedLine};
