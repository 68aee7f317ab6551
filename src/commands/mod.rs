//! Ready-made [`SvnCommand`](crate::execution::SvnCommand) implementations.
//!
//! Working-copy operations (`commit`, `update`, `checkout`, ...) produce a
//! [`NotifyingCommand`] that classifies every output line. [`CatCommand`]
//! fetches file content as bytes and [`VersionCommand`] probes the client.
//!
//! # Example
//!
//! ```no_run
//! use svn_runner::commands::{self, GlobalOptions};
//! use svn_runner::execution::{ProcessRunner, RunnerConfig};
//!
//! let runner = ProcessRunner::new(RunnerConfig::new().working_dir("/path/to/wc"));
//! let mut cmd = commands::commit(&GlobalOptions::default(), ["."], "Fix typo");
//! runner.exec(&mut cmd).unwrap();
//! println!("committed r{:?}", cmd.revision());
//! ```

mod arguments;
mod cat;
mod notify;
mod ops;
mod version;

pub use arguments::{Arguments, GlobalOptions, Revision};
pub use cat::CatCommand;
pub use notify::{NotificationListener, NotifyingCommand};
pub use ops::{add, checkout, commit, export, lock, raw, remove, revert, switch, unlock, update};
pub use version::{SvnVersion, VersionCommand};
