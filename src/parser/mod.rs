//! Classification of `svn` text output.
//!
//! Each line is matched against an ordered table of known phrasings. The
//! table assumes the untranslated messages that
//! [`ProcessRunner`](crate::execution::ProcessRunner) forces through the
//! locale environment.
//!
//! # Example
//!
//! ```
//! use svn_runner::parser::{classify, LineKind};
//!
//! let parsed = classify("Committed revision 42.").unwrap();
//! assert_eq!(parsed.kind, LineKind::CommittedRevision);
//! assert_eq!(parsed.revision, Some(42));
//!
//! assert!(classify("some free-form banner text").is_none());
//! ```

mod classifier;
mod patterns;

pub use classifier::{classify, LineClassifier, ParsedLine, INVALID_REVISION};
pub use patterns::{default_patterns, Extraction, LineKind, PatternEntry};
