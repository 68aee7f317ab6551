//! Turns single lines of `svn` output into structured records.

use std::borrow::Cow;

use serde::Serialize;
use tracing::warn;

use super::patterns::{default_patterns, Extraction, LineKind, PatternEntry};

/// Revision reported when a matched revision group does not parse.
pub const INVALID_REVISION: i64 = -1;

/// Structured data extracted from one output line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedLine {
    /// Which phrasing matched.
    pub kind: LineKind,
    /// Path named by the line, if the phrasing carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Revision named by the line, if the phrasing carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
}

/// Matches lines against an ordered rule table. First match wins.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    patterns: Cow<'static, [PatternEntry]>,
}

impl LineClassifier {
    /// Create a classifier over the built-in table.
    pub fn new() -> Self {
        Self {
            patterns: Cow::Borrowed(default_patterns()),
        }
    }

    /// Create a classifier over a custom table.
    pub fn with_patterns(patterns: Vec<PatternEntry>) -> Self {
        Self {
            patterns: Cow::Owned(patterns),
        }
    }

    /// The rule table, in match order.
    pub fn patterns(&self) -> &[PatternEntry] {
        &self.patterns
    }

    /// Classify one line.
    ///
    /// Returns `None` for lines that match no rule; those are free-form
    /// messages meant for display.
    pub fn classify(&self, line: &str) -> Option<ParsedLine> {
        self.patterns.iter().find_map(|entry| {
            let caps = entry.regex().captures(line)?;
            let text = |group: usize| caps.get(group).map(|m| m.as_str());

            let (path, revision) = match entry.extraction() {
                Extraction::NoPayload => (None, None),
                Extraction::Path(p) => (text(p), None),
                Extraction::Revision(r) => (None, text(r)),
                Extraction::PathAndRevision { path, revision } => (text(path), text(revision)),
            };

            Some(ParsedLine {
                kind: entry.kind(),
                path: path.map(str::to_string),
                revision: revision.map(|r| parse_revision(r, line)),
            })
        })
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify `line` against the built-in table.
pub fn classify(line: &str) -> Option<ParsedLine> {
    LineClassifier::new().classify(line)
}

fn parse_revision(text: &str, line: &str) -> i64 {
    text.parse().unwrap_or_else(|e| {
        warn!(revision = text, line, error = %e, "unparseable revision in svn output");
        INVALID_REVISION
    })
}
