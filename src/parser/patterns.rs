//! The table of known `svn` output phrasings.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::SvnRunnerError;
use crate::Result;

/// What a recognized output line announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Added,
    Sending,
    Deleted,
    Replaced,
    Updated,
    Conflicted,
    Merged,
    Existed,
    Skipped,
    Locked,
    Unlocked,
    Reverted,
    Resolved,
    Restored,
    UpdatingPath,
    FetchingExternal,
    CheckedOut,
    UpdatedToRevision,
    AtRevision,
    ExportedRevision,
    CommittedRevision,
    ExternalRevision,
    TransmittingData,
    ConflictSummary,
}

impl LineKind {
    /// Check if lines of this kind report the revision an operation reached.
    pub fn is_final_revision(&self) -> bool {
        matches!(
            self,
            LineKind::CheckedOut
                | LineKind::UpdatedToRevision
                | LineKind::AtRevision
                | LineKind::ExportedRevision
                | LineKind::CommittedRevision
        )
    }
}

/// Which capture groups of a pattern carry data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// The line is recognized but carries no fields.
    NoPayload,
    /// Group holding a path.
    Path(usize),
    /// Group holding a revision number.
    Revision(usize),
    /// Groups holding a path and a revision number.
    PathAndRevision { path: usize, revision: usize },
}

impl Extraction {
    fn groups(&self) -> impl Iterator<Item = usize> {
        let (a, b) = match *self {
            Extraction::NoPayload => (None, None),
            Extraction::Path(g) | Extraction::Revision(g) => (Some(g), None),
            Extraction::PathAndRevision { path, revision } => (Some(path), Some(revision)),
        };
        a.into_iter().chain(b)
    }
}

/// One rule of the classification table.
#[derive(Clone)]
pub struct PatternEntry {
    kind: LineKind,
    regex: Regex,
    extraction: Extraction,
}

impl PatternEntry {
    /// Compile a rule. `pattern` is anchored so it only matches whole lines.
    pub fn new(kind: LineKind, pattern: &str, extraction: Extraction) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        if let Some(group) = extraction.groups().find(|&g| g == 0 || g >= regex.captures_len()) {
            return Err(SvnRunnerError::ParseError(format!(
                "pattern '{pattern}' has no capture group {group}"
            )));
        }
        Ok(Self {
            kind,
            regex,
            extraction,
        })
    }

    /// Kind reported by this rule.
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// Capture groups carrying data.
    pub fn extraction(&self) -> Extraction {
        self.extraction
    }

    /// The compiled, anchored expression.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl fmt::Debug for PatternEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternEntry")
            .field("kind", &self.kind)
            .field("regex", &self.regex.as_str())
            .field("extraction", &self.extraction)
            .finish()
    }
}

/// Update/checkout/merge status line: action letter, optional property,
/// lock and tree-conflict columns, then the path.
fn status_code_line(action: char) -> String {
    format!("{action}[ADUCGRM ]?[ B]?[ C]? +(\\S.*)")
}

static DEFAULT_PATTERNS: LazyLock<Vec<PatternEntry>> = LazyLock::new(|| {
    use Extraction::*;
    use LineKind::*;

    let rules: Vec<(LineKind, String, Extraction)> = vec![
        (CheckedOut, r"Checked out revision (\d+)\.".into(), Revision(1)),
        (ExternalRevision, r"Checked out external at revision (\d+)\.".into(), Revision(1)),
        (UpdatedToRevision, r"Updated to revision (\d+)\.".into(), Revision(1)),
        (ExternalRevision, r"Updated external to revision (\d+)\.".into(), Revision(1)),
        (AtRevision, r"At revision (\d+)\.".into(), Revision(1)),
        (ExternalRevision, r"External at revision (\d+)\.".into(), Revision(1)),
        (ExportedRevision, r"Exported revision (\d+)\.".into(), Revision(1)),
        (ExternalRevision, r"Exported external at revision (\d+)\.".into(), Revision(1)),
        (CommittedRevision, r"Committed revision (\d+)\.".into(), Revision(1)),
        (TransmittingData, r"Transmitting file data \.*(?:done)?".into(), NoPayload),
        (ConflictSummary, r"Summary of conflicts:".into(), NoPayload),
        (UpdatingPath, r"Updating '(.+)':".into(), Path(1)),
        (FetchingExternal, r"Fetching external item into '(.+)':?".into(), Path(1)),
        (Added, r"Adding(?: +\(bin\))? +(\S.*)".into(), Path(1)),
        (Sending, r"Sending +(\S.*)".into(), Path(1)),
        (Deleted, r"Deleting +(\S.*)".into(), Path(1)),
        (Replaced, r"Replacing(?: +\(bin\))? +(\S.*)".into(), Path(1)),
        (Locked, r"'(.+)' locked by user '[^']*'\.".into(), Path(1)),
        (Unlocked, r"'(.+)' unlocked\.".into(), Path(1)),
        (Reverted, r"Reverted '(.+)'".into(), Path(1)),
        (Resolved, r"Resolved conflicted state of '(.+)'".into(), Path(1)),
        (Restored, r"Restored '(.+)'".into(), Path(1)),
        (Skipped, r"Skipped(?: missing target)?:? '(.+?)'(?: -- .*)?".into(), Path(1)),
        (Added, status_code_line('A'), Path(1)),
        (Deleted, status_code_line('D'), Path(1)),
        (Updated, status_code_line('U'), Path(1)),
        (Conflicted, status_code_line('C'), Path(1)),
        (Merged, status_code_line('G'), Path(1)),
        (Existed, status_code_line('E'), Path(1)),
        (Replaced, status_code_line('R'), Path(1)),
        // Property-only change: blank action column.
        (Updated, r" [UCG][ B]?[ C]? +(\S.*)".into(), Path(1)),
    ];

    rules
        .into_iter()
        .map(|(kind, pattern, extraction)| {
            PatternEntry::new(kind, &pattern, extraction).expect("built-in output pattern")
        })
        .collect()
});

/// The built-in rule table, in match order.
pub fn default_patterns() -> &'static [PatternEntry] {
    &DEFAULT_PATTERNS
}
