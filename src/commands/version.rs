//! Client version detection (`svn --version --quiet`).

use std::fmt;
use std::str::FromStr;

use crate::error::SvnRunnerError;
use crate::execution::SvnCommand;
use crate::Result;

/// A `major.minor.patch` client version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SvnVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SvnVersion {
    /// Oldest client whose output the classifier understands.
    pub const MINIMUM_SUPPORTED: SvnVersion = SvnVersion::new(1, 5, 0);

    /// Create a version.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Check if this client is new enough.
    pub fn is_supported(&self) -> bool {
        *self >= Self::MINIMUM_SUPPORTED
    }
}

impl fmt::Display for SvnVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SvnVersion {
    type Err = SvnRunnerError;

    /// Parses the leading `X.Y[.Z]` of a version string; vendor suffixes
    /// such as `1.14.2-SlikSvn` or ` (r1899510)` are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SvnRunnerError::ParseError(format!("invalid svn version: '{s}'"));
        let end = s
            .trim()
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(s.trim().len());
        let mut parts = s.trim()[..end].split('.');

        let mut next = |required: bool| -> Result<u32> {
            match parts.next() {
                Some(p) if !p.is_empty() => p.parse().map_err(|_| invalid()),
                Some("") | None if !required => Ok(0),
                _ => Err(invalid()),
            }
        };
        let major = next(true)?;
        let minor = next(true)?;
        let patch = next(false)?;
        Ok(Self::new(major, minor, patch))
    }
}

/// Asks the client for its version.
#[derive(Debug, Clone, Default)]
pub struct VersionCommand {
    first_line: Option<String>,
    exit_code: Option<i32>,
}

impl VersionCommand {
    /// Create the command.
    pub fn new() -> Self {
        Self::default()
    }

    /// The parsed version.
    pub fn version(&self) -> Result<SvnVersion> {
        self.first_line
            .as_deref()
            .ok_or_else(|| SvnRunnerError::ParseError("svn printed no version".into()))?
            .parse()
    }

    /// Exit code, if the process completed.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }
}

impl SvnCommand for VersionCommand {
    fn arguments(&self) -> Vec<String> {
        vec!["--version".into(), "--quiet".into()]
    }

    fn output_line(&mut self, line: &str) {
        if self.first_line.is_none() && !line.trim().is_empty() {
            self.first_line = Some(line.to_string());
        }
    }

    fn completed(&mut self, exit_code: i32) {
        self.exit_code = Some(exit_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let v: SvnVersion = "1.14.2".parse().unwrap();
        assert_eq!(v, SvnVersion::new(1, 14, 2));
        assert_eq!(v.to_string(), "1.14.2");
    }

    #[test]
    fn test_parse_with_suffix() {
        assert_eq!(
            "1.14.2-SlikSvn".parse::<SvnVersion>().unwrap(),
            SvnVersion::new(1, 14, 2)
        );
        assert_eq!(
            " 1.9.7 (r1800392)\n".parse::<SvnVersion>().unwrap(),
            SvnVersion::new(1, 9, 7)
        );
        assert_eq!("1.8".parse::<SvnVersion>().unwrap(), SvnVersion::new(1, 8, 0));
        assert_eq!("1.8.".parse::<SvnVersion>().unwrap(), SvnVersion::new(1, 8, 0));
        assert_eq!("1.8.-dev".parse::<SvnVersion>().unwrap(), SvnVersion::new(1, 8, 0));
    }

    #[test]
    fn test_parse_invalid() {
        assert!("".parse::<SvnVersion>().is_err());
        assert!("svn".parse::<SvnVersion>().is_err());
        assert!("1".parse::<SvnVersion>().is_err());
        assert!("1..2".parse::<SvnVersion>().is_err());
    }

    #[test]
    fn test_supported() {
        assert!(SvnVersion::new(1, 14, 0).is_supported());
        assert!(SvnVersion::new(1, 5, 0).is_supported());
        assert!(!SvnVersion::new(1, 4, 6).is_supported());
    }

    #[test]
    fn test_version_command() {
        let mut cmd = VersionCommand::new();
        assert_eq!(cmd.arguments(), vec!["--version", "--quiet"]);
        assert!(cmd.version().is_err());

        cmd.output_line("");
        cmd.output_line("1.10.0");
        cmd.output_line("ignored");
        cmd.completed(0);

        assert_eq!(cmd.version().unwrap(), SvnVersion::new(1, 10, 0));
        assert_eq!(cmd.exit_code(), Some(0));
    }
}
