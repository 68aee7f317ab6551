//! Argument vectors for `svn` subcommands.

use std::fmt;
use std::path::PathBuf;

/// A revision selector for `-r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revision {
    /// An explicit revision number.
    Number(i64),
    /// Latest in the repository.
    Head,
    /// Pristine working copy base.
    Base,
    /// Last change at or before base.
    Committed,
    /// Revision just before the last change.
    Prev,
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::Number(n) => write!(f, "{n}"),
            Revision::Head => f.write_str("HEAD"),
            Revision::Base => f.write_str("BASE"),
            Revision::Committed => f.write_str("COMMITTED"),
            Revision::Prev => f.write_str("PREV"),
        }
    }
}

/// Options passed to every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalOptions {
    /// Never prompt (`--non-interactive`).
    pub non_interactive: bool,
    /// Alternate runtime configuration directory (`--config-dir`).
    pub config_dir: Option<PathBuf>,
    /// User name for authentication (`--username`).
    pub username: Option<String>,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            non_interactive: true,
            config_dir: None,
            username: None,
        }
    }
}

impl GlobalOptions {
    fn push_to(&self, args: &mut Vec<String>) {
        if self.non_interactive {
            args.push("--non-interactive".into());
        }
        if let Some(dir) = &self.config_dir {
            args.push("--config-dir".into());
            args.push(dir.to_string_lossy().into_owned());
        }
        if let Some(user) = &self.username {
            args.push("--username".into());
            args.push(user.clone());
        }
    }
}

/// Builder for one subcommand's argument vector.
///
/// Renders as `subcommand [global options] [options] [targets]`.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    subcommand: String,
    global: Option<GlobalOptions>,
    options: Vec<String>,
    targets: Vec<String>,
}

impl Arguments {
    /// Start an argument vector for `subcommand`.
    pub fn new(subcommand: impl Into<String>) -> Self {
        Self {
            subcommand: subcommand.into(),
            ..Default::default()
        }
    }

    /// Attach global options.
    pub fn global(mut self, global: &GlobalOptions) -> Self {
        self.global = Some(global.clone());
        self
    }

    /// Add a bare flag such as `--force`.
    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.options.push(flag.into());
        self
    }

    /// Add a flag only when `enabled`.
    pub fn flag_if(self, enabled: bool, flag: impl Into<String>) -> Self {
        if enabled {
            self.flag(flag)
        } else {
            self
        }
    }

    /// Add an option with a value such as `-m <message>`.
    pub fn option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push(name.into());
        self.options.push(value.into());
        self
    }

    /// Add `-r <revision>` when a revision is given.
    pub fn revision(self, revision: Option<Revision>) -> Self {
        match revision {
            Some(rev) => self.option("-r", rev.to_string()),
            None => self,
        }
    }

    /// Add one target (path or URL).
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.targets.push(target.into());
        self
    }

    /// Add several targets.
    pub fn targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets.extend(targets.into_iter().map(Into::into));
        self
    }

    /// Render the argument vector.
    pub fn build(&self) -> Vec<String> {
        let mut args = vec![self.subcommand.clone()];
        if let Some(global) = &self.global {
            global.push_to(&mut args);
        }
        args.extend(self.options.iter().cloned());
        args.extend(self.targets.iter().cloned());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_display() {
        assert_eq!(Revision::Number(42).to_string(), "42");
        assert_eq!(Revision::Head.to_string(), "HEAD");
        assert_eq!(Revision::Base.to_string(), "BASE");
        assert_eq!(Revision::Committed.to_string(), "COMMITTED");
        assert_eq!(Revision::Prev.to_string(), "PREV");
    }

    #[test]
    fn test_global_defaults() {
        let args = Arguments::new("status").global(&GlobalOptions::default()).build();
        assert_eq!(args, vec!["status", "--non-interactive"]);
    }

    #[test]
    fn test_global_full() {
        let global = GlobalOptions {
            non_interactive: false,
            config_dir: Some(PathBuf::from("/home/u/.subversion")),
            username: Some("jrandom".into()),
        };
        let args = Arguments::new("update").global(&global).build();
        assert_eq!(
            args,
            vec![
                "update",
                "--config-dir",
                "/home/u/.subversion",
                "--username",
                "jrandom"
            ]
        );
    }

    #[test]
    fn test_order() {
        let args = Arguments::new("commit")
            .targets(["a.txt", "b.txt"])
            .option("-m", "fix")
            .flag_if(false, "--keep-locks")
            .flag_if(true, "--no-unlock")
            .revision(None)
            .build();
        assert_eq!(args, vec!["commit", "-m", "fix", "--no-unlock", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_revision_option() {
        let args = Arguments::new("cat")
            .revision(Some(Revision::Number(7)))
            .target("file")
            .build();
        assert_eq!(args, vec!["cat", "-r", "7", "file"]);
    }
}
