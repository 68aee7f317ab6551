//! Subprocess environment setup.
//!
//! `svn` localizes its messages and dates. The output classifier only knows
//! the untranslated phrasings, so every child runs with these overrides.

use std::process::Command;

/// Locale variables forced on every child process.
pub const FORCED_LOCALE: [(&str, &str); 3] = [("LC_ALL", ""), ("LC_MESSAGES", "C"), ("LC_TIME", "C")];

/// Get the default executable name for the current platform.
pub fn default_executable() -> &'static str {
    #[cfg(windows)]
    {
        "svn.exe"
    }
    #[cfg(not(windows))]
    {
        "svn"
    }
}

/// Apply [`FORCED_LOCALE`] on top of the inherited environment.
pub fn apply_locale(cmd: &mut Command) -> &mut Command {
    for (key, value) in FORCED_LOCALE {
        cmd.env(key, value);
    }
    cmd
}
