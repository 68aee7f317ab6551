//! Configuration management for svn-runner.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::commands::GlobalOptions;
use crate::execution::RunnerConfig;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Client configuration.
    pub svn: SvnSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Client configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SvnSection {
    /// Path to the `svn` executable (PATH lookup when unset).
    pub executable: Option<PathBuf>,
    /// Working directory for commands.
    pub working_dir: Option<PathBuf>,
    /// Pass `--non-interactive`.
    pub non_interactive: bool,
    /// Pass `--config-dir`.
    pub config_dir: Option<PathBuf>,
    /// Pass `--username`.
    pub username: Option<String>,
}

impl Default for SvnSection {
    fn default() -> Self {
        Self {
            executable: None,
            working_dir: None,
            non_interactive: true,
            config_dir: None,
            username: None,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source (for testing).
    pub fn apply_env_from<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(exe) = var("SVN_RUNNER_EXECUTABLE").filter(|v| !v.is_empty()) {
            self.svn.executable = Some(exe.into());
        }

        if let Some(dir) = var("SVN_RUNNER_CONFIG_DIR").filter(|v| !v.is_empty()) {
            self.svn.config_dir = Some(dir.into());
        }

        if let Some(level) = var("SVN_RUNNER_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Some(level) = var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref exe) = args.executable {
            self.svn.executable = Some(exe.clone());
        }

        if let Some(ref dir) = args.working_dir {
            self.svn.working_dir = Some(dir.clone());
        }

        if let Some(ref dir) = args.config_dir {
            self.svn.config_dir = Some(dir.clone());
        }

        if args.interactive {
            self.svn.non_interactive = false;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut config = Config::default();

        // Load from config file if specified
        if let Some(ref path) = args.config {
            config = Config::from_file(path)?;
        }

        config.apply_env();
        config.apply_args(args);

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.svn.working_dir {
            if !dir.is_dir() {
                return Err(ConfigError::InvalidWorkingDir(dir.clone()));
            }
        }
        Ok(())
    }

    /// Convert to the runner configuration.
    pub fn to_runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            executable: self.svn.executable.clone(),
            working_dir: self.svn.working_dir.clone(),
        }
    }

    /// Convert to the options passed to every subcommand.
    pub fn to_global_options(&self) -> GlobalOptions {
        GlobalOptions {
            non_interactive: self.svn.non_interactive,
            config_dir: self.svn.config_dir.clone(),
            username: self.svn.username.clone(),
        }
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// Working directory does not exist.
    InvalidWorkingDir(PathBuf),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidWorkingDir(dir) => {
                write!(f, "working directory does not exist: {}", dir.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.svn.executable.is_none());
        assert!(config.svn.non_interactive);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "svn": {
                "executable": "/opt/svn/bin/svn",
                "non_interactive": false,
                "username": "jrandom"
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.svn.executable, Some(PathBuf::from("/opt/svn/bin/svn")));
        assert!(!config.svn.non_interactive);
        assert_eq!(config.svn.username.as_deref(), Some("jrandom"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_partial_json() {
        let json = r#"{ "svn": { "config_dir": "/etc/subversion" } }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert!(config.svn.non_interactive); // Default
        assert_eq!(config.svn.config_dir, Some(PathBuf::from("/etc/subversion")));
    }

    #[test]
    fn test_config_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let result = Config::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_apply_env() {
        let mut config = Config::default();
        config.apply_env_from(vars(&[
            ("SVN_RUNNER_EXECUTABLE", "/usr/local/bin/svn"),
            ("SVN_RUNNER_CONFIG_DIR", "/tmp/svncfg"),
            ("SVN_RUNNER_LOG_LEVEL", "trace"),
            ("RUST_LOG", "warn"),
        ]));

        assert_eq!(config.svn.executable, Some(PathBuf::from("/usr/local/bin/svn")));
        assert_eq!(config.svn.config_dir, Some(PathBuf::from("/tmp/svncfg")));
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_apply_env_rust_log_fallback() {
        let mut config = Config::default();
        config.apply_env_from(vars(&[("RUST_LOG", "svn_runner=debug")]));
        assert_eq!(config.logging.level, "svn_runner=debug");
    }

    #[test]
    fn test_apply_env_ignores_empty() {
        let mut config = Config::default();
        config.apply_env_from(vars(&[("SVN_RUNNER_EXECUTABLE", "")]));
        assert!(config.svn.executable.is_none());
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        let args = Args {
            executable: Some("/bin/svn".into()),
            config_dir: Some("/cfg".into()),
            interactive: true,
            log_level: Some("debug".to_string()),
            ..Args::default()
        };

        config.apply_args(&args);

        assert_eq!(config.svn.executable, Some(PathBuf::from("/bin/svn")));
        assert_eq!(config.svn.config_dir, Some(PathBuf::from("/cfg")));
        assert!(!config.svn.non_interactive);
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_validate_working_dir() {
        let mut config = Config::default();
        config.svn.working_dir = Some(PathBuf::from("/nonexistent/svn-runner/wc"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWorkingDir(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        config.svn.working_dir = Some(dir.path().to_path_buf());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_conversions() {
        let mut config = Config::default();
        config.svn.executable = Some("/opt/svn".into());
        config.svn.username = Some("u".into());

        let runner = config.to_runner_config();
        assert_eq!(runner.executable, Some(PathBuf::from("/opt/svn")));

        let global = config.to_global_options();
        assert!(global.non_interactive);
        assert_eq!(global.username.as_deref(), Some("u"));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("\"non_interactive\""));
        assert!(json.contains("\"level\""));
    }
}
