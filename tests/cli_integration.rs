//! CLI integration tests.
//!
//! These tests verify the CLI argument parsing and configuration loading.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

use svn_runner::cli::{parse_args_from, Args};
use svn_runner::config::{Config, ConfigError};

fn args(args: &[&str]) -> Vec<OsString> {
    std::iter::once("svn-runner")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect()
}

// ============================================================================
// CLI Argument Tests
// ============================================================================

#[test]
fn test_cli_defaults() {
    let result = parse_args_from(args(&["status"])).unwrap();

    assert!(result.executable.is_none());
    assert!(result.working_dir.is_none());
    assert!(result.config.is_none());
    assert!(!result.interactive);
    assert!(!result.binary);
    assert!(!result.json);
    assert_eq!(result.svn_args, vec!["status"]);
}

#[test]
fn test_cli_full_options() {
    let result = parse_args_from(args(&[
        "-e",
        "/usr/local/bin/svn",
        "-l",
        "debug",
        "--json",
        "update",
        "-r",
        "HEAD",
        "wc",
    ]))
    .unwrap();

    assert_eq!(result.executable, Some(PathBuf::from("/usr/local/bin/svn")));
    assert_eq!(result.log_level, Some("debug".to_string()));
    assert!(result.json);
    assert_eq!(result.svn_args, vec!["update", "-r", "HEAD", "wc"]);
}

#[test]
fn test_cli_runner_options_after_subcommand_go_to_svn() {
    let result = parse_args_from(args(&["log", "--json", "-l", "5"])).unwrap();

    assert!(!result.json);
    assert!(result.log_level.is_none());
    assert_eq!(result.svn_args, vec!["log", "--json", "-l", "5"]);
}

#[test]
fn test_cli_missing_subcommand() {
    assert!(parse_args_from(args(&["--json"])).is_err());
}

// ============================================================================
// Configuration Loading Tests
// ============================================================================

#[test]
fn test_config_from_json_file() {
    let json = r#"{
        "svn": {
            "executable": "/opt/subversion/bin/svn",
            "non_interactive": true,
            "config_dir": "/etc/subversion",
            "username": "builder"
        },
        "logging": {
            "level": "warn"
        }
    }"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(
        config.svn.executable,
        Some(PathBuf::from("/opt/subversion/bin/svn"))
    );
    assert_eq!(config.svn.config_dir, Some(PathBuf::from("/etc/subversion")));
    assert_eq!(config.svn.username.as_deref(), Some("builder"));
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_config_load_args_override_file() {
    let json = r#"{ "svn": { "executable": "/from/file/svn" }, "logging": { "level": "warn" } }"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let args = Args {
        config: Some(file.path().to_path_buf()),
        executable: Some(PathBuf::from("/from/args/svn")),
        log_level: Some("trace".to_string()),
        interactive: true,
        svn_args: vec!["status".to_string()],
        ..Args::default()
    };

    let config = Config::load(&args).unwrap();
    assert_eq!(config.svn.executable, Some(PathBuf::from("/from/args/svn")));
    assert_eq!(config.log_filter(), "trace");
    assert!(!config.to_global_options().non_interactive);
}

#[test]
fn test_config_load_missing_file() {
    let args = Args {
        config: Some(PathBuf::from("/nonexistent/svn-runner.json")),
        ..Args::default()
    };

    let result = Config::load(&args);
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_config_load_rejects_missing_working_dir() {
    let args = Args {
        working_dir: Some(PathBuf::from("/nonexistent/svn-runner/wc")),
        ..Args::default()
    };

    let result = Config::load(&args);
    assert!(matches!(result, Err(ConfigError::InvalidWorkingDir(_))));
}

#[test]
fn test_config_to_runner_config() {
    let dir = tempfile::tempdir().unwrap();
    let args = Args {
        executable: Some(PathBuf::from("/bin/svn")),
        working_dir: Some(dir.path().to_path_buf()),
        ..Args::default()
    };

    let config = Config::load(&args).unwrap();
    let runner = config.to_runner_config();
    assert_eq!(runner.executable, Some(PathBuf::from("/bin/svn")));
    assert_eq!(runner.working_dir, Some(dir.path().to_path_buf()));
}
