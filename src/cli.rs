//! Command-line interface for svn-runner.
//!
//! Uses lexopt for minimal binary size overhead. Everything from the first
//! positional argument on is passed to `svn` untouched.

use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Path to the `svn` executable.
    pub executable: Option<PathBuf>,
    /// Working directory for the command.
    pub working_dir: Option<PathBuf>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Subversion runtime configuration directory.
    pub config_dir: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Allow svn to prompt (drops `--non-interactive`).
    pub interactive: bool,
    /// Treat stdout as binary and copy it through unclassified.
    pub binary: bool,
    /// Print classified lines as JSON.
    pub json: bool,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
    /// Subcommand and arguments for svn.
    pub svn_args: Vec<String>,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('e') | Long("executable") => {
                result.executable = Some(parser.value()?.parse()?);
            }
            Short('C') | Long("working-dir") => {
                result.working_dir = Some(parser.value()?.parse()?);
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Long("config-dir") => {
                result.config_dir = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Long("interactive") => {
                result.interactive = true;
            }
            Long("binary") => {
                result.binary = true;
            }
            Long("json") => {
                result.json = true;
            }
            Value(val) => {
                result.svn_args.push(into_string(val)?);
                for raw in parser.raw_args()? {
                    result.svn_args.push(into_string(raw)?);
                }
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    if result.svn_args.is_empty() && !result.help && !result.version {
        return Err(ArgsError::MissingCommand);
    }

    Ok(result)
}

fn into_string(value: OsString) -> Result<String, ArgsError> {
    value
        .into_string()
        .map_err(|v| ArgsError::InvalidValue("argument", v.to_string_lossy().into_owned()))
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"svn-runner {version}
Run the Subversion client and classify its output

USAGE:
    svn-runner [OPTIONS] [--] <SUBCOMMAND> [SVN ARGS]...

OPTIONS:
    -e, --executable <PATH>   Path to the svn executable [default: svn on PATH]
    -C, --working-dir <DIR>   Run svn in this directory
    -c, --config <FILE>       Path to configuration file (JSON)
        --config-dir <DIR>    Subversion runtime configuration directory
    -l, --log-level <LVL>     Log level (error, warn, info, debug, trace)
        --interactive         Allow svn to prompt
        --binary              Copy stdout through as raw bytes
        --json                Print one JSON object per output line
    -h, --help                Print help
    -V, --version             Print version

ENVIRONMENT VARIABLES:
    SVN_RUNNER_EXECUTABLE     svn executable (overrides config)
    SVN_RUNNER_CONFIG_DIR     Runtime configuration directory (overrides config)
    SVN_RUNNER_LOG_LEVEL      Log level (overrides config)
    RUST_LOG                  Alternative log level setting

EXAMPLES:
    # Update the working copy in the current directory
    svn-runner update

    # Commit with JSON notifications
    svn-runner --json commit -m "Fix build" src/

    # Fetch a file at a revision
    svn-runner --binary cat -r 42 trunk/logo.png > logo.png
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("svn-runner {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// No svn subcommand given.
    MissingCommand,
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for {}: '{}'", name, value)
            }
            Self::MissingCommand => write!(f, "missing svn subcommand"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
