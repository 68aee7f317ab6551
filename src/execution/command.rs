//! The command abstraction driven by the runner.

/// One invocation of the external `svn` client.
///
/// The runner owns the process; the command owns the arguments and decides
/// what to do with the output. Every callback has an empty default so
/// implementors only override what they consume.
///
/// Callback order for one `exec`:
/// `started`, then `output_line`* (or a single `output_bytes`), then
/// `error_line`*, then `completed`, then `finished`. `completed` is skipped
/// when the run is cancelled or fails; `finished` is never skipped.
pub trait SvnCommand: Send {
    /// Arguments appended after the executable (subcommand, options, targets).
    fn arguments(&self) -> Vec<String>;

    /// Whether stdout carries raw bytes (e.g. `svn cat`) instead of text.
    fn has_binary_output(&self) -> bool {
        false
    }

    /// The process was spawned.
    fn started(&mut self) {}

    /// One line of text output, without its terminator.
    fn output_line(&mut self, _line: &str) {}

    /// The complete stdout of a binary-output command.
    fn output_bytes(&mut self, _bytes: Vec<u8>) {}

    /// One non-empty line of stderr.
    fn error_line(&mut self, _line: &str) {}

    /// The process exited with `exit_code`.
    fn completed(&mut self, _exit_code: i32) {}

    /// The run is over, whatever the outcome.
    fn finished(&mut self) {}
}

/// A command that records everything it receives.
#[derive(Debug, Clone, Default)]
pub struct CapturingCommand {
    args: Vec<String>,
    binary: bool,
    /// Text lines from stdout.
    pub output: Vec<String>,
    /// Raw stdout of a binary-output run.
    pub bytes: Option<Vec<u8>>,
    /// Lines from stderr.
    pub errors: Vec<String>,
    /// Exit code, if the process completed.
    pub exit_code: Option<i32>,
    /// Whether `finished` was called.
    pub finished: bool,
}

impl CapturingCommand {
    /// Create a text-output command with the given arguments.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Mark the output as binary.
    pub fn binary(mut self, binary: bool) -> Self {
        self.binary = binary;
        self
    }

    /// Check if the command completed with exit code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

impl SvnCommand for CapturingCommand {
    fn arguments(&self) -> Vec<String> {
        self.args.clone()
    }

    fn has_binary_output(&self) -> bool {
        self.binary
    }

    fn output_line(&mut self, line: &str) {
        self.output.push(line.to_string());
    }

    fn output_bytes(&mut self, bytes: Vec<u8>) {
        self.bytes = Some(bytes);
    }

    fn error_line(&mut self, line: &str) {
        self.errors.push(line.to_string());
    }

    fn completed(&mut self, exit_code: i32) {
        self.exit_code = Some(exit_code);
    }

    fn finished(&mut self) {
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capturing_new() {
        let cmd = CapturingCommand::new(["status", "-v"]);
        assert_eq!(cmd.arguments(), vec!["status", "-v"]);
        assert!(!cmd.has_binary_output());
        assert!(cmd.exit_code.is_none());
        assert!(!cmd.finished);
    }

    #[test]
    fn test_capturing_binary() {
        let cmd = CapturingCommand::new(["cat", "file.bin"]).binary(true);
        assert!(cmd.has_binary_output());
    }

    #[test]
    fn test_capturing_callbacks() {
        let mut cmd = CapturingCommand::new(["info"]);
        cmd.started();
        cmd.output_line("Path: trunk");
        cmd.error_line("svn: warning: W155010");
        cmd.completed(0);
        cmd.finished();

        assert_eq!(cmd.output, vec!["Path: trunk"]);
        assert_eq!(cmd.errors, vec!["svn: warning: W155010"]);
        assert!(cmd.success());
        assert!(cmd.finished);
    }

    #[test]
    fn test_default_callbacks_are_noops() {
        struct ArgsOnly;
        impl SvnCommand for ArgsOnly {
            fn arguments(&self) -> Vec<String> {
                vec!["cleanup".into()]
            }
        }

        let mut cmd = ArgsOnly;
        cmd.started();
        cmd.output_line("ignored");
        cmd.output_bytes(vec![1, 2, 3]);
        cmd.completed(1);
        cmd.finished();
        assert!(!cmd.has_binary_output());
    }
}
