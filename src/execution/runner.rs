//! Subprocess execution engine.

use std::ffi::OsString;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::command::SvnCommand;
use super::environment::{apply_locale, default_executable};
use super::result::ExecOutcome;
use super::state::{AtomicRunnerState, RunnerState};
use crate::error::SvnRunnerError;
use crate::Result;

/// Interval between exit checks while waiting for the child.
pub const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Exit code reported when the process has none (killed by a signal).
pub const NO_EXIT_CODE: i32 = -1;

/// Where and how to launch the `svn` executable.
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    /// Path to the executable. Falls back to [`default_executable`] on PATH.
    pub executable: Option<PathBuf>,
    /// Working directory for the child.
    pub working_dir: Option<PathBuf>,
}

impl RunnerConfig {
    /// Create a config that resolves `svn` on PATH.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the executable path.
    pub fn executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Set the working directory.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// The program that will be launched.
    pub fn program(&self) -> OsString {
        self.executable
            .as_ref()
            .map(|p| p.clone().into_os_string())
            .unwrap_or_else(|| OsString::from(default_executable()))
    }
}

/// Runs one `svn` invocation at a time, streaming output into an
/// [`SvnCommand`].
///
/// `exec` blocks the calling thread until the child exits or is killed.
/// `interrupt` may be called from any other thread; share the runner through
/// an `Arc` for that.
pub struct ProcessRunner {
    config: RunnerConfig,
    exec_lock: Mutex<()>,
    state: AtomicRunnerState,
    child: Mutex<Option<Child>>,
}

impl ProcessRunner {
    /// Create a new runner.
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            exec_lock: Mutex::new(()),
            state: AtomicRunnerState::new(),
            child: Mutex::new(None),
        }
    }

    /// The runner configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunnerState {
        self.state.load()
    }

    /// Full argv for `args`: the program followed by the arguments.
    pub fn command_line(&self, args: &[String]) -> Vec<String> {
        std::iter::once(self.config.program().to_string_lossy().into_owned())
            .chain(args.iter().cloned())
            .collect()
    }

    /// Build the process for `args` without spawning it.
    pub fn build_process(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(self.config.program());
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.config.working_dir {
            cmd.current_dir(dir);
        }
        // Own process group, so interrupt also reaches wrapper and ssh children.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }
        apply_locale(&mut cmd);
        cmd
    }

    /// Execute a command, blocking until it ends.
    ///
    /// A second concurrent call waits for the first to finish. A callback
    /// that panicked in an earlier run does not block later runs.
    pub fn exec(&self, command: &mut dyn SvnCommand) -> Result<ExecOutcome> {
        let _guard = self.exec_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.exec_locked(command)
    }

    /// Execute a command, failing with [`SvnRunnerError::Busy`] instead of
    /// waiting when another command is running.
    pub fn try_exec(&self, command: &mut dyn SvnCommand) -> Result<ExecOutcome> {
        let _guard = match self.exec_lock.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return Err(SvnRunnerError::Busy),
            Err(TryLockError::Poisoned(e)) => e.into_inner(),
        };
        self.exec_locked(command)
    }

    /// Request cancellation of the running command.
    ///
    /// Kills the child if one is live. Does nothing when idle, so calling it
    /// before `exec` does not affect the next run.
    pub fn interrupt(&self) {
        match self
            .state
            .transition(RunnerState::Running, RunnerState::Cancelling)
        {
            Ok(()) => {
                info!("cancelling running svn command");
                self.kill_child();
            }
            Err(_) => debug!(state = ?self.state.load(), "interrupt ignored"),
        }
    }

    fn is_cancelled(&self) -> bool {
        self.state.load() == RunnerState::Cancelling
    }

    fn exec_locked(&self, command: &mut dyn SvnCommand) -> Result<ExecOutcome> {
        self.state
            .transition(RunnerState::Idle, RunnerState::Running)?;
        let cleanup = RunCleanup(self);

        let result = self.run(command);
        command.finished();
        drop(cleanup);
        result
    }

    fn run(&self, command: &mut dyn SvnCommand) -> Result<ExecOutcome> {
        let args = command.arguments();
        debug!(command_line = ?self.command_line(&args), "spawning svn");

        if self.is_cancelled() {
            return Ok(ExecOutcome::Cancelled);
        }

        let mut child = self
            .build_process(&args)
            .spawn()
            .map_err(|source| SvnRunnerError::Spawn {
                program: self.config.program().to_string_lossy().into_owned(),
                source,
            })?;
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        *self.lock_child() = Some(child);

        if self.is_cancelled() {
            self.kill_child();
        }
        command.started();

        // stderr is drained on its own thread; its lines are delivered after
        // stdout is exhausted.
        let stderr_drain = stderr.map(|err| {
            thread::spawn(move || {
                let mut lines = Vec::new();
                read_lines(err, |line| {
                    lines.push(line.to_string());
                    true
                })
                .map(|_| lines)
            })
        });

        let stdout_result = match stdout {
            Some(mut out) if command.has_binary_output() => {
                let mut bytes = Vec::new();
                out.read_to_end(&mut bytes).map(|_| {
                    if !self.is_cancelled() {
                        command.output_bytes(bytes);
                    }
                })
            }
            Some(out) => read_lines(out, |line| {
                if self.is_cancelled() {
                    return false;
                }
                command.output_line(line);
                true
            }),
            None => Ok(()),
        };

        if stdout_result.is_err() {
            self.kill_child();
        }

        let stderr_result = match stderr_drain {
            Some(handle) => handle
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stderr reader panicked"))),
            None => Ok(Vec::new()),
        };

        if self.is_cancelled() {
            if let Err(e) = stdout_result.and(stderr_result.map(|_| ())) {
                debug!(error = %e, "read failed after cancellation");
            }
            info!("svn command cancelled");
            return Ok(ExecOutcome::Cancelled);
        }

        stdout_result?;
        for line in stderr_result? {
            if !line.is_empty() {
                command.error_line(&line);
            }
        }

        let exit_code = match self.wait_child() {
            _ if self.is_cancelled() => {
                info!("svn command cancelled");
                return Ok(ExecOutcome::Cancelled);
            }
            Ok(code) => code,
            Err(e) => return Err(e),
        };

        debug!(exit_code, "svn exited");
        command.completed(exit_code);
        Ok(ExecOutcome::Completed { exit_code })
    }

    fn lock_child(&self) -> MutexGuard<'_, Option<Child>> {
        self.child.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn kill_child(&self) {
        if let Some(child) = self.lock_child().as_mut() {
            match terminate(child) {
                Ok(()) => debug!(pid = child.id(), "killed svn process"),
                Err(e) => debug!(pid = child.id(), error = %e, "kill failed"),
            }
        }
    }

    fn wait_child(&self) -> Result<i32> {
        loop {
            {
                let mut guard = self.lock_child();
                let child = guard
                    .as_mut()
                    .ok_or_else(|| io::Error::other("process handle missing"))?;
                if let Some(status) = child.try_wait()? {
                    return Ok(exit_code(status));
                }
            }
            thread::sleep(WAIT_POLL_INTERVAL);
        }
    }

    fn release_child(&self) {
        let Some(mut child) = self.lock_child().take() else {
            return;
        };
        if let Ok(None) = child.try_wait() {
            warn!(pid = child.id(), "svn process still running at cleanup, killing");
            let _ = terminate(&mut child);
        }
        if let Err(e) = child.wait() {
            debug!(error = %e, "failed to reap svn process");
        }
    }
}

impl std::fmt::Debug for ProcessRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessRunner")
            .field("config", &self.config)
            .field("state", &self.state.load())
            .finish()
    }
}

/// Releases the child and returns the runner to `Idle`, also on unwind.
struct RunCleanup<'a>(&'a ProcessRunner);

impl Drop for RunCleanup<'_> {
    fn drop(&mut self) {
        self.0.release_child();
        self.0.state.reset();
    }
}

/// Kill the child together with everything in its process group.
#[cfg(unix)]
fn terminate(child: &mut Child) -> io::Result<()> {
    let pgid = libc::pid_t::try_from(child.id()).map_err(io::Error::other)?;
    // SAFETY: kill(2) takes no pointers; the group id is our unreaped child's pid.
    if unsafe { libc::kill(-pgid, libc::SIGKILL) } == 0 {
        return Ok(());
    }
    let err = io::Error::last_os_error();
    debug!(pgid, error = %err, "group kill failed, killing child only");
    child.kill()
}

#[cfg(not(unix))]
fn terminate(child: &mut Child) -> io::Result<()> {
    child.kill()
}

fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(NO_EXIT_CODE)
}

/// Feed each `\n`-terminated line of `reader` to `on_line` until EOF or
/// until `on_line` returns `false`.
///
/// A trailing `\r` is stripped and invalid UTF-8 is replaced.
fn read_lines<R: Read>(reader: R, mut on_line: impl FnMut(&str) -> bool) -> io::Result<()> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(trim_line_ending(&buf));
        if !on_line(&line) {
            return Ok(());
        }
    }
}

fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
