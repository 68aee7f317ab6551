//! Streaming execution on the tokio blocking pool.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::command::SvnCommand;
use super::result::{ExecOutcome, OutputEvent};
use super::runner::ProcessRunner;
use crate::Result;

/// Capacity of the event channel returned by [`ProcessRunner::exec_async`].
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// A command that forwards every callback into a channel.
#[derive(Debug)]
pub struct StreamingCommand {
    args: Vec<String>,
    binary: bool,
    tx: mpsc::Sender<OutputEvent>,
}

impl StreamingCommand {
    /// Create a streaming command sending to `tx`.
    pub fn new(args: Vec<String>, binary: bool, tx: mpsc::Sender<OutputEvent>) -> Self {
        Self { args, binary, tx }
    }

    fn send(&self, event: OutputEvent) {
        // Receiver may be gone; the run continues regardless.
        let _ = self.tx.blocking_send(event);
    }
}

impl SvnCommand for StreamingCommand {
    fn arguments(&self) -> Vec<String> {
        self.args.clone()
    }

    fn has_binary_output(&self) -> bool {
        self.binary
    }

    fn started(&mut self) {
        self.send(OutputEvent::Started);
    }

    fn output_line(&mut self, line: &str) {
        self.send(OutputEvent::stdout(line));
    }

    fn output_bytes(&mut self, bytes: Vec<u8>) {
        self.send(OutputEvent::Bytes(bytes));
    }

    fn error_line(&mut self, line: &str) {
        self.send(OutputEvent::stderr(line));
    }

    fn completed(&mut self, exit_code: i32) {
        self.send(OutputEvent::Completed(exit_code));
    }

    fn finished(&mut self) {
        self.send(OutputEvent::Finished);
    }
}

impl ProcessRunner {
    /// Execute `args` on the blocking pool.
    ///
    /// Returns a receiver for the run's events and a handle resolving to the
    /// outcome. Must be called from within a tokio runtime.
    pub fn exec_async(
        self: &Arc<Self>,
        args: Vec<String>,
        binary: bool,
    ) -> (mpsc::Receiver<OutputEvent>, JoinHandle<Result<ExecOutcome>>) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let runner = Arc::clone(self);

        let handle = tokio::task::spawn_blocking(move || {
            let mut command = StreamingCommand::new(args, binary, tx);
            runner.exec(&mut command)
        });

        (rx, handle)
    }
}
