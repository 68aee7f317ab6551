//! Commands whose output is a stream of per-path notifications.

use std::fmt;

use tracing::debug;

use crate::execution::SvnCommand;
use crate::parser::{LineClassifier, ParsedLine};

/// Receives classified output while a [`NotifyingCommand`] runs.
pub trait NotificationListener: Send {
    /// A line matched a known phrasing.
    fn on_notification(&mut self, notification: &ParsedLine);

    /// A stdout line matched nothing.
    fn on_message(&mut self, _line: &str) {}

    /// A stderr line.
    fn on_error(&mut self, _line: &str) {}
}

impl<F> NotificationListener for F
where
    F: FnMut(&ParsedLine) + Send,
{
    fn on_notification(&mut self, notification: &ParsedLine) {
        self(notification)
    }
}

/// A text-output command that classifies each stdout line.
pub struct NotifyingCommand {
    args: Vec<String>,
    classifier: LineClassifier,
    listeners: Vec<Box<dyn NotificationListener>>,
    notifications: Vec<ParsedLine>,
    messages: Vec<String>,
    errors: Vec<String>,
    revision: Option<i64>,
    exit_code: Option<i32>,
    finished: bool,
}

impl NotifyingCommand {
    /// Create a command for a prepared argument vector.
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            classifier: LineClassifier::new(),
            listeners: Vec::new(),
            notifications: Vec::new(),
            messages: Vec::new(),
            errors: Vec::new(),
            revision: None,
            exit_code: None,
            finished: false,
        }
    }

    /// Use a custom classifier.
    pub fn with_classifier(mut self, classifier: LineClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Register a listener.
    pub fn listener(mut self, listener: impl NotificationListener + 'static) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Classified lines, in output order.
    pub fn notifications(&self) -> &[ParsedLine] {
        &self.notifications
    }

    /// Paths named by notifications, in output order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.notifications.iter().filter_map(|n| n.path.as_deref())
    }

    /// Stdout lines that matched nothing.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Stderr lines.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Revision the operation ended at (checkout, update, commit, export).
    pub fn revision(&self) -> Option<i64> {
        self.revision
    }

    /// Exit code, if the process completed.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Check if the process completed with exit code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Whether the run is over.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl SvnCommand for NotifyingCommand {
    fn arguments(&self) -> Vec<String> {
        self.args.clone()
    }

    fn started(&mut self) {
        debug!(subcommand = self.args.first().map(String::as_str), "svn started");
    }

    fn output_line(&mut self, line: &str) {
        match self.classifier.classify(line) {
            Some(parsed) => {
                if parsed.kind.is_final_revision() {
                    self.revision = parsed.revision;
                }
                for listener in &mut self.listeners {
                    listener.on_notification(&parsed);
                }
                self.notifications.push(parsed);
            }
            None => {
                for listener in &mut self.listeners {
                    listener.on_message(line);
                }
                self.messages.push(line.to_string());
            }
        }
    }

    fn error_line(&mut self, line: &str) {
        for listener in &mut self.listeners {
            listener.on_error(line);
        }
        self.errors.push(line.to_string());
    }

    fn completed(&mut self, exit_code: i32) {
        self.exit_code = Some(exit_code);
    }

    fn finished(&mut self) {
        self.finished = true;
    }
}

impl fmt::Debug for NotifyingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyingCommand")
            .field("args", &self.args)
            .field("listeners", &self.listeners.len())
            .field("notifications", &self.notifications)
            .field("revision", &self.revision)
            .field("exit_code", &self.exit_code)
            .finish()
    }
}
