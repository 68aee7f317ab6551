//! File content retrieval (`svn cat`).

use super::arguments::{Arguments, GlobalOptions, Revision};
use crate::execution::SvnCommand;

/// Reads one file's content at a revision as raw bytes.
#[derive(Debug, Clone)]
pub struct CatCommand {
    args: Vec<String>,
    content: Option<Vec<u8>>,
    errors: Vec<String>,
    exit_code: Option<i32>,
}

impl CatCommand {
    /// `svn cat [-r REV] TARGET`
    pub fn new(global: &GlobalOptions, target: &str, revision: Option<Revision>) -> Self {
        Self {
            args: Arguments::new("cat")
                .global(global)
                .revision(revision)
                .target(target)
                .build(),
            content: None,
            errors: Vec::new(),
            exit_code: None,
        }
    }

    /// File content, once the run delivered it.
    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }

    /// Take ownership of the content.
    pub fn into_content(self) -> Option<Vec<u8>> {
        self.content
    }

    /// Stderr lines.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Check if the process completed with exit code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

impl SvnCommand for CatCommand {
    fn arguments(&self) -> Vec<String> {
        self.args.clone()
    }

    fn has_binary_output(&self) -> bool {
        true
    }

    fn output_bytes(&mut self, bytes: Vec<u8>) {
        self.content = Some(bytes);
    }

    fn error_line(&mut self, line: &str) {
        self.errors.push(line.to_string());
    }

    fn completed(&mut self, exit_code: i32) {
        self.exit_code = Some(exit_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cat_args() {
        let global = GlobalOptions::default();
        let cmd = CatCommand::new(&global, "trunk/logo.png", Some(Revision::Number(3)));
        assert_eq!(
            cmd.arguments(),
            vec!["cat", "--non-interactive", "-r", "3", "trunk/logo.png"]
        );
        assert!(cmd.has_binary_output());
    }

    #[test]
    fn test_cat_content() {
        let mut cmd = CatCommand::new(&GlobalOptions::default(), "f", None);
        assert!(cmd.content().is_none());

        cmd.output_bytes(vec![0x89, b'P', b'N', b'G']);
        cmd.completed(0);

        assert_eq!(cmd.content(), Some(&[0x89, b'P', b'N', b'G'][..]));
        assert!(cmd.success());
        assert_eq!(cmd.into_content().unwrap().len(), 4);
    }
}
