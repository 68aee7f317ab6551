//! Constructors for the common working-copy operations.

use super::arguments::{Arguments, GlobalOptions, Revision};
use super::notify::NotifyingCommand;

fn notifying(args: Arguments) -> NotifyingCommand {
    NotifyingCommand::new(args.build())
}

/// `svn commit -m MESSAGE PATHS...`
pub fn commit<I, S>(global: &GlobalOptions, paths: I, message: &str) -> NotifyingCommand
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    notifying(
        Arguments::new("commit")
            .global(global)
            .option("-m", message)
            .targets(paths),
    )
}

/// `svn update [-r REV] PATHS...`
pub fn update<I, S>(global: &GlobalOptions, paths: I, revision: Option<Revision>) -> NotifyingCommand
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    notifying(
        Arguments::new("update")
            .global(global)
            .revision(revision)
            .targets(paths),
    )
}

/// `svn checkout [-r REV] URL PATH`
pub fn checkout(
    global: &GlobalOptions,
    url: &str,
    path: &str,
    revision: Option<Revision>,
) -> NotifyingCommand {
    notifying(
        Arguments::new("checkout")
            .global(global)
            .revision(revision)
            .target(url)
            .target(path),
    )
}

/// `svn add --parents PATHS...`
pub fn add<I, S>(global: &GlobalOptions, paths: I) -> NotifyingCommand
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    notifying(
        Arguments::new("add")
            .global(global)
            .flag("--parents")
            .targets(paths),
    )
}

/// `svn delete [--force] PATHS...`
pub fn remove<I, S>(global: &GlobalOptions, paths: I, force: bool) -> NotifyingCommand
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    notifying(
        Arguments::new("delete")
            .global(global)
            .flag_if(force, "--force")
            .targets(paths),
    )
}

/// `svn revert [--depth infinity] PATHS...`
pub fn revert<I, S>(global: &GlobalOptions, paths: I, recursive: bool) -> NotifyingCommand
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args = Arguments::new("revert").global(global);
    let args = if recursive {
        args.option("--depth", "infinity")
    } else {
        args
    };
    notifying(args.targets(paths))
}

/// `svn lock [-m MESSAGE] [--force] PATHS...`
pub fn lock<I, S>(
    global: &GlobalOptions,
    paths: I,
    message: Option<&str>,
    force: bool,
) -> NotifyingCommand
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args = Arguments::new("lock").global(global);
    let args = match message {
        Some(message) => args.option("-m", message),
        None => args,
    };
    notifying(args.flag_if(force, "--force").targets(paths))
}

/// `svn unlock [--force] PATHS...`
pub fn unlock<I, S>(global: &GlobalOptions, paths: I, force: bool) -> NotifyingCommand
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    notifying(
        Arguments::new("unlock")
            .global(global)
            .flag_if(force, "--force")
            .targets(paths),
    )
}

/// `svn export [-r REV] [--force] SOURCE DEST`
pub fn export(
    global: &GlobalOptions,
    source: &str,
    dest: &str,
    revision: Option<Revision>,
    force: bool,
) -> NotifyingCommand {
    notifying(
        Arguments::new("export")
            .global(global)
            .revision(revision)
            .flag_if(force, "--force")
            .target(source)
            .target(dest),
    )
}

/// `svn switch [-r REV] URL PATH`
pub fn switch(
    global: &GlobalOptions,
    url: &str,
    path: &str,
    revision: Option<Revision>,
) -> NotifyingCommand {
    notifying(
        Arguments::new("switch")
            .global(global)
            .revision(revision)
            .target(url)
            .target(path),
    )
}

/// Any subcommand, arguments passed through untouched.
pub fn raw(args: Vec<String>) -> NotifyingCommand {
    NotifyingCommand::new(args)
}
