//! The fixed command registry.
//!
//! Each subcommand is one object implementing [`Command`]; the registry is
//! an append-only table constructed once for the life of the process.
//! Lookup is exact name match against the first positional argument.

use std::io::Write;
use std::process::ExitCode;

use crate::commands::{CallCommand, FormatCommand, HelpCommand, InfoCommand};
use crate::config::Config;
use crate::errors::CliError;

/// IO streams and configuration handed to every command invocation.
pub struct Context<'a> {
    pub config: Config,
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
    /// Whether stdout is a terminal; controls colored rendering.
    pub color: bool,
}

/// One subcommand: a name, a one-line description, and the two behaviours
/// the dispatcher invokes.
pub trait Command: Sync {
    /// The name matched against the first positional argument.
    fn name(&self) -> &'static str;

    /// One-line description shown in the usage listing.
    fn info(&self) -> &'static str;

    /// Runs the command with the remaining arguments.
    ///
    /// # Errors
    ///
    /// Tool failures surface as [`CliError`]; the dispatcher reports them
    /// on stderr and exits non-zero.
    fn run(&self, context: &mut Context<'_>, args: &[String]) -> Result<ExitCode, CliError>;

    /// Emits completion candidates for the partial token `current`.
    ///
    /// # Errors
    ///
    /// Failures propagate to the dispatcher's completion entry point,
    /// which absorbs them; nothing here reaches the user.
    fn complete(
        &self,
        context: &mut Context<'_>,
        args: &[String],
        current: &str,
    ) -> Result<(), CliError>;
}

static REGISTRY: &[&(dyn Command)] = &[
    &CallCommand,
    &FormatCommand,
    &HelpCommand,
    &InfoCommand,
];

/// The full command table, in listing order.
pub(crate) fn registry() -> &'static [&'static dyn Command] {
    REGISTRY
}

/// Looks up a command by exact name.
pub(crate) fn find(name: &str) -> Option<&'static dyn Command> {
    registry().iter().copied().find(|command| command.name() == name)
}
