//! Subcommand implementations.
//!
//! Each command is a unit struct implementing [`crate::registry::Command`].
//! Per-command flags are parsed with clap derive structs configured with
//! `no_binary_name`, so the registry owns top-level routing and clap owns
//! everything after the command name.

use std::io::{self, Write};

use clap::Parser;
use clap::error::ErrorKind;

use crate::completion;
use crate::errors::CliError;
use crate::registry::Context;

mod call;
mod format;
mod help;
mod info;

pub(crate) use call::CallCommand;
pub(crate) use format::FormatCommand;
pub(crate) use help::HelpCommand;
pub(crate) use info::InfoCommand;

/// Parses a command's arguments, handling `--help` in place.
///
/// Returns `Ok(None)` when clap rendered help or version text, in which
/// case the command should exit successfully without doing anything else.
fn parse_args<T: Parser>(
    context: &mut Context<'_>,
    args: &[String],
) -> Result<Option<T>, CliError> {
    match T::try_parse_from(args) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(error)
            if matches!(
                error.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            let rendered = error.to_string();
            context
                .stdout
                .write_all(rendered.as_bytes())
                .map_err(write_error)?;
            if !rendered.ends_with('\n') {
                context.stdout.write_all(b"\n").map_err(write_error)?;
            }
            Ok(None)
        }
        Err(error) => Err(CliError::Usage(error)),
    }
}

fn write_error(source: io::Error) -> CliError {
    CliError::io("error writing output", source)
}

/// Shared completion hook for the commands that take a locator argument.
fn remote_completion(
    context: &mut Context<'_>,
    current: &str,
    with_methods: bool,
) -> Result<(), CliError> {
    let Context { config, stdout, .. } = context;
    completion::complete_interfaces(config, current, with_methods, &mut **stdout)
}
