//! Command-line runtime for the varlink tool.
//!
//! The runtime owns top-level dispatch: it matches the first positional
//! argument against the fixed command registry, hands the remaining
//! arguments to that command's `run`, and maps its status (or error) onto
//! the process exit status. A distinguished completion mode — the hidden
//! first argument `complete` — instead invokes the command's `complete`
//! and never surfaces failures, because its output is parsed by an
//! interactive shell.
//!
//! Everything is synchronous and blocking: one invocation performs at most
//! one locator resolution, one connection, and one call, then exits.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use tracing::debug;

mod client;
mod colors;
mod commands;
mod completion;
mod config;
mod errors;
mod locator;
mod reader;
mod registry;
mod telemetry;
mod transport;

pub use config::{ADDRESS_VARIABLE, Config};
pub use errors::CliError;
pub use transport::TransportError;

use registry::{Context, find, registry};

const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// First argument selecting the hidden completion mode.
const COMPLETE_MODE: &str = "complete";

/// Runs the CLI with the given argument vector and IO handles.
///
/// `stdout_is_terminal` controls colored rendering; the entrypoint probes
/// it before locking the real streams, and tests pass `false`.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E, stdout_is_terminal: bool) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let arguments: Vec<String> = args
        .into_iter()
        .skip(1)
        .map(|argument| argument.to_string_lossy().into_owned())
        .collect();
    let mut context = Context {
        config: Config::from_env(),
        stdout,
        stderr,
        color: stdout_is_terminal,
    };
    dispatch(&mut context, &arguments)
}

fn dispatch(context: &mut Context<'_>, arguments: &[String]) -> ExitCode {
    let Some((first, rest)) = arguments.split_first() else {
        let _ = write_usage(context.stderr);
        return ExitCode::FAILURE;
    };
    match first.as_str() {
        COMPLETE_MODE => run_completion(context, rest),
        "-h" | "--help" => {
            let _ = write_usage(context.stdout);
            ExitCode::SUCCESS
        }
        "-V" | "--version" => {
            let _ = writeln!(context.stdout, "varlink {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        option if option.starts_with('-') => {
            let _ = writeln!(
                context.stderr,
                "varlink: unknown option '{option}'\nTry 'varlink --help' for more information"
            );
            ExitCode::FAILURE
        }
        name => run_command(context, name, rest),
    }
}

fn run_command(context: &mut Context<'_>, name: &str, args: &[String]) -> ExitCode {
    let Some(command) = find(name) else {
        let _ = writeln!(
            context.stderr,
            "varlink: '{name}' is not a varlink command. See 'varlink --help'"
        );
        return ExitCode::FAILURE;
    };

    telemetry::init();
    debug!(target: DISPATCH_TARGET, command = name, "dispatching");
    match command.run(context, args) {
        Ok(status) => status,
        Err(error) => {
            let _ = writeln!(context.stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}

/// Completion mode: `varlink complete CURRENT [WORDS...]`.
///
/// `CURRENT` is the partial token under the cursor; `WORDS` are the
/// command-line words typed before it. Failures are absorbed here — this
/// runs inside an interactive shell and must only ever emit candidates.
fn run_completion(context: &mut Context<'_>, words: &[String]) -> ExitCode {
    let Some((current, typed)) = words.split_first() else {
        return ExitCode::SUCCESS;
    };
    match typed.split_first() {
        None => {
            let _ = complete_names(context, current);
        }
        Some((name, rest)) => {
            if let Some(command) = find(name) {
                let _ = command.complete(context, rest, current);
            }
        }
    }
    ExitCode::SUCCESS
}

/// Completes the command name itself, plus the global flags.
fn complete_names(context: &mut Context<'_>, current: &str) -> Result<(), CliError> {
    for command in registry() {
        writeln!(context.stdout, "{}", command.name())
            .map_err(|error| CliError::io("error writing completion", error))?;
    }
    if current.starts_with('-') {
        for flag in ["--help", "--version"] {
            writeln!(context.stdout, "{flag}")
                .map_err(|error| CliError::io("error writing completion", error))?;
        }
    }
    Ok(())
}

fn write_usage(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "Usage: varlink COMMAND [ARGUMENTS...]")?;
    writeln!(out)?;
    writeln!(out, "  Find, introspect, and call varlink services.")?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    for command in registry() {
        writeln!(out, "  {:8} {}", command.name(), command.info())?;
    }
    writeln!(out)?;
    writeln!(out, "Global options:")?;
    writeln!(out, "  -h, --help     display this help text and exit")?;
    writeln!(out, "  -V, --version  output version information and exit")?;
    writeln!(out)?;
    writeln!(out, "Environment:")?;
    writeln!(
        out,
        "  VARLINK_ADDRESS  service address used when a locator has none"
    )?;
    writeln!(out, "  VARLINK_LOG      tracing filter, e.g. 'debug'")?;
    Ok(())
}

#[cfg(test)]
mod tests;
