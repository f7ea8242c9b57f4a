//! Entrypoint for the `varlink` command-line tool.
//!
//! The binary delegates to [`varlink_cli::run`], which owns command
//! dispatch, locator resolution, and the call plumbing. Keeping the
//! entrypoint thin lets the whole runtime be exercised from tests with
//! substituted IO streams.

use std::io::{self, IsTerminal, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdout_is_terminal = io::stdout().is_terminal();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    varlink_cli::run(
        std::env::args_os(),
        &mut stdout,
        &mut stderr,
        stdout_is_terminal,
    )
}
