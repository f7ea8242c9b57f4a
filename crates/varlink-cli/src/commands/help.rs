//! `varlink help` — print an interface description.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;

use varlink_idl::RenderOptions;
use varlink_protocol::InterfaceDescription;

use crate::client::{self, CallOutcome};
use crate::colors;
use crate::errors::CliError;
use crate::locator;
use crate::registry::{Command, Context};

use super::{parse_args, remote_completion, write_error};

#[derive(Debug, Parser)]
#[command(
    name = "help",
    no_binary_name = true,
    about = "Print interface description or service information"
)]
struct HelpArgs {
    /// Interface to describe.
    #[arg(value_name = "[ADDRESS/]INTERFACE")]
    interface: String,
}

pub(crate) struct HelpCommand;

impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn info(&self) -> &'static str {
        "Print interface description or service information"
    }

    fn run(&self, context: &mut Context<'_>, args: &[String]) -> Result<ExitCode, CliError> {
        let Some(args) = parse_args::<HelpArgs>(context, args)? else {
            return Ok(ExitCode::SUCCESS);
        };
        let locator = locator::resolve(&args.interface, &context.config)?;

        match client::get_interface_description(&locator) {
            CallOutcome::TransportFailure(error) => Err(error.into()),
            // A remote error ("interface not found") is the call's result,
            // not a tool failure.
            CallOutcome::ApplicationError { name, .. } => {
                writeln!(context.stdout, "Error: {name}").map_err(write_error)?;
                Ok(ExitCode::SUCCESS)
            }
            CallOutcome::Success(parameters) => {
                let reply: InterfaceDescription =
                    serde_json::from_value(parameters.unwrap_or(Value::Null)).map_err(|error| {
                        CliError::Reply(format!(
                            "malformed GetInterfaceDescription reply: {error}"
                        ))
                    })?;
                let interface =
                    varlink_idl::parse(&reply.description).map_err(|source| CliError::Parse {
                        path: locator.interface.clone(),
                        source,
                    })?;
                let options = if context.color {
                    RenderOptions::with_palette(colors::terminal_palette())
                } else {
                    RenderOptions::plain()
                };
                let rendered = varlink_idl::render(&interface, &options);
                context
                    .stdout
                    .write_all(rendered.as_bytes())
                    .map_err(write_error)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    fn complete(
        &self,
        context: &mut Context<'_>,
        _args: &[String],
        current: &str,
    ) -> Result<(), CliError> {
        remote_completion(context, current, false)
    }
}
