//! `varlink info` — print information about a service.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;

use varlink_protocol::ServiceInfo;

use crate::client::{self, CallOutcome};
use crate::errors::CliError;
use crate::locator;
use crate::registry::{Command, Context};

use super::{parse_args, write_error};

#[derive(Debug, Parser)]
#[command(
    name = "info",
    no_binary_name = true,
    about = "Print information about a service"
)]
struct InfoArgs {
    /// Service address; defaults to $VARLINK_ADDRESS.
    #[arg(value_name = "ADDRESS")]
    address: Option<String>,
}

pub(crate) struct InfoCommand;

impl Command for InfoCommand {
    fn name(&self) -> &'static str {
        "info"
    }

    fn info(&self) -> &'static str {
        "Print information about a service"
    }

    fn run(&self, context: &mut Context<'_>, args: &[String]) -> Result<ExitCode, CliError> {
        let Some(args) = parse_args::<InfoArgs>(context, args)? else {
            return Ok(ExitCode::SUCCESS);
        };
        let address = locator::resolve_address(args.address.as_deref(), &context.config)?;

        match client::get_info(&address) {
            CallOutcome::TransportFailure(error) => Err(error.into()),
            CallOutcome::ApplicationError { name, .. } => {
                writeln!(context.stdout, "Error: {name}").map_err(write_error)?;
                Ok(ExitCode::SUCCESS)
            }
            CallOutcome::Success(parameters) => {
                let info: ServiceInfo =
                    serde_json::from_value(parameters.unwrap_or(Value::Null))
                        .map_err(|error| CliError::Reply(format!("malformed GetInfo reply: {error}")))?;
                writeln!(context.stdout, "Vendor: {}", info.vendor).map_err(write_error)?;
                writeln!(context.stdout, "Product: {}", info.product).map_err(write_error)?;
                writeln!(context.stdout, "Version: {}", info.version).map_err(write_error)?;
                writeln!(context.stdout, "URL: {}", info.url).map_err(write_error)?;
                writeln!(context.stdout, "Interfaces:").map_err(write_error)?;
                for interface in &info.interfaces {
                    writeln!(context.stdout, "  {interface}").map_err(write_error)?;
                }
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    fn complete(
        &self,
        _context: &mut Context<'_>,
        _args: &[String],
        _current: &str,
    ) -> Result<(), CliError> {
        Ok(())
    }
}
