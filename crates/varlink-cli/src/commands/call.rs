//! `varlink call` — call a method and print the reply.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;

use crate::client::{self, CallOutcome};
use crate::errors::CliError;
use crate::locator;
use crate::reader;
use crate::registry::{Command, Context};

use super::{parse_args, remote_completion, write_error};

#[derive(Debug, Parser)]
#[command(
    name = "call",
    no_binary_name = true,
    about = "Call a method"
)]
struct CallArgs {
    /// Method to call.
    #[arg(value_name = "[ADDRESS/]INTERFACE.METHOD")]
    method: String,
    /// Input parameters as a JSON object; '-' reads standard input.
    #[arg(value_name = "PARAMETERS")]
    parameters: Option<String>,
}

pub(crate) struct CallCommand;

impl Command for CallCommand {
    fn name(&self) -> &'static str {
        "call"
    }

    fn info(&self) -> &'static str {
        "Call a method"
    }

    fn run(&self, context: &mut Context<'_>, args: &[String]) -> Result<ExitCode, CliError> {
        let Some(args) = parse_args::<CallArgs>(context, args)? else {
            return Ok(ExitCode::SUCCESS);
        };
        let (locator, method) = locator::resolve_method(&args.method, &context.config)?;
        let parameters = decode_parameters(args.parameters.as_deref())?;

        match client::call(&locator, &method, parameters) {
            CallOutcome::TransportFailure(error) => Err(error.into()),
            CallOutcome::Success(parameters) => {
                let output = parameters.unwrap_or_else(|| Value::Object(Default::default()));
                write_pretty(context.stdout, &output)?;
                Ok(ExitCode::SUCCESS)
            }
            // The remote error is still the call's result and is rendered
            // on stdout; this command reports it with a failing status.
            CallOutcome::ApplicationError { name, parameters } => {
                writeln!(context.stdout, "Error: {name}").map_err(write_error)?;
                if let Some(parameters) = parameters {
                    write_pretty(context.stdout, &parameters)?;
                }
                Ok(ExitCode::FAILURE)
            }
        }
    }

    fn complete(
        &self,
        context: &mut Context<'_>,
        _args: &[String],
        current: &str,
    ) -> Result<(), CliError> {
        remote_completion(context, current, true)
    }
}

/// Turns the parameters argument into a call payload.
///
/// `-` ingests standard input via the growable reader; blank input (and an
/// absent argument) means the call carries no parameters.
fn decode_parameters(argument: Option<&str>) -> Result<Option<Value>, CliError> {
    let text = match argument {
        None => return Ok(None),
        Some("-") => reader::read_unbounded(io::stdin().lock(), "standard input")?,
        Some(text) => text.to_owned(),
    };
    if text.trim().is_empty() {
        return Ok(None);
    }
    let value: Value =
        serde_json::from_str(&text).map_err(|error| CliError::Parameters(error.to_string()))?;
    if !value.is_object() {
        return Err(CliError::Parameters(String::from(
            "parameters must be a JSON object",
        )));
    }
    Ok(Some(value))
}

fn write_pretty(out: &mut dyn Write, value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|error| CliError::Reply(format!("unprintable reply parameters: {error}")))?;
    writeln!(out, "{rendered}").map_err(write_error)
}
