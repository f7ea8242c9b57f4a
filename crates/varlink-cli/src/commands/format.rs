//! `varlink format` — reformat an interface description file.

use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use varlink_idl::RenderOptions;

use crate::completion;
use crate::errors::CliError;
use crate::reader;
use crate::registry::{Command, Context};

use super::{parse_args, write_error};

#[derive(Debug, Parser)]
#[command(
    name = "format",
    no_binary_name = true,
    about = "Format a varlink service file"
)]
struct FormatArgs {
    /// Write output to FILE instead of standard output.
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,
    /// Interface description file; '-' reads standard input.
    #[arg(value_name = "FILE")]
    file: String,
}

pub(crate) struct FormatCommand;

impl Command for FormatCommand {
    fn name(&self) -> &'static str {
        "format"
    }

    fn info(&self) -> &'static str {
        "Format a varlink service file"
    }

    fn run(&self, context: &mut Context<'_>, args: &[String]) -> Result<ExitCode, CliError> {
        let Some(args) = parse_args::<FormatArgs>(context, args)? else {
            return Ok(ExitCode::SUCCESS);
        };

        let text = if args.file == "-" {
            reader::read_unbounded(io::stdin().lock(), "standard input")?
        } else {
            let file = File::open(&args.file)
                .map_err(|error| CliError::io(format!("error opening {}", args.file), error))?;
            reader::read_unbounded(file, &args.file)?
        };

        let interface = varlink_idl::parse(&text).map_err(|source| CliError::Parse {
            path: args.file.clone(),
            source,
        })?;
        let rendered = varlink_idl::render(&interface, &RenderOptions::plain());

        match args.output.as_deref() {
            None | Some("-") => context
                .stdout
                .write_all(rendered.as_bytes())
                .map_err(write_error)?,
            Some(path) => std::fs::write(path, &rendered)
                .map_err(|error| CliError::io(format!("error writing {path}"), error))?,
        }
        Ok(ExitCode::SUCCESS)
    }

    fn complete(
        &self,
        context: &mut Context<'_>,
        _args: &[String],
        current: &str,
    ) -> Result<(), CliError> {
        completion::complete_files(current, &mut *context.stdout)
    }
}
