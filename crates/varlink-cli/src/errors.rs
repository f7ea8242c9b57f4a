//! Error taxonomy for the CLI runtime.
//!
//! Application errors — named errors a remote service sends as a normal
//! answer — are deliberately absent here: they travel inside
//! [`crate::client::CallOutcome`] and are rendered as the call's result,
//! never as a tool failure.

use std::io;

use thiserror::Error;

use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid locator '{0}'")]
    InvalidLocator(String),
    #[error("invalid interface name '{0}'")]
    InvalidInterfaceName(String),
    #[error("invalid port '{0}' (expected an integer between 1 and 65535)")]
    InvalidPort(String),
    #[error("invalid method name '{0}'")]
    InvalidMethodName(String),
    #[error("no address specified and VARLINK_ADDRESS is not set")]
    MissingAddress,
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Rendered as `FILE:LINE:COLUMN: message`.
    #[error("{path}:{source}")]
    Parse {
        path: String,
        source: varlink_idl::ParseError,
    },
    #[error("invalid parameters: {0}")]
    Parameters(String),
    #[error("unexpected reply from service: {0}")]
    Reply(String),
    #[error("{0}")]
    Usage(clap::Error),
}

impl CliError {
    /// Wraps a local stream or file fault with what was being done.
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
