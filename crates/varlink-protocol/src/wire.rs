//! Call and reply envelopes plus NUL-byte framing.

use std::io::{BufRead, Write};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::WireError;

/// The terminator appended to every framed message.
const MESSAGE_TERMINATOR: u8 = 0;

/// A single method call addressed to a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// Fully-qualified method name, e.g. `org.varlink.service.GetInfo`.
    pub method: String,
    /// Input parameters; omitted from the wire when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

impl Call {
    /// Builds a call envelope for `method` with optional parameters.
    #[must_use]
    pub fn new(method: impl Into<String>, parameters: Option<Value>) -> Self {
        Self {
            method: method.into(),
            parameters,
        }
    }
}

/// A single reply received from a service.
///
/// A reply either succeeds, carrying output parameters, or names an error
/// defined by the called interface. The `continues` flag belongs to the
/// streaming extension of the protocol; this client never asks for more than
/// one reply, so the flag is decoded but otherwise ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Fully-qualified error name, present on failure replies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Output (or error) parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    /// Set by services that will send further replies to the same call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continues: Option<bool>,
}

impl Reply {
    /// Builds a success reply with the given output parameters.
    #[must_use]
    pub fn success(parameters: Option<Value>) -> Self {
        Self {
            error: None,
            parameters,
            continues: None,
        }
    }

    /// Builds an error reply naming `error`.
    #[must_use]
    pub fn failure(error: impl Into<String>, parameters: Option<Value>) -> Self {
        Self {
            error: Some(error.into()),
            parameters,
            continues: None,
        }
    }
}

/// Serialises `message` and writes it as one NUL-terminated frame.
///
/// # Errors
///
/// Returns [`WireError::Encode`] if serialisation fails and
/// [`WireError::Send`] if the stream rejects the bytes.
pub fn write_message<W, T>(writer: &mut W, message: &T) -> Result<(), WireError>
where
    W: Write,
    T: Serialize,
{
    let mut frame = serde_json::to_vec(message).map_err(WireError::Encode)?;
    frame.push(MESSAGE_TERMINATOR);
    writer.write_all(&frame).map_err(WireError::Send)?;
    writer.flush().map_err(WireError::Send)
}

/// Reads exactly one NUL-terminated frame and decodes it.
///
/// # Errors
///
/// Returns [`WireError::ConnectionClosed`] when the stream ends before any
/// byte arrives, [`WireError::Truncated`] when it ends inside a frame,
/// [`WireError::Receive`] on stream faults, and [`WireError::Decode`] when
/// the frame is not a valid envelope.
pub fn read_message<R, T>(reader: &mut R) -> Result<T, WireError>
where
    R: BufRead,
    T: DeserializeOwned,
{
    let mut frame = Vec::new();
    let read = reader
        .read_until(MESSAGE_TERMINATOR, &mut frame)
        .map_err(WireError::Receive)?;
    if read == 0 {
        return Err(WireError::ConnectionClosed);
    }
    match frame.pop() {
        Some(MESSAGE_TERMINATOR) => {}
        _ => return Err(WireError::Truncated),
    }
    serde_json::from_slice(&frame).map_err(WireError::Decode)
}
