//! Error types for wire encoding and framing.

use std::io;

use thiserror::Error;

/// Errors raised while moving envelopes across a connection.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WireError {
    /// The envelope could not be serialised to JSON.
    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),
    /// The received bytes were not a valid envelope.
    #[error("failed to decode message: {0}")]
    Decode(#[source] serde_json::Error),
    /// The underlying stream failed while writing.
    #[error("failed to send message: {0}")]
    Send(#[source] io::Error),
    /// The underlying stream failed while reading.
    #[error("failed to receive message: {0}")]
    Receive(#[source] io::Error),
    /// The peer closed the stream before any reply arrived.
    #[error("connection closed before a reply arrived")]
    ConnectionClosed,
    /// The stream ended inside a message, before the NUL terminator.
    #[error("connection closed mid-message")]
    Truncated,
}
