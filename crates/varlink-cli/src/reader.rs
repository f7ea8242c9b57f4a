//! Growable input reader.
//!
//! Reads a stream of unknown, possibly zero, length into one contiguous
//! buffer: capacity doubles from a floor whenever full, short reads simply
//! continue, and end-of-stream terminates the loop. The only size bound is
//! available memory. The buffer is handed off as a `String` so callers can
//! treat it as text.

use std::io::{self, ErrorKind, Read};

use crate::errors::CliError;

/// Initial capacity; growth doubles from here.
const CAPACITY_FLOOR: usize = 4096;

/// Reads `reader` to end-of-stream and returns the bytes as text.
///
/// `context` names the stream in error messages (a file name, or
/// "standard input").
///
/// # Errors
///
/// `CliError::Io` when the stream faults mid-read or the collected bytes
/// are not valid UTF-8. An entirely empty stream is not an error.
pub fn read_unbounded<R: Read>(mut reader: R, context: &str) -> Result<String, CliError> {
    let mut buffer: Vec<u8> = Vec::new();
    let mut length = 0usize;

    loop {
        if length == buffer.len() {
            let grown = (buffer.len() * 2).max(CAPACITY_FLOOR);
            buffer.resize(grown, 0);
        }
        match reader.read(&mut buffer[length..]) {
            Ok(0) => break,
            Ok(read) => length += read,
            Err(error) if error.kind() == ErrorKind::Interrupted => {}
            Err(error) => return Err(CliError::io(format!("error reading {context}"), error)),
        }
    }

    buffer.truncate(length);
    String::from_utf8(buffer).map_err(|error| {
        CliError::io(
            format!("error reading {context}"),
            io::Error::new(ErrorKind::InvalidData, error),
        )
    })
}
