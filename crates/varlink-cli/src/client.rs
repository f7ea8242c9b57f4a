//! The connection call mediator.
//!
//! One locator, one connection, one request/response exchange. The outcome
//! is a three-way sum: the call succeeded, the service answered with a
//! named error (a normal, expected result that callers print to the user),
//! or the transport itself failed (a tool failure that callers report to
//! stderr). Keeping the last two apart is the point of this module.

use std::io::{BufReader, Read, Write};

use serde_json::{Value, json};
use tracing::debug;

use varlink_protocol::{
    Call, GET_INFO, GET_INTERFACE_DESCRIPTION, Reply, SERVICE_INTERFACE, read_message,
    write_message,
};

use crate::locator::{Address, Locator};
use crate::transport::{self, TransportError};

const CALL_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::call");

/// The result of exactly one call.
#[derive(Debug)]
pub enum CallOutcome {
    /// The service answered; these are the output parameters.
    Success(Option<Value>),
    /// The service answered with one of its declared errors.
    ApplicationError {
        name: String,
        parameters: Option<Value>,
    },
    /// The connection could not be established or broke mid-call.
    TransportFailure(TransportError),
}

/// Performs one request/response exchange against `locator`.
///
/// The connection is dropped before returning on every path; no reply is
/// ever inspected when the transport cannot be opened.
pub fn call(locator: &Locator, method: &str, parameters: Option<Value>) -> CallOutcome {
    let connection = match transport::connect(&locator.address) {
        Ok(connection) => connection,
        Err(error) => return CallOutcome::TransportFailure(error),
    };
    debug!(target: CALL_TARGET, method, interface = %locator.interface, "calling");
    exchange(connection, method, parameters)
}

/// Drives the exchange over an already-open stream.
///
/// Factored out of [`call`] so tests can substitute an in-memory stream.
fn exchange<C>(mut connection: C, method: &str, parameters: Option<Value>) -> CallOutcome
where
    C: Read + Write,
{
    let envelope = Call::new(method, parameters);
    if let Err(error) = write_message(&mut connection, &envelope) {
        return CallOutcome::TransportFailure(error.into());
    }

    let mut reader = BufReader::new(connection);
    match read_message::<_, Reply>(&mut reader) {
        Err(error) => CallOutcome::TransportFailure(error.into()),
        Ok(Reply {
            error: Some(name),
            parameters,
            ..
        }) => CallOutcome::ApplicationError { name, parameters },
        Ok(Reply { parameters, .. }) => CallOutcome::Success(parameters),
    }
}

/// Calls `org.varlink.service.GetInfo` on the service behind `address`.
pub fn get_info(address: &Address) -> CallOutcome {
    let locator = Locator {
        address: address.clone(),
        interface: String::from(SERVICE_INTERFACE),
    };
    call(&locator, GET_INFO, None)
}

/// Fetches the description text of `locator.interface`.
pub fn get_interface_description(locator: &Locator) -> CallOutcome {
    call(
        locator,
        GET_INTERFACE_DESCRIPTION,
        Some(json!({ "interface": locator.interface })),
    )
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use serde_json::json;

    use super::*;

    /// An in-memory stream: reads canned reply bytes, records writes.
    struct FakeStream {
        input: Cursor<Vec<u8>>,
        written: Vec<u8>,
    }

    impl FakeStream {
        fn replying(reply: &Reply) -> Self {
            let mut input = serde_json::to_vec(reply).expect("encode reply");
            input.push(0);
            Self {
                input: Cursor::new(input),
                written: Vec::new(),
            }
        }

        fn silent() -> Self {
            Self {
                input: Cursor::new(Vec::new()),
                written: Vec::new(),
            }
        }
    }

    impl Read for FakeStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for FakeStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn success_replies_carry_output_parameters() {
        let stream = FakeStream::replying(&Reply::success(Some(json!({"value": 7}))));
        let outcome = exchange(stream, "org.example.Get", None);
        match outcome {
            CallOutcome::Success(Some(parameters)) => {
                assert_eq!(parameters, json!({"value": 7}));
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn named_errors_are_application_errors_not_transport_failures() {
        let stream = FakeStream::replying(&Reply::failure(
            "org.example.NotFound",
            Some(json!({"what": "thing"})),
        ));
        let outcome = exchange(stream, "org.example.Get", None);
        match outcome {
            CallOutcome::ApplicationError { name, parameters } => {
                assert_eq!(name, "org.example.NotFound");
                assert_eq!(parameters, Some(json!({"what": "thing"})));
            }
            other => panic!("expected application error, got {other:?}"),
        }
    }

    #[test]
    fn a_closed_stream_is_a_transport_failure() {
        let outcome = exchange(FakeStream::silent(), "org.example.Get", None);
        assert!(matches!(outcome, CallOutcome::TransportFailure(_)));
    }

    #[test]
    fn unreachable_addresses_fail_before_any_reply_is_read() {
        let port = {
            let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).expect("bind");
            listener.local_addr().expect("local addr").port()
        };
        let locator = Locator {
            address: Address::Tcp {
                host: String::from("127.0.0.1"),
                port,
            },
            interface: String::from("org.example.missing"),
        };
        let outcome = call(&locator, "org.example.missing.Get", None);
        assert!(matches!(outcome, CallOutcome::TransportFailure(_)));
    }

    #[test]
    fn the_request_frame_names_the_method() {
        let mut stream = FakeStream::replying(&Reply::success(None));
        let written = {
            let outcome = exchange(&mut stream, "org.example.Ping", Some(json!({"n": 1})));
            assert!(matches!(outcome, CallOutcome::Success(None)));
            stream.written
        };
        assert_eq!(written.last(), Some(&0u8));
        let call: Call = serde_json::from_slice(&written[..written.len() - 1]).expect("decode");
        assert_eq!(call.method, "org.example.Ping");
        assert_eq!(call.parameters, Some(json!({"n": 1})));
    }
}
