//! Transport connections for the call mediator.
//!
//! The [`Connection`] type wraps the three transports behind uniform
//! [`Read`]/[`Write`] impls so the mediator can stay transport agnostic.
//! Connections are plain blocking streams with no timeout layer; a hung
//! transport blocks until the process ends. Dropping a connection closes
//! it on every exit path, which for the ssh transport also reaps the
//! tunnel process.

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

#[cfg(unix)]
use std::os::unix::net::UnixStream;

use thiserror::Error;
use tracing::debug;

use crate::locator::Address;

const TRANSPORT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");

/// Faults establishing or using a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to launch ssh for {address}: {source}")]
    Spawn {
        address: String,
        #[source]
        source: io::Error,
    },
    #[error("ssh tunnel for {address} did not expose its streams")]
    TunnelStreams { address: String },
    #[cfg(not(unix))]
    #[error("platform does not support unix sockets: {0}")]
    UnsupportedUnixTransport(String),
    #[error(transparent)]
    Wire(#[from] varlink_protocol::WireError),
}

#[derive(Debug)]
pub(crate) enum Connection {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(UnixStream),
    Ssh(SshTunnel),
}

/// An `ssh` child running the remote bridge, spoken to over its stdio.
#[derive(Debug)]
pub(crate) struct SshTunnel {
    child: Child,
    stdin: ChildStdin,
    stdout: ChildStdout,
}

impl Drop for SshTunnel {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.read(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.read(buf),
            Self::Ssh(tunnel) => tunnel.stdout.read(buf),
        }
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.write(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.write(buf),
            Self::Ssh(tunnel) => tunnel.stdin.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => stream.flush(),
            #[cfg(unix)]
            Self::Unix(stream) => stream.flush(),
            Self::Ssh(tunnel) => tunnel.stdin.flush(),
        }
    }
}

/// Opens a transport for `address`.
///
/// # Errors
///
/// Any failure to reach the peer — refused connection, missing socket,
/// name resolution, a failed `ssh` launch — is a [`TransportError`]; no
/// call has been attempted at that point.
pub(crate) fn connect(address: &Address) -> Result<Connection, TransportError> {
    debug!(target: TRANSPORT_TARGET, %address, "opening transport");
    match address {
        Address::Tcp { host, port } => TcpStream::connect((host.as_str(), *port))
            .map(Connection::Tcp)
            .map_err(|source| TransportError::Connect {
                address: address.to_string(),
                source,
            }),
        Address::Unix(path) => {
            #[cfg(unix)]
            {
                UnixStream::connect(path)
                    .map(Connection::Unix)
                    .map_err(|source| TransportError::Connect {
                        address: address.to_string(),
                        source,
                    })
            }

            #[cfg(not(unix))]
            {
                Err(TransportError::UnsupportedUnixTransport(path.clone()))
            }
        }
        Address::Ssh { host, port } => connect_ssh(host, *port),
    }
}

/// Spawns `ssh` running the remote bridge with piped stdio.
///
/// stderr is silenced: the same connect path serves interactive shell
/// completion, which must never leak diagnostics into the shell.
fn connect_ssh(host: &str, port: u16) -> Result<Connection, TransportError> {
    let address = format!("ssh://{host}:{port}");
    let mut child = Command::new("ssh")
        .args(["-e", "none", "-T", "-o", "BatchMode=yes", "-p"])
        .arg(port.to_string())
        .arg(host)
        .args(["--", "varlink", "bridge"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| TransportError::Spawn {
            address: address.clone(),
            source,
        })?;
    let stdin = child.stdin.take();
    let stdout = child.stdout.take();
    match (stdin, stdout) {
        (Some(stdin), Some(stdout)) => Ok(Connection::Ssh(SshTunnel {
            child,
            stdin,
            stdout,
        })),
        _ => {
            let _ = child.kill();
            let _ = child.wait();
            Err(TransportError::TunnelStreams { address })
        }
    }
}
