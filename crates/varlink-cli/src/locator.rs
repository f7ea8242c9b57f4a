//! Service locator resolution.
//!
//! A locator is a single string of the form `[ADDRESS/]INTERFACE` naming
//! what to connect to and which interface to talk to. Resolution performs
//! no I/O and cannot block; the "no explicit address" default comes from
//! [`Config`], never from a hidden global.

use std::fmt;

use crate::config::Config;
use crate::errors::CliError;

/// Transport selection derived from the address text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    /// Direct connection to a socket path.
    Unix(String),
    /// Networked connection to `host:port`.
    Tcp { host: String, port: u16 },
    /// Tunnel through `ssh` to a remote bridge.
    Ssh { host: String, port: u16 },
}

impl fmt::Display for Address {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix(path) => write!(formatter, "unix:{path}"),
            Self::Tcp { host, port } => write!(formatter, "tcp:{host}:{port}"),
            Self::Ssh { host, port } => write!(formatter, "ssh://{host}:{port}"),
        }
    }
}

/// A resolved locator: where to connect, and which interface to invoke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub address: Address,
    /// Reverse-domain interface name; always present and validated.
    pub interface: String,
}

const SSH_PREFIX: &str = "ssh://";
const TCP_PREFIX: &str = "tcp:";
const UNIX_PREFIX: &str = "unix:";
const DEFAULT_SSH_PORT: u16 = 22;

/// Resolves `[ADDRESS/]INTERFACE` into a [`Locator`].
///
/// # Errors
///
/// `InvalidInterfaceName` when the interface part does not match the
/// reverse-domain grammar, `InvalidPort` for out-of-range ports,
/// `InvalidLocator` for unusable address text, and `MissingAddress` when
/// neither the locator nor the configuration supplies an address.
pub fn resolve(text: &str, config: &Config) -> Result<Locator, CliError> {
    let (address_text, interface) = split_address(text);
    if !varlink_idl::is_interface_name(interface) {
        return Err(CliError::InvalidInterfaceName(interface.to_owned()));
    }
    let address = resolve_address(address_text, config)?;
    Ok(Locator {
        address,
        interface: interface.to_owned(),
    })
}

/// Resolves `[ADDRESS/]INTERFACE.METHOD`, returning the locator and the
/// fully-qualified method name.
///
/// # Errors
///
/// As [`resolve`], plus `InvalidMethodName` when the trailing segment is
/// not a method name.
pub fn resolve_method(text: &str, config: &Config) -> Result<(Locator, String), CliError> {
    let (address_text, qualified) = split_address(text);
    let Some(separator) = qualified.rfind('.') else {
        return Err(CliError::InvalidMethodName(qualified.to_owned()));
    };
    let (interface, method) = (&qualified[..separator], &qualified[separator + 1..]);
    if !varlink_idl::is_interface_name(interface) {
        return Err(CliError::InvalidInterfaceName(interface.to_owned()));
    }
    if !varlink_idl::is_member_name(method) {
        return Err(CliError::InvalidMethodName(method.to_owned()));
    }
    let address = resolve_address(address_text, config)?;
    Ok((
        Locator {
            address,
            interface: interface.to_owned(),
        },
        qualified.to_owned(),
    ))
}

/// Splits on the right-most `/`: everything after it is the interface part.
pub(crate) fn split_address(text: &str) -> (Option<&str>, &str) {
    match text.rfind('/') {
        Some(index) => (Some(&text[..index]), &text[index + 1..]),
        None => (None, text),
    }
}

/// Classifies explicit address text, or falls back to the configured
/// default.
///
/// # Errors
///
/// `MissingAddress` when no address is available at all; otherwise the
/// classification errors described on [`resolve`].
pub fn resolve_address(address: Option<&str>, config: &Config) -> Result<Address, CliError> {
    match address {
        Some(text) => classify(text),
        None => match config.default_address.as_deref() {
            Some(text) => classify(text),
            None => Err(CliError::MissingAddress),
        },
    }
}

fn classify(address: &str) -> Result<Address, CliError> {
    if address.is_empty() {
        return Err(CliError::InvalidLocator(address.to_owned()));
    }

    if let Some(rest) = address.strip_prefix(SSH_PREFIX) {
        return classify_ssh(address, rest);
    }

    if let Some(rest) = address.strip_prefix(TCP_PREFIX) {
        let Some((host, port_text)) = rest.rsplit_once(':') else {
            return Err(CliError::InvalidLocator(address.to_owned()));
        };
        if host.is_empty() {
            return Err(CliError::InvalidLocator(address.to_owned()));
        }
        return Ok(Address::Tcp {
            host: host.to_owned(),
            port: parse_port(port_text)?,
        });
    }

    if let Some(path) = address.strip_prefix(UNIX_PREFIX) {
        if path.is_empty() {
            return Err(CliError::InvalidLocator(address.to_owned()));
        }
        return Ok(Address::Unix(path.to_owned()));
    }

    // A bare host:port selects tcp; anything else is a socket path.
    if let Some((host, port_text)) = address.rsplit_once(':')
        && !host.is_empty()
        && !host.contains('/')
        && !port_text.is_empty()
        && port_text.bytes().all(|b| b.is_ascii_digit())
    {
        return Ok(Address::Tcp {
            host: host.to_owned(),
            port: parse_port(port_text)?,
        });
    }

    Ok(Address::Unix(address.to_owned()))
}

fn classify_ssh(address: &str, rest: &str) -> Result<Address, CliError> {
    if rest.is_empty() {
        return Err(CliError::InvalidLocator(address.to_owned()));
    }
    if let Some((host, port_text)) = rest.rsplit_once(':') {
        if host.is_empty() {
            return Err(CliError::InvalidLocator(address.to_owned()));
        }
        return Ok(Address::Ssh {
            host: host.to_owned(),
            port: parse_port(port_text)?,
        });
    }
    Ok(Address::Ssh {
        host: rest.to_owned(),
        port: DEFAULT_SSH_PORT,
    })
}

fn parse_port(text: &str) -> Result<u16, CliError> {
    let invalid = || CliError::InvalidPort(text.to_owned());
    let value: u32 = text.parse().map_err(|_| invalid())?;
    if (1..=65535).contains(&value) {
        Ok(value as u16)
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn no_default() -> Config {
        Config::default()
    }

    #[test]
    fn bare_interface_uses_the_configured_default() {
        let config = Config::with_default_address("/run/org.example");
        let locator = resolve("a.b.c", &config).expect("resolve");
        assert_eq!(locator.interface, "a.b.c");
        assert_eq!(locator.address, Address::Unix(String::from("/run/org.example")));
    }

    #[test]
    fn bare_interface_without_a_default_is_missing_address() {
        let error = resolve("a.b.c", &no_default()).expect_err("must fail");
        assert!(matches!(error, CliError::MissingAddress));
    }

    #[test]
    fn host_and_port_select_tcp() {
        let locator = resolve("host:1234/a.b.c", &no_default()).expect("resolve");
        assert_eq!(
            locator.address,
            Address::Tcp {
                host: String::from("host"),
                port: 1234,
            }
        );
        assert_eq!(locator.interface, "a.b.c");
    }

    #[rstest]
    #[case("host:70000/a.b.c")]
    #[case("host:0/a.b.c")]
    #[case("tcp:host:not-a-port/a.b.c")]
    #[case("ssh://host:99999/a.b.c")]
    fn out_of_range_ports_are_rejected(#[case] text: &str) {
        let error = resolve(text, &no_default()).expect_err("must fail");
        assert!(matches!(error, CliError::InvalidPort(_)), "{error}");
    }

    #[test]
    fn path_addresses_select_the_direct_socket() {
        let locator = resolve("/path/to/sock/a.b.c", &no_default()).expect("resolve");
        assert_eq!(locator.address, Address::Unix(String::from("/path/to/sock")));
        assert_eq!(locator.interface, "a.b.c");
    }

    #[test]
    fn explicit_prefixes_select_their_transports() {
        let tcp = resolve("tcp:localhost:6000/a.b.c", &no_default()).expect("tcp");
        assert_eq!(
            tcp.address,
            Address::Tcp {
                host: String::from("localhost"),
                port: 6000,
            }
        );

        let unix = resolve("unix:/tmp/sock/a.b.c", &no_default()).expect("unix");
        assert_eq!(unix.address, Address::Unix(String::from("/tmp/sock")));

        let ssh = resolve("ssh://example.org:2222/org.example.x", &no_default()).expect("ssh");
        assert_eq!(
            ssh.address,
            Address::Ssh {
                host: String::from("example.org"),
                port: 2222,
            }
        );
    }

    #[test]
    fn ssh_defaults_to_port_22() {
        let locator = resolve("ssh://example.org/org.example.x", &no_default()).expect("ssh");
        assert_eq!(
            locator.address,
            Address::Ssh {
                host: String::from("example.org"),
                port: 22,
            }
        );
    }

    #[rstest]
    #[case("host:1234/not-reverse-domain")]
    #[case("/run/sock/UpperCase.name")]
    #[case("/run/sock/single")]
    fn malformed_interface_names_are_rejected(#[case] text: &str) {
        let error = resolve(text, &no_default()).expect_err("must fail");
        assert!(matches!(error, CliError::InvalidInterfaceName(_)), "{error}");
    }

    #[test]
    fn a_colon_suffix_that_is_not_numeric_stays_a_path() {
        let locator = resolve("./sock:dir/a.b.c", &no_default()).expect("resolve");
        assert_eq!(locator.address, Address::Unix(String::from("./sock:dir")));
    }

    #[test]
    fn resolve_method_splits_the_trailing_segment() {
        let (locator, method) =
            resolve_method("host:1234/org.example.chat.Send", &no_default()).expect("resolve");
        assert_eq!(locator.interface, "org.example.chat");
        assert_eq!(method, "org.example.chat.Send");
    }

    #[rstest]
    #[case("host:1234/org.example.chat.send")]
    #[case("host:1234/org.example.chat.")]
    #[case("host:1234/justoneword")]
    fn malformed_method_names_are_rejected(#[case] text: &str) {
        let error = resolve_method(text, &no_default()).expect_err("must fail");
        assert!(
            matches!(
                error,
                CliError::InvalidMethodName(_) | CliError::InvalidInterfaceName(_)
            ),
            "{error}"
        );
    }
}
