//! Shell completion strategies.
//!
//! Candidates are full replacement tokens for the partial token under the
//! cursor, written one per line. Completion runs interactively inside a
//! shell, so the dispatcher wraps every call to these strategies in a
//! failure-absorbing scope: any error here degrades to "no candidates",
//! never to a diagnostic.

use std::io::Write;

use camino::Utf8Path;

use crate::client::{self, CallOutcome};
use crate::config::Config;
use crate::errors::CliError;
use crate::locator;

/// File suffix recognised by the filesystem strategy.
pub const FILE_SUFFIX: &str = ".varlink";

/// Filesystem strategy: completes a path to an interface description file.
///
/// Splits the token on its last `/` into a directory prefix and a name
/// fragment, lists the directory (the current one when no prefix is
/// given), and emits directories with a trailing `/` so completion can
/// continue into them. Hidden entries are skipped; regular files are
/// offered only with the recognised suffix.
///
/// # Errors
///
/// Filesystem and write faults propagate to the dispatcher, which absorbs
/// them.
pub fn complete_files(current: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let prefix = match current.rfind('/') {
        Some(index) => &current[..=index],
        None => "",
    };
    let directory = if prefix.is_empty() {
        Utf8Path::new(".")
    } else {
        Utf8Path::new(prefix)
    };

    for entry in directory
        .read_dir_utf8()
        .map_err(|error| CliError::io("error listing directory", error))?
    {
        let entry = entry.map_err(|error| CliError::io("error listing directory", error))?;
        let name = entry.file_name();
        if name.starts_with('.') {
            continue;
        }
        let kind = entry
            .file_type()
            .map_err(|error| CliError::io("error listing directory", error))?;
        if kind.is_dir() {
            writeln!(out, "{prefix}{name}/")
                .map_err(|error| CliError::io("error writing completion", error))?;
        } else if (kind.is_file() || kind.is_symlink()) && name.ends_with(FILE_SUFFIX) {
            writeln!(out, "{prefix}{name}")
                .map_err(|error| CliError::io("error writing completion", error))?;
        }
    }
    Ok(())
}

/// Remote-introspection strategy: completes an interface name (and, when
/// asked, a method name) by querying the service behind the token's
/// address part.
///
/// Resolution of the partial token is best-effort; any connect or query
/// failure simply yields no candidates.
///
/// # Errors
///
/// Write faults propagate to the dispatcher, which absorbs them.
pub fn complete_interfaces(
    config: &Config,
    current: &str,
    with_methods: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let (address_text, fragment) = locator::split_address(current);
    let Ok(address) = locator::resolve_address(address_text, config) else {
        return Ok(());
    };
    let prefix = match address_text {
        Some(text) => format!("{text}/"),
        None => String::new(),
    };

    if let CallOutcome::Success(Some(parameters)) = client::get_info(&address)
        && let Ok(info) = serde_json::from_value::<varlink_protocol::ServiceInfo>(parameters)
    {
        for interface in &info.interfaces {
            writeln!(out, "{prefix}{interface}")
                .map_err(|error| CliError::io("error writing completion", error))?;
        }
    }

    if with_methods {
        complete_methods(config, fragment, &prefix, out)?;
    }
    Ok(())
}

/// Completes `INTERFACE.Method` once the fragment already names an
/// interface followed by a dot.
fn complete_methods(
    config: &Config,
    fragment: &str,
    prefix: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let Some(separator) = fragment.rfind('.') else {
        return Ok(());
    };
    let interface = &fragment[..separator];
    if !varlink_idl::is_interface_name(interface) {
        return Ok(());
    }
    let Ok(locator) = locator::resolve(
        &format!("{prefix}{interface}"),
        config,
    ) else {
        return Ok(());
    };
    let CallOutcome::Success(Some(parameters)) = client::get_interface_description(&locator)
    else {
        return Ok(());
    };
    let Ok(description) =
        serde_json::from_value::<varlink_protocol::InterfaceDescription>(parameters)
    else {
        return Ok(());
    };
    let Ok(parsed) = varlink_idl::parse(&description.description) else {
        return Ok(());
    };
    for method in parsed.method_names() {
        writeln!(out, "{prefix}{interface}.{method}")
            .map_err(|error| CliError::io("error writing completion", error))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn collect(buffer: &[u8]) -> BTreeSet<String> {
        String::from_utf8_lossy(buffer)
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn offers_matching_files_and_every_directory() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("a.varlink"), "interface a.b\n").expect("write");
        fs::write(dir.path().join("b.txt"), "").expect("write");
        fs::write(dir.path().join(".hidden"), "").expect("write");
        fs::create_dir(dir.path().join("sub")).expect("mkdir");

        let prefix = format!("{}/", dir.path().display());
        let mut out = Vec::new();
        complete_files(&prefix, &mut out).expect("complete");

        let expected: BTreeSet<String> = [format!("{prefix}a.varlink"), format!("{prefix}sub/")]
            .into_iter()
            .collect();
        assert_eq!(collect(&out), expected);
    }

    #[test]
    fn a_missing_directory_yields_an_error_for_the_dispatcher_to_absorb() {
        let mut out = Vec::new();
        let result = complete_files("/definitely/not/here/", &mut out);
        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn unreachable_services_yield_no_candidates() {
        let port = {
            let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).expect("bind");
            listener.local_addr().expect("local addr").port()
        };
        let mut out = Vec::new();
        complete_interfaces(
            &Config::default(),
            &format!("127.0.0.1:{port}/"),
            false,
            &mut out,
        )
        .expect("completion must not fail");
        assert!(out.is_empty());
    }

    #[test]
    fn an_unresolvable_token_yields_no_candidates() {
        let mut out = Vec::new();
        complete_interfaces(&Config::default(), "org.exa", true, &mut out)
            .expect("completion must not fail");
        assert!(out.is_empty());
    }
}
