//! Typed payloads of the `org.varlink.service` introspection interface.

use serde::{Deserialize, Serialize};

/// Interface every conforming service implements.
pub const SERVICE_INTERFACE: &str = "org.varlink.service";

/// Method returning vendor metadata and the list of provided interfaces.
pub const GET_INFO: &str = "org.varlink.service.GetInfo";

/// Method returning the description text of one interface.
pub const GET_INTERFACE_DESCRIPTION: &str = "org.varlink.service.GetInterfaceDescription";

/// Error replied when a service does not provide the requested interface.
pub const INTERFACE_NOT_FOUND: &str = "org.varlink.service.InterfaceNotFound";

/// Error replied when an interface does not define the called method.
pub const METHOD_NOT_FOUND: &str = "org.varlink.service.MethodNotFound";

/// Output parameters of `GetInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub vendor: String,
    pub product: String,
    pub version: String,
    pub url: String,
    /// Interfaces the service provides, by reverse-domain name.
    pub interfaces: Vec<String>,
}

/// Input parameters of `GetInterfaceDescription`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetInterfaceDescriptionArgs {
    pub interface: String,
}

/// Output parameters of `GetInterfaceDescription`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDescription {
    pub description: String,
}
