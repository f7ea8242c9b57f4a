//! Wire types shared by varlink clients.
//!
//! A varlink exchange is a pair of JSON objects, each terminated by a single
//! NUL byte: a call envelope naming a fully-qualified method, and a reply
//! envelope carrying either output parameters or a named error. This crate
//! owns the envelope types, the framing helpers that move them over any
//! `Read`/`Write` pair, and the typed payloads of the `org.varlink.service`
//! introspection interface that every conforming service implements.

mod error;
mod service;
mod wire;

pub use error::WireError;
pub use service::{
    GET_INFO, GET_INTERFACE_DESCRIPTION, GetInterfaceDescriptionArgs, INTERFACE_NOT_FOUND,
    InterfaceDescription, METHOD_NOT_FOUND, SERVICE_INTERFACE, ServiceInfo,
};
pub use wire::{Call, Reply, read_message, write_message};
