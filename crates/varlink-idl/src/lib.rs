//! Parser and renderer for varlink interface descriptions.
//!
//! An interface description is the textual definition of a remote
//! interface's methods, types, and errors:
//!
//! ```text
//! # Example chat service
//! interface org.example.chat
//!
//! type Message (sender: string, text: string)
//!
//! method Send(message: Message) -> (id: int)
//!
//! error NotDelivered (id: int)
//! ```
//!
//! [`parse`] turns description text into a structured [`Interface`] or a
//! [`ParseError`] carrying a 1-based line and column. [`render`] turns an
//! [`Interface`] back into text, with a configurable base indent, wrap
//! width, and optional color markers ([`RenderOptions`]).

mod ast;
mod error;
mod name;
mod parser;
mod render;

pub use ast::{ErrorDef, Field, Interface, Member, Method, Type, TypeAlias};
pub use error::ParseError;
pub use name::{is_field_name, is_interface_name, is_member_name};
pub use parser::parse;
pub use render::{MarkerPair, Palette, RenderOptions, render};

#[cfg(test)]
mod tests;
