// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Blueprint data model for the Stackforge blueprint compiler.
//!
//! A blueprint is a graph of typed service nodes and directed connections
//! between them, exported by the visual editor as JSON. The same structure
//! can also be written by hand in TOML.

mod blueprint;
mod error;
mod file;
mod parse;
mod serde_helpers;

pub use blueprint::{
    Blueprint, Connection, ConnectionKind, DEFAULT_NETWORK, DEFAULT_SCHEMA_VERSION, Metadata,
    Position, ServiceConfig, ServiceNode,
};
pub use error::{Error, Result, SourceContext};
pub use file::{BlueprintFile, Format};
