//! Text generation building blocks.
//!
//! - [`CodeBuilder`] - Fluent API for building indented text
//! - [`Indent`] - Indentation configuration
//! - [`yaml`] - Scalar quoting helpers for YAML output

mod code_builder;
mod indent;
pub mod yaml;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
