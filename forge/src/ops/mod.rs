//! Core operations.
//!
//! The logic behind each command, separated from argument parsing and
//! output rendering.

pub mod check;
pub mod enhance;
pub mod generate;

pub use check::check;
pub use enhance::enhance;
pub use generate::{GenerateOptions, generate};
