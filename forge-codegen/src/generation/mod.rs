//! Declarative collection of generated files.

mod registry;

pub use registry::{FileCategory, FileEntry, FileRegistry};
