// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Packaging for the Stackforge blueprint compiler.
//!
//! [`Generator`] runs the codegen pipeline on a blueprint, writes the project
//! tree into a scoped working directory and compresses it into an
//! [`Archive`]. Archives own their file until delivered or released.

mod archive;
mod config;
mod error;
mod files;
mod generate;
mod packager;

pub use archive::{ARCHIVE_EXTENSION, Archive, CompletionSignal, sweep_expired};
pub use config::{GeneratorConfig, OutputConfig, TemplatesConfig};
pub use error::{ConfigError, GenerationError};
pub use files::{ENV_TEMPLATE_FILE_NAME, EnvTemplate, SUMMARY_FILE_NAME, Summary};
pub use generate::{Delivered, Generated, Generator, Undelivered};
pub use packager::{MAX_COMPRESSION_LEVEL, Packager};
