//! Core types and utilities for the Stackforge blueprint compiler.
//!
//! This crate provides the service type catalog and the small set of
//! utilities shared by every other Stackforge crate.

mod file;
mod registry;
mod service_type;
mod types;
mod utils;

// File operations
pub use file::{GeneratedFile, write_file};
// Service catalog
pub use registry::{ServiceDefaults, ServiceTypeRegistry};
pub use service_type::{ParseServiceTypeError, ServiceType};
// Shared config value types
pub use types::{DEFAULT_RESTART_POLICY, HealthCheck, ResourceLimits};
// String utilities
pub use utils::{is_sanitized, sanitize_name};
