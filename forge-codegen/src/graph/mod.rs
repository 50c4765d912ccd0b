//! Dependency resolution over blueprint connections.

mod dependencies;

pub use dependencies::{DependencyGraph, dependencies_of};
