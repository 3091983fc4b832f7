//! Core utilities and types for the FreeBuilder code generator.
//!
//! This crate provides fundamental types and utilities used across
//! the FreeBuilder crates.

mod features;
mod file;
mod utils;

// Environment features
pub use features::{FeatureSet, SourceLevel};
// File operations
pub use file::{GeneratedFile, WriteResult};
// String utilities
pub use utils::{capitalize, decapitalize, strip_accessor_prefix, to_screaming_snake_case};
