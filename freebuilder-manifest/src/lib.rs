//! Type declarations loaded from a `types.toml` file.
//!
//! The generator reads Java declarations through
//! [`TypeModel`](freebuilder_model::TypeModel). This crate is the adapter
//! used when no compiler is at hand: the types, their accessors and
//! builder constructors are written down in TOML and lowered into a
//! [`ModelIndex`](freebuilder_model::ModelIndex).
//!
//! ```toml
//! [features]
//! source = "java8"
//! guava = false
//!
//! [[type]]
//! name = "com.example.Person"
//! annotations = ["FreeBuilder"]
//!
//! [[type.method]]
//! name = "getName"
//! returns = "String"
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod known;
mod manifest;
mod syntax;

pub use error::{Error, Result};
pub use manifest::{Manifest, ParseContext};
