//! Building blocks for emitting Java source.
//!
//! [`builder`] holds the language-neutral indentation machinery;
//! [`java`] layers class, method and field nodes on top of it together
//! with an import-aware type renderer.

pub mod builder;
pub mod java;

pub use builder::{CodeBuilder, CodeFragment, Indent, Renderable};
