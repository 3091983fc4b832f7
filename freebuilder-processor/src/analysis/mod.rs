//! Turning a datatype declaration into [`TypeMetadata`].

mod analyser;
mod metadata;

pub use analyser::Analyser;
pub use metadata::{Property, StandardMethods, StructuralMethods, TypeMetadata};
