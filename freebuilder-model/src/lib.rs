//! Java type model for the FreeBuilder code generator.
//!
//! The generator never talks to a compiler directly. It reads declarations
//! through the [`TypeModel`] trait, which host adapters implement over
//! whatever representation they have (a compiler's element API, a parsed
//! declaration file, or hand-built fixtures in tests).
//!
//! # Architecture
//!
//! ```text
//! host declarations → TypeModel (this crate) → analysis → strategies → Java source
//! ```
//!
//! The model is language-level only: it knows nothing about builders,
//! properties or generated code.

mod decl;
mod index;
mod name;
mod types;

pub use decl::{
    Annotation, ConstructorDecl, MethodDecl, Modifiers, TypeDecl, TypeKind, TypeParam, Visibility,
};
pub use index::{ModelIndex, TypeModel};
pub use name::ClassName;
pub use types::{PrimitiveKind, TypeRef, Wildcard};
