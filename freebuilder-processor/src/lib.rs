//! Builder generation for FreeBuilder value types.
//!
//! Given a [`TypeModel`](freebuilder_model::TypeModel) describing the
//! `@FreeBuilder`-annotated interfaces and abstract classes of a
//! compilation round, this crate works out each type's properties and
//! renders the source of its `<Type>_Builder` superclass.
//!
//! - [`analysis`] validates a datatype and classifies every accessor into
//!   a [`PropertyCodeGenerator`]
//! - [`generator`] assembles the builder class, its `Value` and `Partial`
//!   implementations and any checked collection helpers
//! - [`pipeline`] runs both over a whole model, isolating failures per type
//!
//! # Example
//!
//! ```ignore
//! use freebuilder_processor::pipeline::Pipeline;
//!
//! let mut ctx = Pipeline::new().run(&model, features)?;
//! for file in ctx.take_generated()? {
//!     file.write(out_dir)?;
//! }
//! ```

pub mod analysis;
pub mod error;
pub mod factory;
pub mod generator;
mod introspect;
mod names;
pub mod pipeline;
pub mod property;

pub use analysis::{Analyser, Property, TypeMetadata};
pub use error::{AnalysisError, Result};
pub use factory::BuilderFactory;
pub use generator::{GeneratedBuilder, generate};
pub use names::NameAndVisibility;
pub use property::PropertyCodeGenerator;

/// Marker annotation requesting a builder.
pub const FREEBUILDER_ANNOTATION: &str = "org.inferred.freebuilder.FreeBuilder";
