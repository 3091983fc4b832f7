//! Per-round processing pipeline.
//!
//! A [`Pipeline`] runs an ordered list of phases over a shared
//! [`CompilationContext`]:
//!
//! - [`AnalysePhase`](phases::AnalysePhase) turns every `@FreeBuilder`
//!   declaration into [`TypeMetadata`](crate::TypeMetadata)
//! - [`GeneratePhase`](phases::GeneratePhase) renders one builder source
//!   file per analysed type
//!
//! A type that cannot be analysed is reported as an error
//! [`Diagnostic`] and skipped; the remaining types are still processed.
//!
//! # Example
//!
//! ```ignore
//! use freebuilder_processor::pipeline::Pipeline;
//!
//! let mut ctx = Pipeline::standard().run(&model, features)?;
//! for diag in &ctx.diagnostics {
//!     eprintln!("{diag}");
//! }
//! let files = ctx.take_generated()?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use runner::Pipeline;
