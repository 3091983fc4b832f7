//! Built-in pipeline phases.
//!
//! - [`AnalysePhase`] - validates `@FreeBuilder` types and builds their metadata
//! - [`GeneratePhase`] - renders a builder source file per analysed type

mod analyse;
mod generate;

pub use analyse::AnalysePhase;
pub use generate::GeneratePhase;
