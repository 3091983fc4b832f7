//! Declaration files and their lowering into a type model.

mod lower;
mod parse;
mod tables;
mod validate;

use freebuilder_core::FeatureSet;
use freebuilder_model::ModelIndex;
pub use validate::ParseContext;

/// A loaded `types.toml`: the target's features and the declared types.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Source level and libraries of the code being compiled.
    pub features: FeatureSet,
    /// Every declared type, in file order.
    pub model: ModelIndex,
}
