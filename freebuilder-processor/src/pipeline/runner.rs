//! Pipeline orchestrator.

use eyre::Result;
use freebuilder_core::FeatureSet;
use freebuilder_model::TypeModel;
use tracing::debug;

use super::{
    CompilationContext, Phase,
    phases::{AnalysePhase, GeneratePhase},
};

/// Runs the built-in phases (analyse, generate) followed by any extra
/// phases, in order, over one round's type model.
///
/// # Example
///
/// ```ignore
/// let ctx = Pipeline::new()
///     .phase(MyReportPhase)
///     .run(&model, features)?;
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { phases: Vec::new() }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Process every FreeBuilder type in `model`.
    ///
    /// # Errors
    ///
    /// Returns an error only if a phase fails fatally; per-type analysis
    /// failures end up in the context's diagnostics.
    pub fn run<'m>(
        &self,
        model: &'m dyn TypeModel,
        features: FeatureSet,
    ) -> Result<CompilationContext<'m>> {
        let mut ctx = CompilationContext::new(model, features);

        let builtin_phases: Vec<Box<dyn Phase>> =
            vec![Box::new(AnalysePhase), Box::new(GeneratePhase)];

        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            debug!(phase = phase.name(), "{}", phase.description());
            phase.run(&mut ctx)?;
        }

        Ok(ctx)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
