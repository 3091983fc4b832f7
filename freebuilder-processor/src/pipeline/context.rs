//! State shared by the phases of one round.

use eyre::{Result, eyre};
use freebuilder_core::FeatureSet;
use freebuilder_model::TypeModel;

use super::diagnostic::Diagnostic;
use crate::{analysis::TypeMetadata, generator::GeneratedBuilder};

/// Context passed through all pipeline phases.
///
/// Nothing in it outlives the round; a new round starts from a fresh
/// context over the same or an updated model.
pub struct CompilationContext<'m> {
    /// The declarations visible this round.
    pub model: &'m dyn TypeModel,
    pub features: FeatureSet,
    /// Successfully analysed types (populated by `AnalysePhase`).
    pub metadata: Option<Vec<TypeMetadata>>,
    /// Generated sources (populated by `GeneratePhase`).
    pub generated: Option<Vec<GeneratedBuilder>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl std::fmt::Debug for CompilationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompilationContext")
            .field("features", &self.features)
            .field("metadata", &self.metadata)
            .field("generated", &self.generated)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

impl<'m> CompilationContext<'m> {
    pub fn new(model: &'m dyn TypeModel, features: FeatureSet) -> Self {
        Self {
            model,
            features,
            metadata: None,
            generated: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_error())
    }

    /// Take the analysed types out of the context.
    ///
    /// # Errors
    ///
    /// Fails if `AnalysePhase` has not run.
    pub fn take_metadata(&mut self) -> Result<Vec<TypeMetadata>> {
        self.metadata
            .take()
            .ok_or_else(|| eyre!("type metadata not set - did AnalysePhase run?"))
    }

    /// Take the generated sources out of the context.
    ///
    /// # Errors
    ///
    /// Fails if `GeneratePhase` has not run.
    pub fn take_generated(&mut self) -> Result<Vec<GeneratedBuilder>> {
        self.generated
            .take()
            .ok_or_else(|| eyre!("generated sources not set - did GeneratePhase run?"))
    }
}
