//! Generate phase - render builder sources.

use eyre::Result;

use crate::{
    generator,
    pipeline::{CompilationContext, Phase},
};

/// Phase that renders one builder per analysed type.
pub struct GeneratePhase;

impl Phase for GeneratePhase {
    fn name(&self) -> &'static str {
        "generate"
    }

    fn description(&self) -> &'static str {
        "Render builder source files"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let features = ctx.features;
        let generated = ctx
            .metadata
            .as_ref()
            .ok_or_else(|| eyre::eyre!("type metadata not set - did AnalysePhase run?"))?
            .iter()
            .map(|metadata| generator::generate(metadata, features))
            .collect();
        ctx.generated = Some(generated);
        Ok(())
    }
}
