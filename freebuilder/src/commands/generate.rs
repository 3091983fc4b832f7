use std::path::{Path, PathBuf};

use clap::Args;
use eyre::{Context, Result};
use freebuilder_core::GeneratedFile;
use freebuilder_processor::pipeline::Pipeline;
use tracing::debug;

use super::FeatureArgs;
use crate::reports::{GenerateReport, GeneratedEntry, Report, TerminalOutput};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the declaration file
    #[arg(default_value = "types.toml")]
    pub file: PathBuf,

    /// Source root to write generated files under
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub features: FeatureArgs,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let manifest = self.features.load(&self.file);
        debug!(features = %manifest.features, types = manifest.model.len(), "loaded declarations");

        let ctx = Pipeline::new()
            .run(&manifest.model, manifest.features)
            .wrap_err("Generation failed")?;
        let has_errors = ctx.has_errors();

        let mut files = Vec::new();
        for builder in ctx.generated.unwrap_or_default() {
            let written = if self.dry_run {
                None
            } else {
                Some(builder.write(&self.output)?)
            };
            files.push(GeneratedEntry {
                path: builder.path(Path::new("")).display().to_string(),
                written,
                source: builder.source,
            });
        }

        let report = GenerateReport {
            features: manifest.features,
            dry_run: self.dry_run,
            diagnostics: ctx.diagnostics,
            files,
        };
        report.render(&mut TerminalOutput::new());

        if has_errors {
            std::process::exit(1);
        }
        Ok(())
    }
}
