use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use freebuilder_processor::pipeline::Pipeline;

use super::FeatureArgs;
use crate::reports::{CheckReport, Report, TerminalOutput};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the declaration file
    #[arg(default_value = "types.toml")]
    pub file: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub features: FeatureArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let manifest = self.features.load(&self.file);

        let ctx = Pipeline::new()
            .run(&manifest.model, manifest.features)
            .wrap_err("Validation failed")?;

        let report = CheckReport {
            file: self.file.display().to_string(),
            features: manifest.features,
            types: ctx
                .metadata
                .iter()
                .flatten()
                .map(|m| m.datatype.qualified())
                .collect(),
            diagnostics: ctx.diagnostics,
        };

        if self.json {
            let json = serde_json::to_string_pretty(&report).wrap_err("Failed to serialize report")?;
            println!("{}", json);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        if report.has_errors() {
            std::process::exit(1);
        }
        Ok(())
    }
}
