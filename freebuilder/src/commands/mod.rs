mod check;
mod completions;
mod generate;

use check::CheckCommand;
use clap::{ArgAction, Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use freebuilder_core::{FeatureSet, SourceLevel};
use freebuilder_manifest::Manifest;
use generate::GenerateCommand;
use tracing_subscriber::EnvFilter;

/// Extension trait for exiting on declaration-file errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for freebuilder_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "freebuilder")]
#[command(version)]
#[command(about = "Generate Java builders for FreeBuilder value types")]
pub(crate) struct Cli {
    /// Log analysis and generation decisions (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Install the log subscriber. `RUST_LOG` applies unless `-v` is given.
    pub fn init_tracing(&self) {
        let filter = match self.verbose {
            0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate builder sources from types.toml
    Generate(GenerateCommand),

    /// Analyse types.toml and report diagnostics without writing files
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Overrides for the `[features]` table of the declaration file.
#[derive(Args, Debug, Default)]
pub(crate) struct FeatureArgs {
    /// Java source level of the target code, e.g. java8 or 11
    #[arg(long)]
    pub source: Option<SourceLevel>,

    /// Whether Guava is on the target's classpath
    #[arg(long)]
    pub guava: Option<bool>,
}

impl FeatureArgs {
    pub fn apply(&self, features: FeatureSet) -> FeatureSet {
        FeatureSet {
            source: self.source.unwrap_or(features.source),
            guava: self.guava.unwrap_or(features.guava),
        }
    }

    /// Load the declaration file and apply the overrides.
    pub fn load(&self, path: &std::path::Path) -> Manifest {
        let mut manifest = Manifest::from_file(path).unwrap_or_exit();
        manifest.features = self.apply(manifest.features);
        manifest
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_feature_overrides() {
        let file = FeatureSet::new(SourceLevel::Java8, true);
        assert_eq!(FeatureArgs::default().apply(file), file);

        let args = FeatureArgs {
            source: Some(SourceLevel::Java6),
            guava: Some(false),
        };
        assert_eq!(args.apply(file), FeatureSet::new(SourceLevel::Java6, false));
    }

    #[test]
    fn test_parse_generate_flags() {
        let cli = Cli::try_parse_from([
            "freebuilder",
            "-v",
            "generate",
            "types.toml",
            "--source",
            "java7",
            "--guava",
            "true",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        let Commands::Generate(cmd) = cli.command else {
            panic!("expected generate");
        };
        assert!(cmd.dry_run);
        assert_eq!(cmd.features.source, Some(SourceLevel::Java7));
        assert_eq!(cmd.features.guava, Some(true));
    }
}
