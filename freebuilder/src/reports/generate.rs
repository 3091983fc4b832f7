//! Generate command report data structures.

use freebuilder_core::{FeatureSet, WriteResult};
use freebuilder_processor::pipeline::Diagnostic;

use super::{
    output::{Output, Report},
    render_diagnostics,
};

/// One generated source file.
#[derive(Debug)]
pub struct GeneratedEntry {
    /// Path relative to the output directory.
    pub path: String,
    /// Outcome of writing it; `None` on a dry run.
    pub written: Option<WriteResult>,
    /// Full source, shown on a dry run.
    pub source: String,
}

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    pub features: FeatureSet,
    pub dry_run: bool,
    pub diagnostics: Vec<Diagnostic>,
    pub files: Vec<GeneratedEntry>,
}

impl GenerateReport {
    fn count(&self, result: WriteResult) -> usize {
        self.files
            .iter()
            .filter(|f| f.written == Some(result))
            .count()
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(&self.diagnostics, out);

        if self.dry_run {
            for file in &self.files {
                out.divider(&file.path);
                out.preformatted(&file.source);
            }
            out.newline();
            out.key_value("Would generate", &self.files.len().to_string());
            return;
        }

        out.key_value("Target", &self.features.to_string());
        if self.files.is_empty() {
            out.preformatted("No FreeBuilder types found.");
            return;
        }

        let written = self.count(WriteResult::Written);
        if written > 0 {
            out.section("Generated");
            for file in &self.files {
                if file.written == Some(WriteResult::Written) {
                    out.added_item(&file.path);
                }
            }
        }
        let unchanged = self.count(WriteResult::Unchanged);
        if unchanged > 0 {
            out.key_value("Unchanged", &unchanged.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use freebuilder_core::SourceLevel;

    use super::*;
    use crate::reports::output::RecordingOutput;

    fn entry(path: &str, written: Option<WriteResult>) -> GeneratedEntry {
        GeneratedEntry {
            path: path.to_string(),
            written,
            source: "class A {}\n".to_string(),
        }
    }

    #[test]
    fn test_render_written_and_unchanged() {
        let report = GenerateReport {
            features: FeatureSet::new(SourceLevel::Java8, true),
            dry_run: false,
            diagnostics: vec![Diagnostic::warning("analyse", "careful").at("com.example.A")],
            files: vec![
                entry("com/example/A_Builder.java", Some(WriteResult::Written)),
                entry("com/example/B_Builder.java", Some(WriteResult::Unchanged)),
            ],
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            [
                "warning: careful\n  --> com.example.A",
                "Target: java8 + guava",
                "Generated:",
                "  + com/example/A_Builder.java",
                "Unchanged: 1",
            ]
        );
    }

    #[test]
    fn test_render_dry_run_shows_sources() {
        let report = GenerateReport {
            features: FeatureSet::default(),
            dry_run: true,
            diagnostics: Vec::new(),
            files: vec![entry("com/example/A_Builder.java", None)],
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            [
                "── com/example/A_Builder.java ──",
                "class A {}",
                "",
                "Would generate: 1",
            ]
        );
    }
}
