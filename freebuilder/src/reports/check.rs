//! Check command report data structures.

use freebuilder_core::FeatureSet;
use freebuilder_processor::pipeline::Diagnostic;
use serde::Serialize;

use super::{
    output::{Output, Report},
    render_diagnostics,
};

/// Report data from analysing a declaration file.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Path of the declaration file.
    pub file: String,
    pub features: FeatureSet,
    /// Qualified names of the types a builder would be generated for.
    pub types: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(&self.diagnostics, out);
        if self.has_errors() {
            return;
        }
        if !self.diagnostics.is_empty() {
            out.newline();
        }

        out.preformatted(&format!("✓ {} is valid", self.file));
        out.key_value("Target", &self.features.to_string());
        out.section(&format!(
            "{} type{}",
            self.types.len(),
            if self.types.len() == 1 { "" } else { "s" }
        ));
        for name in &self.types {
            out.list_item(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordingOutput;

    fn report(diagnostics: Vec<Diagnostic>) -> CheckReport {
        CheckReport {
            file: "types.toml".to_string(),
            features: FeatureSet::default(),
            types: vec!["com.example.Person".to_string()],
            diagnostics,
        }
    }

    #[test]
    fn test_render_valid() {
        let mut out = RecordingOutput::default();
        report(Vec::new()).render(&mut out);
        assert_eq!(
            out.lines,
            [
                "✓ types.toml is valid",
                "Target: java8",
                "1 type:",
                "  - com.example.Person",
            ]
        );
    }

    #[test]
    fn test_render_errors_only() {
        let mut out = RecordingOutput::default();
        let report = report(vec![Diagnostic::error("analyse", "bad").at("com.example.Bad")]);
        assert!(report.has_errors());
        report.render(&mut out);
        assert_eq!(out.lines, ["error: bad\n  --> com.example.Bad"]);
    }

    #[test]
    fn test_json_shape() {
        let report = report(vec![Diagnostic::info("analyse", "hint")]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["features"]["source"], "java8");
        assert_eq!(json["types"][0], "com.example.Person");
        assert_eq!(json["diagnostics"][0]["severity"], "info");
        assert_eq!(json["diagnostics"][0]["location"], serde_json::Value::Null);
    }
}
