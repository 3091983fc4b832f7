//! Errors, warnings and notes collected while processing a round.

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No builder is generated for the type.
    Error,
    Warning,
    /// A suggestion; generation proceeds unchanged.
    Info,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A message from a pipeline phase, optionally located at a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The phase that produced this diagnostic.
    pub phase: String,
    pub message: String,
    /// Qualified name of the type concerned, e.g. `com.example.Person`.
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, phase, message)
    }

    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, phase, message)
    }

    pub fn info(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, phase, message)
    }

    fn new(severity: Severity, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase: phase.into(),
            message: message.into(),
            location: None,
        }
    }

    /// Attach the qualified name of the type concerned.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display_with_location() {
        let diag = Diagnostic::error("analyse", "no code generator accepts property 'x'")
            .at("com.example.Person");
        assert!(diag.severity.is_error());
        assert_eq!(
            diag.to_string(),
            "error: no code generator accepts property 'x' (at com.example.Person)"
        );
    }

    #[test]
    fn test_diagnostic_serializes_lowercase_severity() {
        let diag = Diagnostic::warning("analyse", "careful");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["location"], serde_json::Value::Null);
    }
}
