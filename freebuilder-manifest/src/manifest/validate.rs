//! Validation context and Java identifier rules.

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Carries source information and the current position in the file
/// through validation and lowering.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "types.toml");
/// let person = ctx.push("com.example.Person");
/// person.validate_name("getName", "method", span)?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext {
    source: SourceContext,
    /// Enclosing declarations, outermost first.
    path: Vec<String>,
}

impl ParseContext {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: SourceContext::new(src, filename),
            path: Vec::new(),
        }
    }

    pub(crate) fn source(&self) -> &SourceContext {
        &self.source
    }

    /// A context one declaration deeper.
    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        path.push(segment.into());
        Self {
            source: self.source.clone(),
            path,
        }
    }

    /// e.g. "method in 'com.example.Person'", or just "method" at the root.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path.join("."))
        }
    }

    /// Check `name` is a legal Java identifier.
    pub fn validate_name(&self, name: &str, kind: &str, span: impl Into<SourceSpan>) -> Result<()> {
        match validate_identifier(name) {
            Some(reason) => Err(self.source.validation_error_at(
                format!("invalid {} name '{}': {}", self.context_for(kind), name, reason),
                span,
            )),
            None => Ok(()),
        }
    }
}

/// Java reserved words, including the literals.
pub(crate) const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null", "_",
];

pub(crate) fn is_java_keyword(name: &str) -> bool {
    JAVA_KEYWORDS.contains(&name)
}

/// Returns None if valid, Some(reason) if not.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Some("name cannot be empty");
    };
    if is_java_keyword(name) {
        return Some("name is a Java reserved word");
    }
    if !(first.is_alphabetic() || first == '_' || first == '$') {
        return Some("name must start with a letter, '_' or '$'");
    }
    if !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
        return Some("name may only contain letters, digits, '_' and '$'");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert_eq!(validate_identifier("getName"), None);
        assert_eq!(validate_identifier("$value_2"), None);
        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("class").is_some());
        assert!(validate_identifier("2fast").is_some());
        assert!(validate_identifier("with-dash").is_some());
    }

    #[test]
    fn test_context_for() {
        let ctx = ParseContext::new("", "types.toml");
        assert_eq!(ctx.context_for("type"), "type");
        assert_eq!(
            ctx.push("com.example.Person").context_for("method"),
            "method in 'com.example.Person'"
        );
    }
}
