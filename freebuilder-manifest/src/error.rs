use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for declaration-file operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source content and filename, shared by the error constructors.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    pub fn validation_error(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: None,
            message: message.into(),
        })
    }

    pub fn validation_error_at(
        &self,
        message: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: Some(span.into()),
            message: message.into(),
        })
    }

    /// A type expression that does not parse.
    pub fn invalid_type_error(
        &self,
        ty: impl Into<String>,
        reason: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidType {
            src: self.named_source(),
            span: Some(span.into()),
            ty: ty.into(),
            reason: reason.into(),
        })
    }

    /// A name that is neither declared in the file nor a known library type.
    pub fn unknown_type_error(
        &self,
        name: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnknownType {
            src: self.named_source(),
            span: Some(span.into()),
            name: name.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass the path of a types.toml declaration file"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse type declarations")]
    #[diagnostic(code(freebuilder::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid type '{ty}'")]
    #[diagnostic(
        code(freebuilder::invalid_type),
        help("{reason}; types are written as in Java source, e.g. 'List<? extends T>' or 'int[]'")
    )]
    InvalidType {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid type")]
        span: Option<SourceSpan>,
        ty: String,
        reason: String,
    },

    #[error("unknown type '{name}'")]
    #[diagnostic(
        code(freebuilder::unknown_type),
        help("use a fully-qualified name, or declare the type with a [[type]] table")
    )]
    UnknownType {
        #[source_code]
        src: NamedSource<String>,
        #[label("not declared or imported")]
        span: Option<SourceSpan>,
        name: String,
    },

    #[error("{message}")]
    #[diagnostic(code(freebuilder::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}
