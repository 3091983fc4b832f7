//! Reasons a type cannot have a builder generated for it.

use thiserror::Error;

/// A recoverable failure analysing one FreeBuilder type.
///
/// Each variant aborts generation for the offending type only; the
/// pipeline turns it into an error diagnostic and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("{name} is {kind}; FreeBuilder types must be interfaces or abstract classes")]
    UnsupportedKind { name: String, kind: &'static str },

    #[error("{name} is private; FreeBuilder types must be visible to their generated builder")]
    PrivateType { name: String },

    #[error("{name} is an inner class; nested FreeBuilder types must be static")]
    NotStatic { name: String },

    #[error("{name} has no visible no-argument constructor")]
    MissingNoArgsConstructor { name: String },

    #[error("{name} extends {supertype}, which is not part of the type model")]
    UnknownSupertype { name: String, supertype: String },

    #[error("{name}.{method} is abstract but is not a property accessor: {reason}")]
    NonAccessorAbstractMethod {
        name: String,
        method: String,
        reason: &'static str,
    },

    #[error(
        "{name} mixes accessor conventions: '{bean}' uses a get/is prefix but '{prefixless}' does not"
    )]
    MixedConventions {
        name: String,
        bean: String,
        prefixless: String,
    },

    #[error("no code generator accepts property '{property}' of {name}")]
    UnclaimedProperty { name: String, property: String },

    #[error("property '{property}' of {name} clashes with the generated method '{method}'")]
    NameClash {
        name: String,
        property: String,
        method: String,
    },

    #[error("{name}.Builder is invalid: {reason}")]
    InvalidBuilder { name: String, reason: String },

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
