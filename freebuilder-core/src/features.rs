//! Features of the compilation environment that change what code is emitted.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Java source level of the code being compiled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SourceLevel {
    Java6,
    Java7,
    #[default]
    Java8,
    Java9,
    Java10,
    Java11,
}

impl SourceLevel {
    pub const ALL: [SourceLevel; 6] = [
        Self::Java6,
        Self::Java7,
        Self::Java8,
        Self::Java9,
        Self::Java10,
        Self::Java11,
    ];

    /// The release number, e.g. `8`.
    pub fn release(&self) -> u8 {
        match self {
            Self::Java6 => 6,
            Self::Java7 => 7,
            Self::Java8 => 8,
            Self::Java9 => 9,
            Self::Java10 => 10,
            Self::Java11 => 11,
        }
    }
}

impl fmt::Display for SourceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "java{}", self.release())
    }
}

impl FromStr for SourceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let release = s
            .trim()
            .trim_start_matches("java")
            .trim_start_matches("1.");
        Self::ALL
            .into_iter()
            .find(|level| level.release().to_string() == release)
            .ok_or_else(|| {
                format!(
                    "unsupported source level '{}' (expected one of java6 .. java11)",
                    s
                )
            })
    }
}

/// The set of environment features consulted during code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSet {
    /// Java source level.
    pub source: SourceLevel,
    /// Whether Guava is on the compile classpath.
    pub guava: bool,
}

impl FeatureSet {
    pub fn new(source: SourceLevel, guava: bool) -> Self {
        Self { source, guava }
    }

    /// Single-abstract-method lambdas and `java.util.function`.
    pub fn has_lambdas(&self) -> bool {
        self.source >= SourceLevel::Java8
    }

    /// The `<>` diamond operator.
    pub fn has_diamond(&self) -> bool {
        self.source >= SourceLevel::Java7
    }

    /// `java.util.Objects`.
    pub fn has_objects(&self) -> bool {
        self.source >= SourceLevel::Java7
    }

    /// `Collections.unmodifiableNavigableSet`.
    pub fn has_unmodifiable_navigable_set(&self) -> bool {
        self.source >= SourceLevel::Java8
    }

    /// Qualified name of the `@Generated` annotation for this source level.
    pub fn generated_annotation(&self) -> (&'static str, &'static str) {
        if self.source >= SourceLevel::Java9 {
            ("javax.annotation.processing", "Generated")
        } else {
            ("javax.annotation", "Generated")
        }
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.source,
            if self.guava { " + guava" } else { "" }
        )
    }
}
