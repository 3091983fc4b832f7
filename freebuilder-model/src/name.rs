//! Qualified Java class names.

use std::fmt;

/// A fully-qualified Java class name, split into its package and the chain
/// of simple names from the top-level class down to the named class.
///
/// `java.util.Map.Entry` has package `java.util` and simple names
/// `["Map", "Entry"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    package: String,
    simple_names: Vec<String>,
}

impl ClassName {
    /// Create a top-level class name.
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple_names: vec![simple_name.into()],
        }
    }

    /// Create a class name from a package and a non-empty nesting chain.
    ///
    /// Returns `None` if `simple_names` is empty.
    pub fn from_parts(package: impl Into<String>, simple_names: Vec<String>) -> Option<Self> {
        if simple_names.is_empty() {
            return None;
        }
        Some(Self {
            package: package.into(),
            simple_names,
        })
    }

    /// Parse a dotted name using the Java naming convention: leading
    /// lowercase segments form the package, the rest are class names.
    ///
    /// Returns `None` if no segment starts with an uppercase letter.
    pub fn parse(dotted: &str) -> Option<Self> {
        let segments: Vec<&str> = dotted.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        let split = segments
            .iter()
            .position(|s| s.chars().next().is_some_and(char::is_uppercase))?;
        Self::from_parts(
            segments[..split].join("."),
            segments[split..].iter().map(|s| s.to_string()).collect(),
        )
    }

    /// Shorthand for a `java.lang` class.
    pub fn java_lang(simple_name: &str) -> Self {
        Self::new("java.lang", simple_name)
    }

    /// Shorthand for a `java.util` class.
    pub fn java_util(simple_name: &str) -> Self {
        Self::new("java.util", simple_name)
    }

    /// Shorthand for a Guava `com.google.common.collect` class.
    pub fn guava_collect(simple_name: &str) -> Self {
        Self::new("com.google.common.collect", simple_name)
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn simple_names(&self) -> &[String] {
        &self.simple_names
    }

    /// The innermost simple name.
    pub fn simple_name(&self) -> &str {
        self.simple_names
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// The outermost (top-level) class containing this one, or itself.
    pub fn top_level(&self) -> ClassName {
        Self {
            package: self.package.clone(),
            simple_names: self.simple_names[..1].to_vec(),
        }
    }

    /// The class directly enclosing this one, if nested.
    pub fn enclosing(&self) -> Option<ClassName> {
        if self.simple_names.len() < 2 {
            return None;
        }
        Some(Self {
            package: self.package.clone(),
            simple_names: self.simple_names[..self.simple_names.len() - 1].to_vec(),
        })
    }

    /// A class nested directly inside this one.
    pub fn nested(&self, simple_name: impl Into<String>) -> ClassName {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(simple_name.into());
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    /// A top-level class in the same package.
    pub fn peer(&self, simple_name: impl Into<String>) -> ClassName {
        Self::new(self.package.clone(), simple_name)
    }

    pub fn is_nested(&self) -> bool {
        self.simple_names.len() > 1
    }

    /// The nesting chain joined with dots, e.g. `Map.Entry`.
    pub fn relative_name(&self) -> String {
        self.simple_names.join(".")
    }

    /// The nesting chain joined with underscores, e.g. `Map_Entry`.
    ///
    /// Used to derive the names of generated top-level classes.
    pub fn flat_name(&self) -> String {
        self.simple_names.join("_")
    }

    /// The fully-qualified dotted name.
    pub fn qualified(&self) -> String {
        if self.package.is_empty() {
            self.relative_name()
        } else {
            format!("{}.{}", self.package, self.relative_name())
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified())
    }
}
