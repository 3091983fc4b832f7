//! Renderable trait and CodeFragment for decoupled code generation.
//!
//! This module provides abstractions that allow syntax nodes to be composed
//! and rendered without direct coupling to CodeBuilder.

/// Represents a fragment of generated code.
///
/// CodeFragments form an intermediate representation between syntax nodes
/// and the final string output, enabling composition and transformation.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line of code (will have newline appended).
    Line(String),
    /// A blank line.
    Blank,
    /// A block with header, body fragments, and optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// Indent the contained fragments.
    Indent(Vec<CodeFragment>),
    /// A sequence of fragments.
    Sequence(Vec<CodeFragment>),
    /// A Javadoc comment, one entry per line.
    Javadoc(Vec<String>),
}

impl CodeFragment {
    /// Create a line fragment.
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    /// Create a block fragment.
    pub fn block(header: impl Into<String>, body: Vec<CodeFragment>, close: Option<String>) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close,
        }
    }

    /// Create a Javadoc fragment from text that may span several lines.
    pub fn javadoc(text: &str) -> Self {
        Self::Javadoc(text.lines().map(str::to_string).collect())
    }
}

/// Trait for syntax nodes that can be rendered to code fragments.
pub trait Renderable {
    /// Convert this node to a sequence of code fragments.
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

impl Renderable for CodeFragment {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![self.clone()]
    }
}

impl<T: Renderable> Renderable for [T] {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.iter().flat_map(Renderable::to_fragments).collect()
    }
}
