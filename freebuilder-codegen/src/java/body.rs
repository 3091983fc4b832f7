//! Statement lists for method bodies.

use crate::builder::{CodeFragment, Renderable};

/// A sequence of Java statements, built line by line.
///
/// Block helpers take the header without its opening brace.
///
/// ```
/// use freebuilder_codegen::{builder::CodeBuilder, java::Body};
///
/// let mut body = Body::new();
/// body.if_block("name == null", |b| {
///     b.line("throw new NullPointerException();");
/// });
/// body.line("return name;");
///
/// let mut code = CodeBuilder::java();
/// code.emit(&body);
/// assert_eq!(
///     code.build(),
///     "if (name == null) {\n  throw new NullPointerException();\n}\nreturn name;\n"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Body {
    fragments: Vec<CodeFragment>,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single statement line.
    pub fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.fragments.push(CodeFragment::Line(line.into()));
        self
    }

    /// Add a blank line.
    pub fn blank(&mut self) -> &mut Self {
        self.fragments.push(CodeFragment::Blank);
        self
    }

    /// Add `header {`, the statements added by `f`, and `}`.
    pub fn block(&mut self, header: impl AsRef<str>, f: impl FnOnce(&mut Body)) -> &mut Self {
        let mut inner = Body::new();
        f(&mut inner);
        self.fragments.push(CodeFragment::block(
            format!("{} {{", header.as_ref()),
            inner.fragments,
            Some("}".to_string()),
        ));
        self
    }

    /// Add `if (condition) { ... }`.
    pub fn if_block(&mut self, condition: impl AsRef<str>, f: impl FnOnce(&mut Body)) -> &mut Self {
        self.block(format!("if ({})", condition.as_ref()), f)
    }

    /// Add `if (condition) { ... } else { ... }`.
    pub fn if_else(
        &mut self,
        condition: impl AsRef<str>,
        then: impl FnOnce(&mut Body),
        otherwise: impl FnOnce(&mut Body),
    ) -> &mut Self {
        let mut then_body = Body::new();
        then(&mut then_body);
        let mut else_body = Body::new();
        otherwise(&mut else_body);
        self.fragments.push(CodeFragment::block(
            format!("if ({}) {{", condition.as_ref()),
            then_body.fragments,
            Some("} else {".to_string()),
        ));
        self.fragments.push(CodeFragment::Indent(else_body.fragments));
        self.fragments.push(CodeFragment::line("}"));
        self
    }

    /// Append all statements of another body.
    pub fn append(&mut self, other: Body) -> &mut Self {
        self.fragments.extend(other.fragments);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn into_fragments(self) -> Vec<CodeFragment> {
        self.fragments
    }
}

impl Renderable for Body {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.fragments.clone()
    }
}
