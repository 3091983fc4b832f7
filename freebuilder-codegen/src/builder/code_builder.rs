//! Code builder utility for generating properly indented code.

use super::{CodeFragment, Indent, Renderable};

/// Fluent API for building code with proper indentation.
///
/// Supports both consuming methods (returning `Self`) for chaining and
/// mutable methods (returning `&mut Self`) for incremental emission.
///
/// # Example
///
/// ```
/// use freebuilder_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::java()
///     .line("class Hello {")
///     .indent()
///     .line("int x;")
///     .dedent()
///     .line("}")
///     .build();
///
/// assert_eq!(code, "class Hello {\n  int x;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 2-space indentation (Java default).
    pub fn java() -> Self {
        Self::new(Indent::JAVA)
    }

    // =========================================================================
    // Mutable API - methods prefixed with `push_`
    // =========================================================================

    /// Add a line of code with current indentation (mutable).
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (mutable).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level (mutable).
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level (mutable).
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a Javadoc comment (mutable).
    ///
    /// Single lines collapse to `/** text */`.
    pub fn push_javadoc(&mut self, lines: &[String]) -> &mut Self {
        match lines {
            [] => self,
            [single] => self.push_line(&format!("/** {} */", single)),
            _ => {
                self.push_line("/**");
                for line in lines {
                    if line.is_empty() {
                        self.push_line(" *");
                    } else {
                        self.push_line(&format!(" * {}", line));
                    }
                }
                self.push_line(" */")
            }
        }
    }

    /// Emit a Renderable node (mutable).
    pub fn emit(&mut self, node: &(impl Renderable + ?Sized)) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    /// Apply a single code fragment.
    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.push_indent();
                for f in body {
                    self.apply_fragment(f);
                }
                self.push_dedent();
                if let Some(c) = close {
                    self.push_line(&c);
                }
            }
            CodeFragment::Indent(fragments) => {
                self.push_indent();
                for f in fragments {
                    self.apply_fragment(f);
                }
                self.push_dedent();
            }
            CodeFragment::Sequence(fragments) => {
                for f in fragments {
                    self.apply_fragment(f);
                }
            }
            CodeFragment::Javadoc(lines) => {
                self.push_javadoc(&lines);
            }
        }
    }

    // =========================================================================
    // Consuming API
    // =========================================================================

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.push_blank();
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::java()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let code = CodeBuilder::java().line("int x = 1;").build();
        assert_eq!(code, "int x = 1;\n");
    }

    #[test]
    fn test_blank_line() {
        let code = CodeBuilder::java()
            .line("package com.example;")
            .blank()
            .line("class Foo {}")
            .build();
        assert_eq!(code, "package com.example;\n\nclass Foo {}\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let builder = CodeBuilder::java().dedent().dedent();
        assert_eq!(builder.current_indent(), 0);
    }

    #[test]
    fn test_javadoc_single_and_multi_line() {
        let mut builder = CodeBuilder::java();
        builder.push_javadoc(&["Returns the name.".to_string()]);
        builder.push_javadoc(&[
            "First.".to_string(),
            String::new(),
            "Second.".to_string(),
        ]);
        assert_eq!(
            builder.build(),
            "/** Returns the name. */\n/**\n * First.\n *\n * Second.\n */\n"
        );
    }

    #[test]
    fn test_emit_block_fragment() {
        let block = CodeFragment::block(
            "if (x != null) {",
            vec![CodeFragment::line("return x;")],
            Some("}".to_string()),
        );

        let mut builder = CodeBuilder::java();
        builder.emit(&block);
        assert_eq!(builder.build(), "if (x != null) {\n  return x;\n}\n");
    }

    #[test]
    fn test_emit_nested_indent() {
        let fragments = vec![
            CodeFragment::line("a();"),
            CodeFragment::Indent(vec![CodeFragment::line("b();")]),
            CodeFragment::Blank,
            CodeFragment::line("c();"),
        ];

        let mut builder = CodeBuilder::new(Indent::AOSP);
        builder.emit(fragments.as_slice());
        assert_eq!(builder.build(), "a();\n    b();\n\nc();\n");
    }
}
