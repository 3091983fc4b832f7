//! Whole compilation units.

use super::ClassSpec;
use crate::builder::{CodeBuilder, Indent};

/// A Java source file: package, imports and one top-level type.
#[derive(Debug, Clone)]
pub struct JavaFile {
    package: String,
    imports: Vec<String>,
    class: ClassSpec,
    indent: Indent,
}

impl JavaFile {
    /// `imports` are qualified names; they are sorted and deduplicated on
    /// render.
    pub fn new(package: impl Into<String>, imports: Vec<String>, class: ClassSpec) -> Self {
        Self {
            package: package.into(),
            imports,
            class,
            indent: Indent::default(),
        }
    }

    pub fn indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn render(&self) -> String {
        let mut code = CodeBuilder::new(self.indent);
        if !self.package.is_empty() {
            code.push_line(&format!("package {};", self.package));
            code.push_blank();
        }

        let mut imports = self.imports.clone();
        imports.sort();
        imports.dedup();
        if !imports.is_empty() {
            for import in &imports {
                code.push_line(&format!("import {};", import));
            }
            code.push_blank();
        }

        code.emit(&self.class);
        code.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::java::{FieldSpec, MethodSpec};

    #[test]
    fn test_render_file() {
        let class = ClassSpec::class("Person_Builder")
            .abstract_()
            .field(FieldSpec::new("String", "name"))
            .method(MethodSpec::new("getName").returns("String").body(|b| {
                b.line("return name;");
            }));
        let file = JavaFile::new(
            "com.example",
            vec!["java.util.Objects".into(), "java.util.List".into(), "java.util.List".into()],
            class,
        );

        insta::assert_snapshot!(file.render(), @r"
        package com.example;

        import java.util.List;
        import java.util.Objects;

        abstract class Person_Builder {
          private String name;

          public String getName() {
            return name;
          }
        }
        ");
    }

    #[test]
    fn test_default_package_no_imports() {
        let file = JavaFile::new("", Vec::new(), ClassSpec::class("Empty"));
        assert_eq!(file.render(), "class Empty {}\n");
    }
}
