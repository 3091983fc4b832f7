//! Field declarations.

use freebuilder_model::Visibility;

use super::modifier_prefix;
use crate::builder::{CodeFragment, Renderable};

/// A field, optionally with an initializer expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    ty: String,
    name: String,
    visibility: Visibility,
    is_static: bool,
    is_final: bool,
    annotations: Vec<String>,
    initializer: Option<String>,
}

impl FieldSpec {
    /// A private field.
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            visibility: Visibility::Private,
            is_static: false,
            is_final: false,
            annotations: Vec::new(),
            initializer: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn final_(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn init(mut self, expr: impl Into<String>) -> Self {
        self.initializer = Some(expr.into());
        self
    }
}

impl Renderable for FieldSpec {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> =
            self.annotations.iter().map(CodeFragment::line).collect();
        let mut decl = modifier_prefix(self.visibility, false, self.is_static, self.is_final);
        decl.push_str(&format!("{} {}", self.ty, self.name));
        if let Some(init) = &self.initializer {
            decl.push_str(&format!(" = {}", init));
        }
        decl.push(';');
        fragments.push(CodeFragment::Line(decl));
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CodeBuilder;

    fn render(field: &FieldSpec) -> String {
        let mut code = CodeBuilder::java();
        code.emit(field);
        code.build()
    }

    #[test]
    fn test_private_field() {
        assert_eq!(render(&FieldSpec::new("String", "name")), "private String name;\n");
    }

    #[test]
    fn test_final_field_with_initializer() {
        let field = FieldSpec::new("List<String>", "names")
            .final_()
            .init("new ArrayList<>()");
        assert_eq!(
            render(&field),
            "private final List<String> names = new ArrayList<>();\n"
        );
    }

    #[test]
    fn test_package_private_static() {
        let field = FieldSpec::new("int", "COUNT")
            .visibility(Visibility::PackagePrivate)
            .static_()
            .final_()
            .init("3");
        assert_eq!(render(&field), "static final int COUNT = 3;\n");
    }
}
