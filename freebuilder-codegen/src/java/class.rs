//! Class, interface and enum declarations.

use freebuilder_model::Visibility;

use super::{FieldSpec, MethodSpec, modifier_prefix};
use crate::builder::{CodeFragment, Renderable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
}

impl ClassKind {
    fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
        }
    }
}

/// Something declared in a class body.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldSpec),
    Method(MethodSpec),
    Type(ClassSpec),
    /// Enum constants, each already rendered, e.g. `NAME("name")`.
    EnumConstants(Vec<String>),
}

impl Member {
    fn is_field(&self) -> bool {
        matches!(self, Self::Field(_))
    }

    fn fragments(&self) -> Vec<CodeFragment> {
        match self {
            Self::Field(field) => field.to_fragments(),
            Self::Method(method) => method.to_fragments(),
            Self::Type(class) => class.to_fragments(),
            Self::EnumConstants(constants) => {
                let last = constants.len().saturating_sub(1);
                constants
                    .iter()
                    .enumerate()
                    .map(|(i, c)| {
                        let sep = if i == last { ";" } else { "," };
                        CodeFragment::Line(format!("{}{}", c, sep))
                    })
                    .collect()
            }
        }
    }
}

/// A type declaration with its members in declaration order.
///
/// Fields declared back to back are kept together; every other member is
/// separated from its neighbours by a blank line.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSpec {
    name: String,
    kind: ClassKind,
    javadoc: Option<String>,
    annotations: Vec<String>,
    visibility: Visibility,
    is_abstract: bool,
    is_static: bool,
    is_final: bool,
    type_params: Vec<String>,
    extends: Option<String>,
    implements: Vec<String>,
    members: Vec<Member>,
}

impl ClassSpec {
    /// A package-private class.
    pub fn new(kind: ClassKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            javadoc: None,
            annotations: Vec::new(),
            visibility: Visibility::PackagePrivate,
            is_abstract: false,
            is_static: false,
            is_final: false,
            type_params: Vec::new(),
            extends: None,
            implements: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(ClassKind::Class, name)
    }

    pub fn enum_(name: impl Into<String>) -> Self {
        Self::new(ClassKind::Enum, name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn javadoc(mut self, doc: impl Into<String>) -> Self {
        self.javadoc = Some(doc.into());
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
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

    pub fn type_param(mut self, param: impl Into<String>) -> Self {
        self.type_params.push(param.into());
        self
    }

    pub fn extends(mut self, ty: impl Into<String>) -> Self {
        self.extends = Some(ty.into());
        self
    }

    pub fn implements(mut self, ty: impl Into<String>) -> Self {
        self.implements.push(ty.into());
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.members.push(Member::Field(field));
        self
    }

    pub fn method(mut self, method: MethodSpec) -> Self {
        self.members.push(Member::Method(method));
        self
    }

    pub fn nested(mut self, class: ClassSpec) -> Self {
        self.members.push(Member::Type(class));
        self
    }

    pub fn enum_constants(mut self, constants: Vec<String>) -> Self {
        self.members.push(Member::EnumConstants(constants));
        self
    }

    /// Add a member in place, for callers assembling a class piecemeal.
    pub fn push(&mut self, member: Member) {
        self.members.push(member);
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Whether a method with this name has been added.
    pub fn has_method(&self, name: &str) -> bool {
        self.members
            .iter()
            .any(|m| matches!(m, Member::Method(method) if method.name() == name))
    }

    fn header(&self) -> String {
        let mut header = modifier_prefix(
            self.visibility,
            self.is_abstract,
            self.is_static,
            self.is_final,
        );
        header.push_str(self.kind.keyword());
        header.push(' ');
        header.push_str(&self.name);
        if !self.type_params.is_empty() {
            header.push_str(&format!("<{}>", self.type_params.join(", ")));
        }
        if let Some(extends) = &self.extends {
            header.push_str(&format!(" extends {}", extends));
        }
        if !self.implements.is_empty() {
            let keyword = match self.kind {
                ClassKind::Interface => "extends",
                _ => "implements",
            };
            header.push_str(&format!(" {} {}", keyword, self.implements.join(", ")));
        }
        header
    }

    fn body_fragments(&self) -> Vec<CodeFragment> {
        let mut body = Vec::new();
        let mut previous: Option<&Member> = None;
        for member in &self.members {
            if previous.is_some_and(|prev| !(prev.is_field() && member.is_field())) {
                body.push(CodeFragment::Blank);
            }
            body.extend(member.fragments());
            previous = Some(member);
        }
        body
    }
}

impl Renderable for ClassSpec {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.javadoc {
            fragments.push(CodeFragment::javadoc(doc));
        }
        fragments.extend(self.annotations.iter().map(CodeFragment::line));

        if self.members.is_empty() {
            fragments.push(CodeFragment::Line(format!("{} {{}}", self.header())));
        } else {
            fragments.push(CodeFragment::block(
                format!("{} {{", self.header()),
                self.body_fragments(),
                Some("}".to_string()),
            ));
        }
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CodeBuilder;

    fn render(class: &ClassSpec) -> String {
        let mut code = CodeBuilder::java();
        code.emit(class);
        code.build()
    }

    #[test]
    fn test_members_spacing() {
        let class = ClassSpec::class("Value")
            .visibility(Visibility::Private)
            .static_()
            .final_()
            .type_param("T")
            .extends("Item<T>")
            .field(FieldSpec::new("T", "first").final_())
            .field(FieldSpec::new("int", "count").final_())
            .method(
                MethodSpec::new("getCount")
                    .overriding()
                    .returns("int")
                    .body(|b| {
                        b.line("return count;");
                    }),
            );

        insta::assert_snapshot!(render(&class), @r"
        private static final class Value<T> extends Item<T> {
          private final T first;
          private final int count;

          @Override
          public int getCount() {
            return count;
          }
        }
        ");
    }

    #[test]
    fn test_enum_constants() {
        let property = ClassSpec::enum_("Property")
            .visibility(Visibility::Private)
            .enum_constants(vec!["NAME(\"name\")".into(), "AGE(\"age\")".into()])
            .field(FieldSpec::new("String", "name").final_());
        let rendered = render(&property);
        assert!(rendered.starts_with("private enum Property {\n  NAME(\"name\"),\n  AGE(\"age\");\n\n"));
        assert!(rendered.contains("  private final String name;\n"));
    }

    #[test]
    fn test_empty_class_and_interfaces() {
        let class = ClassSpec::class("Partial")
            .abstract_()
            .implements("Serializable")
            .implements("Comparable<Partial>");
        assert_eq!(
            render(&class),
            "abstract class Partial implements Serializable, Comparable<Partial> {}\n"
        );
        assert!(!class.has_method("build"));
    }
}
