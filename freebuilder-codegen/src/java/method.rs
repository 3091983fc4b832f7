//! Method and constructor declarations.

use freebuilder_model::Visibility;

use super::{Body, modifier_prefix};
use crate::builder::{CodeFragment, Renderable};

/// A method parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub ty: String,
    pub name: String,
    pub varargs: bool,
}

impl ParamSpec {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            varargs: false,
        }
    }

    /// A trailing `T... name` parameter.
    pub fn varargs(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            varargs: true,
            ..Self::new(ty, name)
        }
    }

    fn render(&self) -> String {
        if self.varargs {
            format!("{}... {}", self.ty, self.name)
        } else {
            format!("{} {}", self.ty, self.name)
        }
    }
}

/// A method, or a constructor when it has no return type.
///
/// Types are pre-rendered strings, normally produced by a
/// [`TypeShortener`](super::TypeShortener) so imports stay in sync.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSpec {
    name: String,
    javadoc: Option<String>,
    annotations: Vec<String>,
    visibility: Visibility,
    is_static: bool,
    is_final: bool,
    is_abstract: bool,
    type_params: Vec<String>,
    return_type: Option<String>,
    params: Vec<ParamSpec>,
    body: Body,
}

impl MethodSpec {
    /// A public method returning `void`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            javadoc: None,
            annotations: Vec::new(),
            visibility: Visibility::Public,
            is_static: false,
            is_final: false,
            is_abstract: false,
            type_params: Vec::new(),
            return_type: Some("void".to_string()),
            params: Vec::new(),
            body: Body::new(),
        }
    }

    /// A constructor for the class named `class_name`.
    pub fn constructor(class_name: impl Into<String>) -> Self {
        Self {
            return_type: None,
            ..Self::new(class_name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn javadoc(mut self, doc: impl Into<String>) -> Self {
        self.javadoc = Some(doc.into());
        self
    }

    /// Add an annotation, given with its leading `@`.
    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    /// Shorthand for `@Override`.
    pub fn overriding(self) -> Self {
        self.annotation("@Override")
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

    /// Mark as abstract; the body is dropped when rendering.
    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Declare a method type parameter, e.g. `E extends Comparable<E>`.
    pub fn type_param(mut self, param: impl Into<String>) -> Self {
        self.type_params.push(param.into());
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn param(mut self, ty: impl Into<String>, name: impl Into<String>) -> Self {
        self.params.push(ParamSpec::new(ty, name));
        self
    }

    pub fn varargs_param(mut self, ty: impl Into<String>, name: impl Into<String>) -> Self {
        self.params.push(ParamSpec::varargs(ty, name));
        self
    }

    /// Set the body from a closure.
    pub fn body(mut self, f: impl FnOnce(&mut Body)) -> Self {
        f(&mut self.body);
        self
    }

    /// Set the body from an already built statement list.
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    fn signature(&self) -> String {
        let mut signature = modifier_prefix(
            self.visibility,
            self.is_abstract,
            self.is_static,
            self.is_final,
        );
        if !self.type_params.is_empty() {
            signature.push_str(&format!("<{}> ", self.type_params.join(", ")));
        }
        if let Some(ret) = &self.return_type {
            signature.push_str(ret);
            signature.push(' ');
        }
        let params = self
            .params
            .iter()
            .map(ParamSpec::render)
            .collect::<Vec<_>>()
            .join(", ");
        signature.push_str(&format!("{}({})", self.name, params));
        signature
    }
}

impl Renderable for MethodSpec {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.javadoc {
            fragments.push(CodeFragment::javadoc(doc));
        }
        fragments.extend(self.annotations.iter().map(CodeFragment::line));

        let signature = self.signature();
        if self.is_abstract {
            fragments.push(CodeFragment::Line(format!("{};", signature)));
        } else if self.body.is_empty() {
            fragments.push(CodeFragment::Line(format!("{} {{}}", signature)));
        } else {
            fragments.push(CodeFragment::block(
                format!("{} {{", signature),
                self.body.to_fragments(),
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

    fn render(method: &MethodSpec) -> String {
        let mut code = CodeBuilder::java();
        code.emit(method);
        code.build()
    }

    #[test]
    fn test_setter() {
        let method = MethodSpec::new("setName")
            .javadoc("Sets the value to be returned by {@link Person#getName()}.")
            .returns("Person.Builder")
            .param("String", "name")
            .body(|b| {
                b.line("this.name = Objects.requireNonNull(name);");
                b.line("return (Person.Builder) this;");
            });

        insta::assert_snapshot!(render(&method), @r"
        /** Sets the value to be returned by {@link Person#getName()}. */
        public Person.Builder setName(String name) {
          this.name = Objects.requireNonNull(name);
          return (Person.Builder) this;
        }
        ");
    }

    #[test]
    fn test_generic_static_varargs() {
        let method = MethodSpec::new("of")
            .static_()
            .type_param("E")
            .returns("List<E>")
            .varargs_param("E", "elements")
            .body(|b| {
                b.line("return Arrays.asList(elements);");
            });
        assert!(render(&method).starts_with("public static <E> List<E> of(E... elements) {\n"));
    }

    #[test]
    fn test_constructor_and_empty_body() {
        let ctor = MethodSpec::constructor("Value").visibility(Visibility::Private);
        assert_eq!(render(&ctor), "private Value() {}\n");
    }

    #[test]
    fn test_abstract_method() {
        let method = MethodSpec::new("build")
            .abstract_()
            .returns("Person")
            .body(|b| {
                b.line("ignored();");
            });
        assert_eq!(render(&method), "public abstract Person build();\n");
    }

    #[test]
    fn test_package_private_override() {
        let method = MethodSpec::new("toString")
            .overriding()
            .visibility(Visibility::PackagePrivate)
            .returns("String")
            .body(|b| {
                b.line("return \"x\";");
            });
        assert_eq!(
            render(&method),
            "@Override\nString toString() {\n  return \"x\";\n}\n"
        );
    }
}
