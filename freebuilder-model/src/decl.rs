//! Declarations: types, methods, constructors and annotations.

use std::collections::HashMap;

use crate::{ClassName, TypeRef};

/// Java access levels, ordered from most to least restrictive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Visibility {
    Private,
    #[default]
    PackagePrivate,
    Protected,
    Public,
}

impl Visibility {
    /// The source keyword, empty for package-private.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::PackagePrivate => "",
            Self::Protected => "protected",
            Self::Public => "public",
        }
    }

    /// Visible to a class in the same package.
    pub fn is_visible_in_package(&self) -> bool {
        !matches!(self, Self::Private)
    }
}

/// Modifiers shared by types and methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_abstract: bool,
    pub is_static: bool,
    pub is_final: bool,
    /// An interface `default` method.
    pub is_default: bool,
}

impl Modifiers {
    pub fn public() -> Self {
        Self {
            visibility: Visibility::Public,
            ..Self::default()
        }
    }

    pub fn public_abstract() -> Self {
        Self {
            visibility: Visibility::Public,
            is_abstract: true,
            ..Self::default()
        }
    }
}

/// The kind of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
}

/// A declared type parameter with its bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
    pub name: String,
    pub bounds: Vec<TypeRef>,
}

impl TypeParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    pub fn bound(mut self, bound: TypeRef) -> Self {
        self.bounds.push(bound);
        self
    }
}

/// An annotation usage. Arguments are kept as source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub name: ClassName,
    pub args: Option<String>,
}

impl Annotation {
    pub fn new(name: ClassName) -> Self {
        Self { name, args: None }
    }

    pub fn with_args(name: ClassName, args: impl Into<String>) -> Self {
        Self {
            name,
            args: Some(args.into()),
        }
    }
}

/// A method declared directly on a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: String,
    pub params: Vec<TypeRef>,
    pub return_type: TypeRef,
    pub modifiers: Modifiers,
    /// Annotations on the method or its return type.
    pub annotations: Vec<Annotation>,
}

impl MethodDecl {
    /// A public abstract no-argument method, the shape of a property accessor.
    pub fn accessor(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type,
            modifiers: Modifiers::public_abstract(),
            annotations: Vec::new(),
        }
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static
    }

    pub fn visibility(&self) -> Visibility {
        self.modifiers.visibility
    }

    /// Whether an annotation with the given simple name is present,
    /// regardless of its package.
    pub fn has_annotation_named(&self, simple_name: &str) -> bool {
        self.annotations
            .iter()
            .any(|a| a.name.simple_name() == simple_name)
    }

    /// Apply type-variable bindings to the signature.
    pub fn substitute(&self, bindings: &HashMap<String, TypeRef>) -> MethodDecl {
        MethodDecl {
            params: self.params.iter().map(|p| p.substitute(bindings)).collect(),
            return_type: self.return_type.substitute(bindings),
            ..self.clone()
        }
    }
}

/// A constructor declared on a class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConstructorDecl {
    pub visibility: Visibility,
    pub params: Vec<TypeRef>,
    /// Methods of the same instance invoked by the constructor body, as
    /// reported by the host. Builder constructors calling a property setter
    /// give that property a default.
    pub calls: Vec<String>,
}

/// A class, interface or enum declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: ClassName,
    pub kind: TypeKind,
    pub modifiers: Modifiers,
    pub type_params: Vec<TypeParam>,
    pub superclass: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    pub methods: Vec<MethodDecl>,
    pub constructors: Vec<ConstructorDecl>,
    pub annotations: Vec<Annotation>,
    /// Simple names of member types declared inside this type.
    pub member_types: Vec<String>,
}

impl TypeDecl {
    /// A new declaration with no members.
    pub fn new(name: ClassName, kind: TypeKind) -> Self {
        Self {
            name,
            kind,
            modifiers: Modifiers::public(),
            type_params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            annotations: Vec::new(),
            member_types: Vec::new(),
        }
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn is_abstract_class(&self) -> bool {
        self.kind == TypeKind::Class && self.modifiers.is_abstract
    }

    /// Whether the declaration carries an annotation of exactly this class.
    pub fn has_annotation(&self, name: &ClassName) -> bool {
        self.annotations.iter().any(|a| &a.name == name)
    }

    pub fn annotation(&self, name: &ClassName) -> Option<&Annotation> {
        self.annotations.iter().find(|a| &a.name == name)
    }

    /// The type as seen from inside its own declaration: its class name
    /// parameterized by its own type variables.
    pub fn self_type(&self) -> TypeRef {
        TypeRef::generic(
            self.name.clone(),
            self.type_params
                .iter()
                .map(|p| TypeRef::variable(&p.name))
                .collect(),
        )
    }

    /// Direct supertypes: superclass first, then interfaces.
    pub fn supertypes(&self) -> impl Iterator<Item = &TypeRef> {
        self.superclass.iter().chain(self.interfaces.iter())
    }

    /// Bind this declaration's type parameters to the arguments of
    /// `usage`. Raw usages bind nothing.
    pub fn bindings_for(&self, usage: &TypeRef) -> HashMap<String, TypeRef> {
        let args = usage.type_args();
        if args.len() != self.type_params.len() {
            return HashMap::new();
        }
        self.type_params
            .iter()
            .map(|p| p.name.clone())
            .zip(args.iter().cloned())
            .collect()
    }

    /// Constructors, including the implicit default constructor a class
    /// gets when it declares none.
    pub fn effective_constructors(&self) -> Vec<ConstructorDecl> {
        if self.constructors.is_empty() && self.kind == TypeKind::Class {
            return vec![ConstructorDecl {
                visibility: self.modifiers.visibility,
                ..ConstructorDecl::default()
            }];
        }
        self.constructors.clone()
    }

    /// The zero-argument constructor, if any.
    pub fn no_args_constructor(&self) -> Option<ConstructorDecl> {
        self.effective_constructors()
            .into_iter()
            .find(|c| c.params.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_order() {
        assert!(Visibility::Public > Visibility::Protected);
        assert!(Visibility::Protected > Visibility::PackagePrivate);
        assert!(Visibility::PackagePrivate > Visibility::Private);
        assert!(!Visibility::Private.is_visible_in_package());
    }

    #[test]
    fn test_bindings_for_parameterized_usage() {
        let mut decl = TypeDecl::new(ClassName::new("com.example", "Base"), TypeKind::Interface);
        decl.type_params.push(TypeParam::new("E"));

        let usage = TypeRef::generic(decl.name.clone(), vec![TypeRef::string()]);
        let bindings = decl.bindings_for(&usage);
        assert_eq!(bindings.get("E"), Some(&TypeRef::string()));

        let raw = TypeRef::class(decl.name.clone());
        assert!(decl.bindings_for(&raw).is_empty());
    }

    #[test]
    fn test_implicit_constructor() {
        let decl = TypeDecl::new(ClassName::new("com.example", "Builder"), TypeKind::Class);
        let ctor = decl.no_args_constructor().expect("implicit constructor");
        assert_eq!(ctor.visibility, Visibility::Public);

        let iface = TypeDecl::new(ClassName::new("com.example", "Api"), TypeKind::Interface);
        assert!(iface.no_args_constructor().is_none());
    }

    #[test]
    fn test_annotation_by_simple_name() {
        let mut method = MethodDecl::accessor("getName", TypeRef::string());
        method.annotations.push(Annotation::new(ClassName::new(
            "org.checkerframework.checker.nullness.qual",
            "Nullable",
        )));
        assert!(method.has_annotation_named("Nullable"));
        assert!(!method.has_annotation_named("NonNull"));
    }
}
