//! Java type references.

use std::{collections::HashMap, fmt};

use crate::ClassName;

/// Java primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveKind {
    /// Parse a primitive keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "boolean" => Self::Boolean,
            "byte" => Self::Byte,
            "short" => Self::Short,
            "int" => Self::Int,
            "long" => Self::Long,
            "char" => Self::Char,
            "float" => Self::Float,
            "double" => Self::Double,
            _ => return None,
        })
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Char => "char",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// The `java.lang` wrapper class for this primitive.
    pub fn boxed(&self) -> ClassName {
        ClassName::java_lang(match self {
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Integer",
            Self::Long => "Long",
            Self::Char => "Character",
            Self::Float => "Float",
            Self::Double => "Double",
        })
    }

    /// Whether `==` is not a faithful equality for this primitive.
    pub fn is_floating_point(&self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }
}

/// Bound on a wildcard type argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Wildcard {
    /// `?`
    Unbounded,
    /// `? extends T`
    Extends(Box<TypeRef>),
    /// `? super T`
    Super(Box<TypeRef>),
}

/// A Java type as it appears in a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Primitive(PrimitiveKind),
    Void,
    /// A class or interface type with its (possibly empty) type arguments.
    Declared { name: ClassName, args: Vec<TypeRef> },
    /// A type variable, e.g. `T`.
    Variable(String),
    Array(Box<TypeRef>),
    Wildcard(Wildcard),
}

impl TypeRef {
    /// A declared type with no type arguments.
    pub fn class(name: ClassName) -> Self {
        Self::Declared {
            name,
            args: Vec::new(),
        }
    }

    /// A parameterized declared type.
    pub fn generic(name: ClassName, args: Vec<TypeRef>) -> Self {
        Self::Declared { name, args }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    pub fn array(component: TypeRef) -> Self {
        Self::Array(Box::new(component))
    }

    pub fn string() -> Self {
        Self::class(ClassName::java_lang("String"))
    }

    pub fn int() -> Self {
        Self::Primitive(PrimitiveKind::Int)
    }

    pub fn boolean() -> Self {
        Self::Primitive(PrimitiveKind::Boolean)
    }

    /// The class name of a declared type.
    pub fn class_name(&self) -> Option<&ClassName> {
        match self {
            Self::Declared { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The type arguments of a declared type (empty otherwise).
    pub fn type_args(&self) -> &[TypeRef] {
        match self {
            Self::Declared { args, .. } => args,
            _ => &[],
        }
    }

    /// Whether this is a declared type named `name` (ignoring arguments).
    pub fn is_class(&self, name: &ClassName) -> bool {
        self.class_name() == Some(name)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Primitive(PrimitiveKind::Boolean))
    }

    /// The reference type for this type: primitives are boxed, everything
    /// else is returned unchanged.
    pub fn boxed(&self) -> TypeRef {
        match self {
            Self::Primitive(kind) => Self::class(kind.boxed()),
            other => other.clone(),
        }
    }

    /// Whether any type variable occurs in this type.
    pub fn mentions_variables(&self) -> bool {
        match self {
            Self::Variable(_) => true,
            Self::Declared { args, .. } => args.iter().any(TypeRef::mentions_variables),
            Self::Array(component) => component.mentions_variables(),
            Self::Wildcard(Wildcard::Extends(bound) | Wildcard::Super(bound)) => {
                bound.mentions_variables()
            }
            Self::Wildcard(Wildcard::Unbounded) | Self::Primitive(_) | Self::Void => false,
        }
    }

    /// Whether the type is fully available at runtime (JLS §4.7).
    ///
    /// Generic varargs parameters are only safe for reifiable types.
    pub fn is_reifiable(&self) -> bool {
        match self {
            Self::Primitive(_) | Self::Void => true,
            Self::Variable(_) => false,
            Self::Declared { args, .. } => args
                .iter()
                .all(|arg| matches!(arg, Self::Wildcard(Wildcard::Unbounded))),
            Self::Array(component) => component.is_reifiable(),
            Self::Wildcard(_) => false,
        }
    }

    /// Replace type variables according to `bindings`. Unbound variables are
    /// left as they are.
    pub fn substitute(&self, bindings: &HashMap<String, TypeRef>) -> TypeRef {
        match self {
            Self::Variable(name) => bindings.get(name).cloned().unwrap_or_else(|| self.clone()),
            Self::Declared { name, args } => Self::Declared {
                name: name.clone(),
                args: args.iter().map(|a| a.substitute(bindings)).collect(),
            },
            Self::Array(component) => Self::Array(Box::new(component.substitute(bindings))),
            Self::Wildcard(Wildcard::Extends(bound)) => {
                Self::Wildcard(Wildcard::Extends(Box::new(bound.substitute(bindings))))
            }
            Self::Wildcard(Wildcard::Super(bound)) => {
                Self::Wildcard(Wildcard::Super(Box::new(bound.substitute(bindings))))
            }
            Self::Wildcard(Wildcard::Unbounded) | Self::Primitive(_) | Self::Void => self.clone(),
        }
    }

    /// The erasure of this type. Type variables erase to `Object`; callers
    /// needing bound-aware erasure substitute bounds first.
    pub fn erasure(&self) -> TypeRef {
        match self {
            Self::Declared { name, .. } => Self::class(name.clone()),
            Self::Variable(_) | Self::Wildcard(_) => Self::class(ClassName::java_lang("Object")),
            Self::Array(component) => Self::Array(Box::new(component.erasure())),
            Self::Primitive(_) | Self::Void => self.clone(),
        }
    }
}

/// Renders with fully-qualified names; generated source goes through the
/// import-aware renderer instead.
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => f.write_str(kind.keyword()),
            Self::Void => f.write_str("void"),
            Self::Declared { name, args } => {
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::Variable(name) => f.write_str(name),
            Self::Array(component) => write!(f, "{}[]", component),
            Self::Wildcard(Wildcard::Unbounded) => f.write_str("?"),
            Self::Wildcard(Wildcard::Extends(bound)) => write!(f, "? extends {}", bound),
            Self::Wildcard(Wildcard::Super(bound)) => write!(f, "? super {}", bound),
        }
    }
}
