//! Shared rendering state for one generated builder.

use freebuilder_codegen::java::{Body, TypeShortener};
use freebuilder_core::FeatureSet;
use freebuilder_model::{ClassName, PrimitiveKind, TypeRef};

use crate::analysis::{Property, TypeMetadata};

/// The view property code generators get of the class being generated.
pub struct SourceContext<'a> {
    pub metadata: &'a TypeMetadata,
    pub features: FeatureSet,
    pub types: &'a TypeShortener,
}

impl<'a> SourceContext<'a> {
    pub fn new(metadata: &'a TypeMetadata, features: FeatureSet, types: &'a TypeShortener) -> Self {
        Self {
            metadata,
            features,
            types,
        }
    }

    pub fn ty(&self, ty: &TypeRef) -> String {
        self.types.ty(ty)
    }

    pub fn class(&self, name: &ClassName) -> String {
        self.types.class(name)
    }

    /// A `java.util` class.
    pub fn util(&self, simple_name: &str) -> String {
        self.types.class(&ClassName::java_util(simple_name))
    }

    /// A `java.util.function` interface.
    pub fn function(&self, simple_name: &str) -> String {
        self.types
            .class(&ClassName::new("java.util.function", simple_name))
    }

    /// A Guava `com.google.common.collect` class.
    pub fn guava(&self, simple_name: &str) -> String {
        self.types.class(&ClassName::guava_collect(simple_name))
    }

    fn preconditions(&self) -> String {
        self.types
            .class(&ClassName::new("com.google.common.base", "Preconditions"))
    }

    /// `Person.Builder<T>`, the return type of chained setters.
    pub fn builder_ty(&self) -> String {
        self.ty(&self.metadata.builder_ref())
    }

    /// `Person_Builder<T>`.
    pub fn generated_ty(&self) -> String {
        self.ty(&self.metadata.generated_ref())
    }

    /// `Person<T>`.
    pub fn datatype_ty(&self) -> String {
        self.ty(&self.metadata.datatype_ref())
    }

    /// The statement ending every chained builder method.
    pub fn return_this(&self) -> String {
        if self.metadata.builder.is_some() {
            format!("return ({}) this;", self.builder_ty())
        } else {
            "return this;".to_string()
        }
    }

    /// The unset-tracking enum as written inside the generated class.
    ///
    /// `Value` and `Partial` inherit the datatype's member types, so a
    /// datatype member named `Property` forces the qualified form.
    pub fn property_enum(&self) -> String {
        if self.metadata.member_types.iter().any(|m| m == "Property") {
            format!("{}.Property", self.metadata.generated.simple_name())
        } else {
            "Property".to_string()
        }
    }

    /// `Property.NAME`.
    pub fn property_constant(&self, property: &Property) -> String {
        format!("{}.{}", self.property_enum(), property.all_caps_name)
    }

    /// `new ArrayList<>()` or, before Java 7, `new ArrayList<String>()`.
    ///
    /// `type_args` are only spelled out when the diamond is unavailable.
    pub fn new_instance(&self, class: &str, type_args: &[TypeRef], ctor_args: &str) -> String {
        if type_args.is_empty() {
            format!("new {}({})", class, ctor_args)
        } else if self.features.has_diamond() {
            format!("new {}<>({})", class, ctor_args)
        } else {
            format!(
                "new {}<{}>({})",
                class,
                self.types.type_list(type_args),
                ctor_args
            )
        }
    }

    /// Like [`new_instance`](Self::new_instance) but always explicit, for
    /// contexts without a target type (conditionals, receivers).
    pub fn new_explicit(&self, class: &str, type_args: &[TypeRef], ctor_args: &str) -> String {
        format!(
            "new {}<{}>({})",
            class,
            self.types.type_list(type_args),
            ctor_args
        )
    }

    /// Emit a null check on `var`, throwing `NullPointerException`.
    pub fn check_not_null(&self, body: &mut Body, var: &str) {
        if self.features.has_objects() {
            let objects = self.types.class(&ClassName::java_util("Objects"));
            body.line(format!("{}.requireNonNull({});", objects, var));
        } else if self.features.guava {
            body.line(format!("{}.checkNotNull({});", self.preconditions(), var));
        } else {
            body.if_block(format!("{} == null", var), |b| {
                b.line("throw new NullPointerException();");
            });
        }
    }

    /// Emit a check that `condition` holds, throwing
    /// `IllegalStateException` with `message` (a Java expression) if not.
    pub fn check_state(&self, body: &mut Body, condition: &str, message: &str) {
        if self.features.guava {
            body.line(format!(
                "{}.checkState({}, {});",
                self.preconditions(),
                condition,
                message
            ));
        } else {
            body.if_block(negate(condition), |b| {
                b.line(format!("throw new IllegalStateException({});", message));
            });
        }
    }

    /// `build()` failure when required properties are unset.
    pub fn check_all_set(&self, body: &mut Body) {
        if self.features.guava {
            body.line(format!(
                "{}.checkState(_unsetProperties.isEmpty(), \"Not set: %s\", _unsetProperties);",
                self.preconditions()
            ));
        } else {
            body.if_block("!_unsetProperties.isEmpty()", |b| {
                b.line("throw new IllegalStateException(\"Not set: \" + _unsetProperties);");
            });
        }
    }

    /// A Java boolean expression that is true when `a` and `b` differ.
    pub fn not_equal(&self, ty: &TypeRef, a: &str, b: &str) -> String {
        match ty {
            TypeRef::Primitive(PrimitiveKind::Float) => format!("Float.compare({}, {}) != 0", a, b),
            TypeRef::Primitive(PrimitiveKind::Double) => {
                format!("Double.compare({}, {}) != 0", a, b)
            }
            TypeRef::Primitive(_) => format!("{} != {}", a, b),
            _ if self.features.has_objects() => {
                format!("!{}.equals({}, {})", self.util("Objects"), a, b)
            }
            _ => format!("({} == null ? {} != null : !{}.equals({}))", a, b, a, b),
        }
    }

    /// A Java boolean expression that is true when `a` and `b` are equal.
    pub fn equal(&self, ty: &TypeRef, a: &str, b: &str) -> String {
        match ty {
            TypeRef::Primitive(PrimitiveKind::Float) => format!("Float.compare({}, {}) == 0", a, b),
            TypeRef::Primitive(PrimitiveKind::Double) => {
                format!("Double.compare({}, {}) == 0", a, b)
            }
            TypeRef::Primitive(_) => format!("{} == {}", a, b),
            _ if self.features.has_objects() => {
                format!("{}.equals({}, {})", self.util("Objects"), a, b)
            }
            _ => format!("({} == null ? {} == null : {}.equals({}))", a, b, a, b),
        }
    }

    /// The zero value a field of type `ty` starts with.
    pub fn zero_value(ty: &TypeRef) -> &'static str {
        match ty {
            TypeRef::Primitive(PrimitiveKind::Boolean) => "false",
            TypeRef::Primitive(_) => "0",
            _ => "null",
        }
    }
}

/// Logical negation with minimal parentheses.
fn negate(condition: &str) -> String {
    if let Some(inner) = condition.strip_prefix('!')
        && !inner.contains(' ')
    {
        inner.to_string()
    } else if condition.contains(' ') {
        format!("!({})", condition)
    } else {
        format!("!{}", condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negate() {
        assert_eq!(negate("!_unsetProperties.contains(Property.NAME)"), "_unsetProperties.contains(Property.NAME)");
        assert_eq!(negate("names.isEmpty()"), "!names.isEmpty()");
        assert_eq!(negate("a != null && b"), "!(a != null && b)");
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(SourceContext::zero_value(&TypeRef::boolean()), "false");
        assert_eq!(SourceContext::zero_value(&TypeRef::int()), "0");
        assert_eq!(SourceContext::zero_value(&TypeRef::string()), "null");
    }
}
