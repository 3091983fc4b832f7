//! The immutable `Value` and `Partial` implementations nested in the
//! generated builder.

use freebuilder_codegen::java::{Body, ClassSpec, FieldSpec, MethodSpec};
use freebuilder_model::{ClassName, TypeRef, Visibility};

use super::{SourceContext, type_param_decls};
use crate::{
    analysis::Property,
    property::{Finish, PropertyCodeGenerator},
};

/// Which of the two implementations is being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flavour {
    Value,
    Partial,
}

impl Flavour {
    fn class_name(&self) -> &'static str {
        match self {
            Self::Value => "Value",
            Self::Partial => "Partial",
        }
    }

    fn finish(&self) -> Finish {
        match self {
            Self::Value => Finish::Build,
            Self::Partial => Finish::BuildPartial,
        }
    }

    /// Whether the class carries its own copy of the unset set.
    fn tracks_unset(&self, ctx: &SourceContext<'_>) -> bool {
        *self == Self::Partial && ctx.metadata.has_tracked_properties()
    }
}

pub(super) fn value_class(ctx: &SourceContext<'_>, flavour: Flavour) -> ClassSpec {
    let metadata = ctx.metadata;
    let name = flavour.class_name();

    let mut class = ClassSpec::class(name)
        .visibility(Visibility::Private)
        .static_()
        .final_();
    for param in type_param_decls(ctx) {
        class = class.type_param(param);
    }
    class = if metadata.is_interface {
        class.implements(ctx.datatype_ty())
    } else {
        class.extends(ctx.datatype_ty())
    };
    if flavour == Flavour::Value {
        for annotation in &metadata.passthrough_annotations {
            class = class.annotation(format!(
                "@{}(serializable = true)",
                ctx.class(&annotation.name)
            ));
        }
    }

    for p in &metadata.properties {
        let mut field = FieldSpec::new(ctx.ty(&p.ty), &p.name).final_();
        for annotation in &p.nullable_annotations {
            field = field.annotation(ctx.types.annotation(annotation));
        }
        class = class.field(field);
    }
    let unset_ty = format!("{}<{}>", ctx.util("EnumSet"), ctx.property_enum());
    if flavour.tracks_unset(ctx) {
        class = class.field(FieldSpec::new(&unset_ty, "_unsetProperties").final_());
    }

    let mut ctor = Body::new();
    for p in &metadata.properties {
        ctor.line(format!(
            "this.{} = {};",
            p.name,
            p.code_generator.finish(ctx, p, flavour.finish())
        ));
    }
    if flavour.tracks_unset(ctx) {
        ctor.line("this._unsetProperties = builder._unsetProperties.clone();");
    }
    class = class.method(
        MethodSpec::constructor(name)
            .visibility(Visibility::PackagePrivate)
            .param(ctx.generated_ty(), "builder")
            .with_body(ctor),
    );

    for p in &metadata.properties {
        class = class.method(accessor(ctx, p, flavour));
    }

    let standard = metadata.standard_methods;
    if standard.equals {
        class = class.method(equals(ctx, flavour));
    }
    if standard.hash_code {
        class = class.method(hash_code(ctx, flavour));
    }
    if standard.to_string {
        class = class.method(to_string(ctx, flavour));
    }
    class
}

fn accessor(ctx: &SourceContext<'_>, p: &Property, flavour: Flavour) -> MethodSpec {
    let mut body = Body::new();
    if flavour == Flavour::Partial && p.code_generator.is_tracked() {
        body.if_block(
            format!("_unsetProperties.contains({})", ctx.property_constant(p)),
            |b| {
                b.line(format!(
                    "throw new UnsupportedOperationException(\"{} not set\");",
                    p.name
                ));
            },
        );
    }
    body.line(format!("return {};", p.name));

    let mut method = MethodSpec::new(&p.getter_name)
        .overriding()
        .visibility(p.accessor_visibility)
        .returns(ctx.ty(&p.ty))
        .with_body(body);
    for annotation in &p.nullable_annotations {
        method = method.annotation(ctx.types.annotation(annotation));
    }
    method
}

/// Type of the cast target in `equals`: `Value` or `Value<?>`.
fn wildcard_self(ctx: &SourceContext<'_>, flavour: Flavour) -> String {
    let params = ctx.metadata.type_params.len();
    if params == 0 {
        flavour.class_name().to_string()
    } else {
        format!("{}<{}>", flavour.class_name(), vec!["?"; params].join(", "))
    }
}

fn field_equal(ctx: &SourceContext<'_>, p: &Property) -> String {
    let a = format!("this.{}", p.name);
    let b = format!("other.{}", p.name);
    match &p.ty {
        TypeRef::Array(_) => format!("{}.equals({}, {})", ctx.util("Arrays"), a, b),
        ty => ctx.equal(ty, &a, &b),
    }
}

fn equals(ctx: &SourceContext<'_>, flavour: Flavour) -> MethodSpec {
    // Unset fields of a Partial still hold the value a fresh builder gave
    // them, so comparing every field alongside _unsetProperties is exact.
    let mut terms: Vec<String> = ctx
        .metadata
        .properties
        .iter()
        .map(|p| field_equal(ctx, p))
        .collect();
    if flavour.tracks_unset(ctx) {
        terms.push(ctx.equal(
            &TypeRef::class(ClassName::java_util("EnumSet")),
            "this._unsetProperties",
            "other._unsetProperties",
        ));
    }

    let mut body = Body::new();
    body.if_block(format!("!(obj instanceof {})", flavour.class_name()), |b| {
        b.line("return false;");
    });
    if terms.is_empty() {
        body.line("return true;");
    } else {
        let other = wildcard_self(ctx, flavour);
        body.line(format!("{0} other = ({0}) obj;", other));
        body.line(format!("return {};", terms.join(" && ")));
    }

    MethodSpec::new("equals")
        .overriding()
        .returns("boolean")
        .param("Object", "obj")
        .with_body(body)
}

fn hash_code(ctx: &SourceContext<'_>, flavour: Flavour) -> MethodSpec {
    let mut values: Vec<String> = ctx
        .metadata
        .properties
        .iter()
        .map(|p| match &p.ty {
            TypeRef::Array(_) => format!("{}.hashCode(this.{})", ctx.util("Arrays"), p.name),
            _ => format!("this.{}", p.name),
        })
        .collect();
    if flavour.tracks_unset(ctx) {
        values.push("this._unsetProperties".to_string());
    }

    let expr = if ctx.features.has_objects() {
        format!("{}.hash({})", ctx.util("Objects"), values.join(", "))
    } else {
        format!(
            "{}.hashCode(new Object[] {{{}}})",
            ctx.util("Arrays"),
            values.join(", ")
        )
    };
    MethodSpec::new("hashCode")
        .overriding()
        .returns("int")
        .body(|b| {
            b.line(format!("return {};", expr));
        })
}

/// How a property's value is rendered into the string.
fn display(ctx: &SourceContext<'_>, p: &Property) -> String {
    match &p.ty {
        TypeRef::Array(_) => format!("{}.toString(this.{})", ctx.util("Arrays"), p.name),
        _ => format!("this.{}", p.name),
    }
}

/// The condition under which a property is printed, if it may be omitted.
fn print_condition(ctx: &SourceContext<'_>, p: &Property, flavour: Flavour) -> Option<String> {
    match p.code_generator {
        PropertyCodeGenerator::Nullable => Some(format!("this.{} != null", p.name)),
        _ if flavour == Flavour::Partial && p.code_generator.is_tracked() => Some(format!(
            "!_unsetProperties.contains({})",
            ctx.property_constant(p)
        )),
        _ => None,
    }
}

/// `Person{name=Alice, age=42}`; `Partial` is prefixed with `partial ` and
/// leaves out unset properties, and absent nullable properties are always
/// left out.
fn to_string(ctx: &SourceContext<'_>, flavour: Flavour) -> MethodSpec {
    let metadata = ctx.metadata;
    let prefix = match flavour {
        Flavour::Value => String::new(),
        Flavour::Partial => "partial ".to_string(),
    };
    let opening = format!("{}{}{{", prefix, metadata.datatype.simple_name());
    let conditions: Vec<Option<String>> = metadata
        .properties
        .iter()
        .map(|p| print_condition(ctx, p, flavour))
        .collect();

    let mut body = Body::new();
    if conditions.iter().all(Option::is_none) {
        if metadata.properties.is_empty() {
            body.line(format!("return \"{}}}\";", opening));
        } else {
            let mut expr = String::new();
            for (i, p) in metadata.properties.iter().enumerate() {
                let separator = if i == 0 { opening.as_str() } else { ", " };
                expr.push_str(&format!("\"{}{}=\" + {} + ", separator, p.name, display(ctx, p)));
            }
            body.line(format!("return {}\"}}\";", expr));
        }
    } else {
        body.line(format!(
            "StringBuilder result = new StringBuilder(\"{}\");",
            opening
        ));
        body.line("String separator = \"\";");
        for (p, condition) in metadata.properties.iter().zip(&conditions) {
            let append = |b: &mut Body| {
                b.line(format!(
                    "result.append(separator).append(\"{}=\").append({});",
                    p.name,
                    display(ctx, p)
                ));
                b.line("separator = \", \";");
            };
            match condition {
                Some(condition) => {
                    body.if_block(condition, append);
                }
                None => append(&mut body),
            }
        }
        body.line("return result.append(\"}\").toString();");
    }

    MethodSpec::new("toString")
        .overriding()
        .returns("String")
        .with_body(body)
}
