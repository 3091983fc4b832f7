//! Single-valued properties: required, defaulted, nullable and generic.

use freebuilder_codegen::java::{Body, FieldSpec, MethodSpec};

use super::{PropertyCodeGenerator, accessor_link, chained};
use crate::{analysis::Property, generator::SourceContext};

fn annotated(ctx: &SourceContext<'_>, p: &Property, ty: String) -> String {
    let mut rendered: Vec<String> = p
        .nullable_annotations
        .iter()
        .map(|a| ctx.types.annotation(a))
        .collect();
    rendered.push(ty);
    rendered.join(" ")
}

pub(super) fn fields(ctx: &SourceContext<'_>, p: &Property) -> Vec<FieldSpec> {
    let mut field = FieldSpec::new(ctx.ty(&p.ty), &p.name);
    for annotation in &p.nullable_annotations {
        field = field.annotation(ctx.types.annotation(annotation));
    }
    vec![field]
}

pub(super) fn methods(
    ctx: &SourceContext<'_>,
    p: &Property,
    kind: &PropertyCodeGenerator,
) -> Vec<MethodSpec> {
    let mut methods = vec![setter(ctx, p, kind)];
    if ctx.features.has_lambdas() {
        methods.push(mapper(ctx, p, kind));
    }
    methods.push(getter(ctx, p, kind));
    methods
}

fn setter(ctx: &SourceContext<'_>, p: &Property, kind: &PropertyCodeGenerator) -> MethodSpec {
    let checks_null = !kind.is_nullable() && !p.ty.is_primitive();
    let mut doc = format!(
        "Sets the value to be returned by {}.\n\n@return this {{@code Builder}} object",
        accessor_link(ctx, p)
    );
    if checks_null {
        doc.push_str(&format!(
            "\n@throws NullPointerException if {{@code {}}} is null",
            p.name
        ));
    }

    let mut body = Body::new();
    if checks_null {
        ctx.check_not_null(&mut body, &p.name);
    }
    body.line(format!("this.{0} = {0};", p.name));
    if kind.is_tracked() {
        body.line(format!(
            "_unsetProperties.remove({});",
            ctx.property_constant(p)
        ));
    }
    body.line(ctx.return_this());

    chained(ctx, &p.setter.name)
        .javadoc(doc)
        .visibility(p.setter.visibility)
        .param(annotated(ctx, p, ctx.ty(&p.ty)), &p.name)
        .with_body(body)
}

/// `mapX(UnaryOperator<T> mapper)`.
///
/// The mapper is null-checked before the current value is read, so a null
/// mapper fails with `NullPointerException` even when the property is unset.
fn mapper(ctx: &SourceContext<'_>, p: &Property, kind: &PropertyCodeGenerator) -> MethodSpec {
    let operator = format!(
        "{}<{}>",
        ctx.function("UnaryOperator"),
        ctx.ty(&p.ty.boxed())
    );
    let getter = format!("{}()", p.builder_getter.name);

    let mut body = Body::new();
    body.line(format!("{}.requireNonNull(mapper);", ctx.util("Objects")));
    if kind.is_nullable() {
        body.if_block(format!("{} != null", getter), |b| {
            b.line(format!("{}(mapper.apply({}));", p.setter.name, getter));
        });
        body.line(ctx.return_this());
    } else {
        body.line(format!(
            "return {}(mapper.apply({}));",
            p.setter.name, getter
        ));
    }

    let mut doc = format!(
        "Replaces the value to be returned by {} by applying {{@code mapper}} to it and using the result.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code mapper}} is null",
        accessor_link(ctx, p)
    );
    if kind.is_tracked() {
        doc.push_str("\n@throws IllegalStateException if the field has not been set");
    }

    chained(ctx, p.method("map"))
        .javadoc(doc)
        .param(operator, "mapper")
        .with_body(body)
}

fn getter(ctx: &SourceContext<'_>, p: &Property, kind: &PropertyCodeGenerator) -> MethodSpec {
    let mut body = Body::new();
    if kind.is_tracked() {
        ctx.check_state(
            &mut body,
            &format!("!_unsetProperties.contains({})", ctx.property_constant(p)),
            &format!("\"{} not set\"", p.name),
        );
    }
    body.line(format!("return {};", p.name));

    let mut doc = format!("Returns the value that will be returned by {}.", accessor_link(ctx, p));
    if kind.is_tracked() {
        doc.push_str("\n\n@throws IllegalStateException if the field has not been set");
    }

    let mut method = MethodSpec::new(&p.builder_getter.name)
        .javadoc(doc)
        .visibility(p.builder_getter.visibility)
        .returns(ctx.ty(&p.ty))
        .with_body(body);
    for annotation in &p.nullable_annotations {
        method = method.annotation(ctx.types.annotation(annotation));
    }
    method
}

pub(super) fn merge_from_value(
    ctx: &SourceContext<'_>,
    p: &Property,
    kind: &PropertyCodeGenerator,
    body: &mut Body,
) {
    let source = format!("value.{}()", p.getter_name);
    match kind {
        PropertyCodeGenerator::Nullable => {
            body.if_block(format!("{} != null", source), |b| {
                b.line(format!("{}({});", p.setter.name, source));
            });
        }
        PropertyCodeGenerator::Defaulted if ctx.metadata.has_defaults_template() => {
            let differs = ctx.not_equal(&p.ty, &source, &format!("_defaults.{}", p.name));
            body.if_block(differs, |b| {
                b.line(format!("{}({});", p.setter.name, source));
            });
        }
        _ => {
            body.line(format!("{}({});", p.setter.name, source));
        }
    }
}

pub(super) fn merge_from_builder(
    ctx: &SourceContext<'_>,
    p: &Property,
    kind: &PropertyCodeGenerator,
    body: &mut Body,
) {
    let source = format!("base.{}", p.name);
    let set = format!("{}({});", p.setter.name, source);
    match kind {
        PropertyCodeGenerator::Nullable => {
            body.if_block(format!("{} != null", source), |b| {
                b.line(set);
            });
        }
        PropertyCodeGenerator::Defaulted if ctx.metadata.has_defaults_template() => {
            let differs = ctx.not_equal(&p.ty, &source, &format!("_defaults.{}", p.name));
            body.if_block(differs, |b| {
                b.line(set);
            });
        }
        PropertyCodeGenerator::Defaulted => {
            body.line(set);
        }
        _ => {
            body.if_block(
                format!(
                    "!base._unsetProperties.contains({})",
                    ctx.property_constant(p)
                ),
                |b| {
                    b.line(set);
                },
            );
        }
    }
}

pub(super) fn clear(ctx: &SourceContext<'_>, p: &Property, body: &mut Body) {
    if ctx.metadata.factory.is_some() {
        body.line(format!("this.{0} = _defaults.{0};", p.name));
    } else {
        body.line(format!(
            "this.{} = {};",
            p.name,
            SourceContext::zero_value(&p.ty)
        ));
    }
}

