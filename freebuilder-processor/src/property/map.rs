//! `Map` properties, kept in insertion order.

use freebuilder_codegen::java::{Body, FieldSpec, MethodSpec};
use freebuilder_model::{ClassName, TypeRef, Wildcard};

use super::{MapProperty, PropertyCodeGenerator, PropertyConfig, accessor_link, chained, consumer_of};
use crate::{analysis::Property, generator::SourceContext};

pub(super) fn detect(config: &PropertyConfig<'_>) -> Option<PropertyCodeGenerator> {
    if config.is_nullable {
        return None;
    }
    let mut classes = vec![ClassName::java_util("Map")];
    if config.features.guava {
        classes.push(ClassName::guava_collect("ImmutableMap"));
    }
    let args = config.type_args_of(&classes, 2)?;
    Some(PropertyCodeGenerator::Map(MapProperty {
        key: args[0].clone(),
        value: args[1].clone(),
        overridden_put: config.overrides("put", 2),
    }))
}

fn map_of(ctx: &SourceContext<'_>, m: &MapProperty) -> String {
    ctx.ty(&TypeRef::generic(
        ClassName::java_util("Map"),
        vec![m.key.clone(), m.value.clone()],
    ))
}

fn ensure_mutable(ctx: &SourceContext<'_>, p: &Property, m: &MapProperty, body: &mut Body) {
    if ctx.features.guava {
        let copy = ctx.new_instance(
            &ctx.util("LinkedHashMap"),
            &[m.key.clone(), m.value.clone()],
            &format!("this.{}", p.name),
        );
        body.if_block(
            format!("this.{} instanceof {}", p.name, ctx.guava("ImmutableMap")),
            |b| {
                b.line(format!("this.{} = {};", p.name, copy));
            },
        );
    }
}

pub(super) fn fields(ctx: &SourceContext<'_>, p: &Property, m: &MapProperty) -> Vec<FieldSpec> {
    let field = FieldSpec::new(map_of(ctx, m), &p.name);
    let field = if ctx.features.guava {
        field.init(format!("{}.of()", ctx.guava("ImmutableMap")))
    } else {
        field.final_().init(ctx.new_instance(
            &ctx.util("LinkedHashMap"),
            &[m.key.clone(), m.value.clone()],
            "",
        ))
    };
    vec![field]
}

pub(super) fn methods(ctx: &SourceContext<'_>, p: &Property, m: &MapProperty) -> Vec<MethodSpec> {
    let key = ctx.ty(&m.key);
    let value = ctx.ty(&m.value);
    let link = accessor_link(ctx, p);
    let mut methods = Vec::new();

    let mut put = Body::new();
    ctx.check_not_null(&mut put, "key");
    ctx.check_not_null(&mut put, "value");
    ensure_mutable(ctx, p, m, &mut put);
    put.line(format!("this.{}.put(key, value);", p.name));
    put.line(ctx.return_this());
    methods.push(
        chained(ctx, p.method("put"))
            .javadoc(format!(
                "Associates {{@code key}} with {{@code value}} in the map to be returned from {}.\nIf the map previously contained a mapping for the key, the old value is replaced by the specified value.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if either {{@code key}} or {{@code value}} are null",
                link
            ))
            .param(&key, "key")
            .param(&value, "value")
            .with_body(put),
    );

    let entry = ctx.ty(&TypeRef::generic(
        ClassName::java_util("Map").nested("Entry"),
        vec![
            TypeRef::Wildcard(Wildcard::Extends(Box::new(m.key.clone()))),
            TypeRef::Wildcard(Wildcard::Extends(Box::new(m.value.clone()))),
        ],
    ));
    let source = ctx.ty(&TypeRef::generic(
        ClassName::java_util("Map"),
        vec![
            TypeRef::Wildcard(Wildcard::Extends(Box::new(m.key.clone()))),
            TypeRef::Wildcard(Wildcard::Extends(Box::new(m.value.clone()))),
        ],
    ));
    methods.push(
        chained(ctx, p.method("putAll"))
            .javadoc(format!(
                "Copies all of the mappings from {{@code map}} to the map to be returned from {}.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code map}} is null or contains a null key or value",
                link
            ))
            .param(source, "map")
            .body(|b| {
                b.block(format!("for ({} entry : map.entrySet())", entry), |b| {
                    b.line(format!(
                        "{}(entry.getKey(), entry.getValue());",
                        p.method("put")
                    ));
                });
                b.line(ctx.return_this());
            }),
    );

    let mut remove = Body::new();
    ctx.check_not_null(&mut remove, "key");
    ensure_mutable(ctx, p, m, &mut remove);
    remove.line(format!("this.{}.remove(key);", p.name));
    remove.line(ctx.return_this());
    methods.push(
        chained(ctx, p.method("remove"))
            .javadoc(format!(
                "Removes the mapping for {{@code key}} from the map to be returned from {}, if one is present.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code key}} is null",
                link
            ))
            .param(&key, "key")
            .with_body(remove),
    );

    if ctx.features.has_lambdas() {
        let mut mutate = Body::new();
        ensure_mutable(ctx, p, m, &mut mutate);
        if m.overridden_put {
            mutate.line(format!(
                "mutator.accept(new CheckedMap<>(this.{}, this::{}));",
                p.name,
                p.method("put")
            ));
        } else {
            mutate.line(format!("mutator.accept(this.{});", p.name));
        }
        mutate.line(ctx.return_this());
        methods.push(
            chained(ctx, p.method("mutate"))
                .javadoc(format!(
                    "Invokes {{@code mutator}} with the map to be returned from {}.\n\n<p>This method mutates the map in-place. {{@code mutator}} is a void consumer, so any value returned from a lambda will be ignored.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code mutator}} is null",
                    link
                ))
                .param(consumer_of(ctx, &map_of(ctx, m)), "mutator")
                .with_body(mutate),
        );
    }

    let mut clear = Body::new();
    clear_body(ctx, p, &mut clear);
    clear.line(ctx.return_this());
    methods.push(
        chained(ctx, p.method("clear"))
            .javadoc(format!(
                "Removes all of the mappings from the map to be returned from {}.\n\n@return this {{@code Builder}} object",
                link
            ))
            .with_body(clear),
    );

    methods.push(
        MethodSpec::new(&p.builder_getter.name)
            .javadoc(format!(
                "Returns an unmodifiable view of the map that will be returned by {}.\nChanges to this builder will be reflected in the view.",
                link
            ))
            .visibility(p.builder_getter.visibility)
            .returns(map_of(ctx, m))
            .body(|b| {
                b.line(format!(
                    "return {}.unmodifiableMap(this.{});",
                    ctx.util("Collections"),
                    p.name
                ));
            }),
    );

    methods
}

pub(super) fn clear_body(ctx: &SourceContext<'_>, p: &Property, body: &mut Body) {
    if ctx.features.guava {
        let immutable = ctx.guava("ImmutableMap");
        body.if_else(
            format!("this.{} instanceof {}", p.name, immutable),
            |b| {
                b.line(format!("this.{} = {}.of();", p.name, immutable));
            },
            |b| {
                b.line(format!("this.{}.clear();", p.name));
            },
        );
    } else {
        body.line(format!("this.{}.clear();", p.name));
    }
}

pub(super) fn merge_from_value(
    ctx: &SourceContext<'_>,
    p: &Property,
    _m: &MapProperty,
    body: &mut Body,
) {
    let source = format!("value.{}()", p.getter_name);
    let put_all = format!("{}({});", p.method("putAll"), source);
    if ctx.features.guava {
        let immutable = ctx.guava("ImmutableMap");
        body.if_else(
            format!(
                "{} instanceof {} && this.{} instanceof {} && this.{}.isEmpty()",
                source, immutable, p.name, immutable, p.name
            ),
            |b| {
                b.line(format!("this.{} = {};", p.name, source));
            },
            |b| {
                b.line(put_all);
            },
        );
    } else {
        body.line(put_all);
    }
}

pub(super) fn finish(ctx: &SourceContext<'_>, p: &Property, m: &MapProperty) -> String {
    if ctx.features.guava {
        format!("{}.copyOf(builder.{})", ctx.guava("ImmutableMap"), p.name)
    } else {
        format!(
            "{}.unmodifiableMap({})",
            ctx.util("Collections"),
            ctx.new_explicit(
                &ctx.util("LinkedHashMap"),
                &[m.key.clone(), m.value.clone()],
                &format!("builder.{}", p.name)
            )
        )
    }
}
