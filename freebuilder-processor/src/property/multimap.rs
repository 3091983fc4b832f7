//! Guava `SetMultimap` properties.

use freebuilder_codegen::java::{Body, FieldSpec, MethodSpec};
use freebuilder_model::{ClassName, TypeRef, Wildcard};

use super::{
    MapProperty, PropertyCodeGenerator, PropertyConfig, accessor_link, chained, consumer_of,
    iterable_of,
};
use crate::{analysis::Property, generator::SourceContext};

pub(super) fn detect(config: &PropertyConfig<'_>) -> Option<PropertyCodeGenerator> {
    if config.is_nullable || !config.features.guava {
        return None;
    }
    let classes = [
        ClassName::guava_collect("SetMultimap"),
        ClassName::guava_collect("ImmutableSetMultimap"),
    ];
    let args = config.type_args_of(&classes, 2)?;
    Some(PropertyCodeGenerator::SetMultimap(MapProperty {
        key: args[0].clone(),
        value: args[1].clone(),
        overridden_put: config.overrides("put", 2),
    }))
}

fn multimap_of(ctx: &SourceContext<'_>, m: &MapProperty) -> String {
    ctx.ty(&TypeRef::generic(
        ClassName::guava_collect("SetMultimap"),
        vec![m.key.clone(), m.value.clone()],
    ))
}

pub(super) fn fields(ctx: &SourceContext<'_>, p: &Property, m: &MapProperty) -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(multimap_of(ctx, m), &p.name)
            .final_()
            .init(format!("{}.create()", ctx.guava("LinkedHashMultimap"))),
    ]
}

pub(super) fn methods(ctx: &SourceContext<'_>, p: &Property, m: &MapProperty) -> Vec<MethodSpec> {
    let key = ctx.ty(&m.key);
    let value = ctx.ty(&m.value);
    let link = accessor_link(ctx, p);
    let mut methods = Vec::new();

    let mut put = Body::new();
    ctx.check_not_null(&mut put, "key");
    ctx.check_not_null(&mut put, "value");
    put.line(format!("this.{}.put(key, value);", p.name));
    put.line(ctx.return_this());
    methods.push(
        chained(ctx, p.method("put"))
            .javadoc(format!(
                "Adds a {{@code key}}-{{@code value}} mapping to the multimap to be returned from {}.\nIf the multimap already contains this mapping, then {{@code {}}} has no effect.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if either {{@code key}} or {{@code value}} are null",
                link,
                p.method("put")
            ))
            .param(&key, "key")
            .param(&value, "value")
            .with_body(put),
    );

    methods.push(
        chained(ctx, p.method("putAll"))
            .javadoc(format!(
                "Adds a collection of {{@code values}} with the same {{@code key}} to the multimap to be returned from {}, ignoring duplicate values.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if either {{@code key}}, {{@code values}} or any element of {{@code values}} is null",
                link
            ))
            .param(&key, "key")
            .param(iterable_of(ctx, &m.value), "values")
            .body(|b| {
                b.block(format!("for ({} value : values)", value), |b| {
                    b.line(format!("{}(key, value);", p.method("put")));
                });
                b.line(ctx.return_this());
            }),
    );

    let extends_key = TypeRef::Wildcard(Wildcard::Extends(Box::new(m.key.clone())));
    let extends_value = TypeRef::Wildcard(Wildcard::Extends(Box::new(m.value.clone())));
    let source = ctx.ty(&TypeRef::generic(
        ClassName::guava_collect("Multimap"),
        vec![extends_key.clone(), extends_value.clone()],
    ));
    let entry = ctx.ty(&TypeRef::generic(
        ClassName::java_util("Map").nested("Entry"),
        vec![extends_key, extends_value],
    ));
    methods.push(
        chained(ctx, p.method("putAll"))
            .javadoc(format!(
                "Adds each entry of {{@code multimap}} to the multimap to be returned from {}, ignoring duplicate entries.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code multimap}} is null or contains a null key or value",
                link
            ))
            .param(source, "multimap")
            .body(|b| {
                b.block(format!("for ({} entry : multimap.entries())", entry), |b| {
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
    ctx.check_not_null(&mut remove, "value");
    remove.line(format!("this.{}.remove(key, value);", p.name));
    remove.line(ctx.return_this());
    methods.push(
        chained(ctx, p.method("remove"))
            .javadoc(format!(
                "Removes a single key-value pair with the key {{@code key}} and the value {{@code value}} from the multimap to be returned from {}.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if either {{@code key}} or {{@code value}} are null",
                link
            ))
            .param(&key, "key")
            .param(&value, "value")
            .with_body(remove),
    );

    let mut remove_all = Body::new();
    ctx.check_not_null(&mut remove_all, "key");
    remove_all.line(format!("this.{}.removeAll(key);", p.name));
    remove_all.line(ctx.return_this());
    methods.push(
        chained(ctx, p.method("removeAll"))
            .javadoc(format!(
                "Removes all values associated with the key {{@code key}} from the multimap to be returned from {}.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code key}} is null",
                link
            ))
            .param(&key, "key")
            .with_body(remove_all),
    );

    if ctx.features.has_lambdas() {
        let mut mutate = Body::new();
        if m.overridden_put {
            mutate.line(format!(
                "mutator.accept(new CheckedSetMultimap<>(this.{}, this::{}));",
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
                    "Applies {{@code mutator}} to the multimap to be returned from {}.\n\n<p>This method mutates the multimap in-place. {{@code mutator}} is a void consumer, so any value returned from a lambda will be ignored.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code mutator}} is null",
                    link
                ))
                .param(consumer_of(ctx, &multimap_of(ctx, m)), "mutator")
                .with_body(mutate),
        );
    }

    methods.push(
        chained(ctx, p.method("clear"))
            .javadoc(format!(
                "Removes all of the mappings from the multimap to be returned from {}.\n\n@return this {{@code Builder}} object",
                link
            ))
            .body(|b| {
                b.line(format!("this.{}.clear();", p.name));
                b.line(ctx.return_this());
            }),
    );

    methods.push(
        MethodSpec::new(&p.builder_getter.name)
            .javadoc(format!(
                "Returns an unmodifiable view of the multimap that will be returned by {}.\nChanges to this builder will be reflected in the view.",
                link
            ))
            .visibility(p.builder_getter.visibility)
            .returns(multimap_of(ctx, m))
            .body(|b| {
                b.line(format!(
                    "return {}.unmodifiableSetMultimap(this.{});",
                    ctx.guava("Multimaps"),
                    p.name
                ));
            }),
    );

    methods
}

pub(super) fn merge_from_value(p: &Property, body: &mut Body) {
    body.line(format!("{}(value.{}());", p.method("putAll"), p.getter_name));
}
