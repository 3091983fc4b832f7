//! `List` properties.

use freebuilder_codegen::java::{Body, FieldSpec, MethodSpec};
use freebuilder_model::{ClassName, TypeRef};

use super::{
    CollectionProperty, PropertyCodeGenerator, PropertyConfig, accessor_link, chained,
    consumer_of, iterable_of,
};
use crate::{analysis::Property, generator::SourceContext};

pub(super) fn detect(config: &PropertyConfig<'_>) -> Option<PropertyCodeGenerator> {
    if config.is_nullable {
        return None;
    }
    let mut classes = vec![ClassName::java_util("List")];
    if config.features.guava {
        classes.push(ClassName::guava_collect("ImmutableList"));
    }
    let element = config.type_args_of(&classes, 1)?[0].clone();
    Some(PropertyCodeGenerator::List(CollectionProperty {
        overridden_add: config.overrides("add", 1),
        varargs: element.is_reifiable(),
        navigable: false,
        element,
    }))
}

fn list_of(ctx: &SourceContext<'_>, c: &CollectionProperty) -> String {
    ctx.ty(&TypeRef::generic(
        ClassName::java_util("List"),
        vec![c.element.clone()],
    ))
}

/// With Guava the backing list starts as an `ImmutableList` (possibly one
/// reused from a merged value) and is swapped for an `ArrayList` on the
/// first write or read.
fn ensure_mutable(ctx: &SourceContext<'_>, p: &Property, c: &CollectionProperty, body: &mut Body) {
    if ctx.features.guava {
        let copy = ctx.new_instance(&ctx.util("ArrayList"), &[c.element.clone()], &format!("this.{}", p.name));
        body.if_block(
            format!("this.{} instanceof {}", p.name, ctx.guava("ImmutableList")),
            |b| {
                b.line(format!("this.{} = {};", p.name, copy));
            },
        );
    }
}

pub(super) fn fields(ctx: &SourceContext<'_>, p: &Property, c: &CollectionProperty) -> Vec<FieldSpec> {
    let field = FieldSpec::new(list_of(ctx, c), &p.name);
    let field = if ctx.features.guava {
        field.init(format!("{}.of()", ctx.guava("ImmutableList")))
    } else {
        field
            .final_()
            .init(ctx.new_instance(&ctx.util("ArrayList"), &[c.element.clone()], ""))
    };
    vec![field]
}

pub(super) fn methods(ctx: &SourceContext<'_>, p: &Property, c: &CollectionProperty) -> Vec<MethodSpec> {
    let element = ctx.ty(&c.element);
    let link = accessor_link(ctx, p);
    let mut methods = Vec::new();

    let mut add = Body::new();
    ensure_mutable(ctx, p, c, &mut add);
    ctx.check_not_null(&mut add, "element");
    add.line(format!("this.{}.add(element);", p.name));
    add.line(ctx.return_this());
    methods.push(
        chained(ctx, p.method("add"))
            .javadoc(format!(
                "Adds {{@code element}} to the list to be returned from {}.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code element}} is null",
                link
            ))
            .param(&element, "element")
            .with_body(add),
    );

    if c.varargs {
        methods.push(
            chained(ctx, p.method("add"))
                .javadoc(format!(
                    "Adds each element of {{@code elements}} to the list to be returned from {}.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code elements}} is null or contains a null element",
                    link
                ))
                .varargs_param(&element, "elements")
                .body(|b| {
                    b.line(format!(
                        "return {}({}.asList(elements));",
                        p.method("addAll"),
                        ctx.util("Arrays")
                    ));
                }),
        );
    }

    let mut add_all = Body::new();
    add_all.if_block(
        format!("elements instanceof {}", ctx.util("Collection")),
        |b| {
            b.line(format!(
                "int elementsSize = (({}<?>) elements).size();",
                ctx.util("Collection")
            ));
            b.if_block("elementsSize != 0", |b| {
                ensure_mutable(ctx, p, c, b);
                b.line(format!(
                    "(({}<{}>) this.{}).ensureCapacity(this.{}.size() + elementsSize);",
                    ctx.util("ArrayList"),
                    element,
                    p.name,
                    p.name
                ));
            });
        },
    );
    add_all.block(format!("for ({} element : elements)", element), |b| {
        b.line(format!("{}(element);", p.method("add")));
    });
    add_all.line(ctx.return_this());
    methods.push(
        chained(ctx, p.method("addAll"))
            .javadoc(format!(
                "Adds each element of {{@code elements}} to the list to be returned from {}.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code elements}} is null or contains a null element",
                link
            ))
            .param(iterable_of(ctx, &c.element), "elements")
            .with_body(add_all),
    );

    if ctx.features.has_lambdas() {
        let mut mutate = Body::new();
        ensure_mutable(ctx, p, c, &mut mutate);
        if c.overridden_add {
            mutate.line(format!(
                "mutator.accept(new CheckedList<>(this.{}, this::{}));",
                p.name,
                p.method("add")
            ));
        } else {
            mutate.line(format!("mutator.accept(this.{});", p.name));
        }
        mutate.line(ctx.return_this());
        methods.push(
            chained(ctx, p.method("mutate"))
                .javadoc(format!(
                    "Applies {{@code mutator}} to the list to be returned from {}.\n\n<p>This method mutates the list in-place. {{@code mutator}} is a void consumer, so any value returned from a lambda will be ignored.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code mutator}} is null",
                    link
                ))
                .param(consumer_of(ctx, &list_of(ctx, c)), "mutator")
                .with_body(mutate),
        );
    }

    let mut clear = Body::new();
    clear_body(ctx, p, &mut clear);
    clear.line(ctx.return_this());
    methods.push(
        chained(ctx, p.method("clear"))
            .javadoc(format!(
                "Clears the list to be returned from {}.\n\n@return this {{@code Builder}} object",
                link
            ))
            .with_body(clear),
    );

    let mut get = Body::new();
    ensure_mutable(ctx, p, c, &mut get);
    get.line(format!(
        "return {}.unmodifiableList(this.{});",
        ctx.util("Collections"),
        p.name
    ));
    methods.push(
        MethodSpec::new(&p.builder_getter.name)
            .javadoc(format!(
                "Returns an unmodifiable view of the list that will be returned by {}.\nChanges to this builder will be reflected in the view.",
                link
            ))
            .visibility(p.builder_getter.visibility)
            .returns(list_of(ctx, c))
            .with_body(get),
    );

    methods
}

pub(super) fn clear_body(ctx: &SourceContext<'_>, p: &Property, body: &mut Body) {
    if ctx.features.guava {
        let immutable = ctx.guava("ImmutableList");
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
    _c: &CollectionProperty,
    body: &mut Body,
) {
    let source = format!("value.{}()", p.getter_name);
    let add_all = format!("{}({});", p.method("addAll"), source);
    if ctx.features.guava {
        let immutable = ctx.guava("ImmutableList");
        body.if_else(
            format!(
                "{} instanceof {} && this.{} instanceof {} && this.{}.isEmpty()",
                source, immutable, p.name, immutable, p.name
            ),
            |b| {
                b.line(format!("this.{} = {};", p.name, source));
            },
            |b| {
                b.line(add_all);
            },
        );
    } else {
        body.line(add_all);
    }
}

pub(super) fn finish(ctx: &SourceContext<'_>, p: &Property, c: &CollectionProperty) -> String {
    if ctx.features.guava {
        format!("{}.copyOf(builder.{})", ctx.guava("ImmutableList"), p.name)
    } else {
        format!(
            "{}.unmodifiableList({})",
            ctx.util("Collections"),
            ctx.new_explicit(
                &ctx.util("ArrayList"),
                &[c.element.clone()],
                &format!("builder.{}", p.name)
            )
        )
    }
}
