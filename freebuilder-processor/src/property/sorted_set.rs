//! `SortedSet` and `NavigableSet` properties.
//!
//! The backing set is created lazily so that a comparator can still be
//! installed with `setComparatorForX` until the first element arrives.

use freebuilder_codegen::java::{Body, FieldSpec, MethodSpec};
use freebuilder_model::{ClassName, TypeRef, Wildcard};

use super::{
    CollectionProperty, PropertyCodeGenerator, PropertyConfig, accessor_link, chained,
    consumer_of, iterable_of,
};
use crate::{analysis::Property, generator::SourceContext};

pub(super) fn detect(config: &PropertyConfig<'_>) -> Option<PropertyCodeGenerator> {
    if config.is_nullable {
        return None;
    }
    let mut classes = vec![ClassName::java_util("SortedSet")];
    if config.features.has_unmodifiable_navigable_set() {
        classes.push(ClassName::java_util("NavigableSet"));
    }
    if config.features.guava {
        classes.push(ClassName::guava_collect("ImmutableSortedSet"));
    }
    let element = config.type_args_of(&classes, 1)?[0].clone();
    let navigable = config.ty.is_class(&ClassName::java_util("NavigableSet"));
    Some(PropertyCodeGenerator::SortedSet(CollectionProperty {
        overridden_add: config.overrides("add", 1),
        varargs: element.is_reifiable(),
        navigable,
        element,
    }))
}

fn comparator_field(p: &Property) -> String {
    p.method("comparatorFor")
}

fn set_class(c: &CollectionProperty) -> &'static str {
    if c.navigable { "NavigableSet" } else { "SortedSet" }
}

/// `SortedSet<E>` or `NavigableSet<E>`, the field and getter type.
fn set_of(ctx: &SourceContext<'_>, c: &CollectionProperty) -> String {
    ctx.ty(&TypeRef::generic(
        ClassName::java_util(set_class(c)),
        vec![c.element.clone()],
    ))
}

/// `SortedSet<E>`, the type `mutateX` hands to its consumer.
fn sorted_set_of(ctx: &SourceContext<'_>, c: &CollectionProperty) -> String {
    ctx.ty(&TypeRef::generic(
        ClassName::java_util("SortedSet"),
        vec![c.element.clone()],
    ))
}

fn comparator_ty(ctx: &SourceContext<'_>, c: &CollectionProperty) -> String {
    ctx.ty(&TypeRef::generic(
        ClassName::java_util("Comparator"),
        vec![TypeRef::Wildcard(Wildcard::Super(Box::new(c.element.clone())))],
    ))
}

fn ensure_mutable(ctx: &SourceContext<'_>, p: &Property, c: &CollectionProperty, body: &mut Body) {
    let tree_set = ctx.util("TreeSet");
    if ctx.features.guava {
        let copy = ctx.new_instance(&tree_set, &[c.element.clone()], &format!("this.{}", p.name));
        body.if_block(
            format!("this.{} instanceof {}", p.name, ctx.guava("ImmutableSortedSet")),
            |b| {
                b.line(format!("this.{} = {};", p.name, copy));
            },
        );
    }
    let fresh = ctx.new_instance(
        &tree_set,
        &[c.element.clone()],
        &format!("this.{}", comparator_field(p)),
    );
    body.if_block(format!("this.{} == null", p.name), |b| {
        b.line(format!("this.{} = {};", p.name, fresh));
    });
}

pub(super) fn fields(ctx: &SourceContext<'_>, p: &Property, c: &CollectionProperty) -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(comparator_ty(ctx, c), comparator_field(p)),
        FieldSpec::new(set_of(ctx, c), &p.name),
    ]
}

pub(super) fn methods(ctx: &SourceContext<'_>, p: &Property, c: &CollectionProperty) -> Vec<MethodSpec> {
    let element = ctx.ty(&c.element);
    let link = accessor_link(ctx, p);
    let mut methods = Vec::new();

    let mut comparator = Body::new();
    ctx.check_not_null(&mut comparator, "comparator");
    ctx.check_state(
        &mut comparator,
        &format!("this.{} == null && this.{} == null", comparator_field(p), p.name),
        &format!("\"Comparator already set for {}\"", p.name),
    );
    comparator.line(format!("this.{} = comparator;", comparator_field(p)));
    comparator.line(ctx.return_this());
    methods.push(
        chained(ctx, p.method("setComparatorFor"))
            .javadoc(format!(
                "Sets the comparator of the set to be returned from {}.\n\n<p>Pass in {{@link java.util.Comparator#naturalOrder() naturalOrder()}} to restore the default ordering.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code comparator}} is null\n@throws IllegalStateException if the comparator has already been set, or elements have already been added",
                link
            ))
            .param(comparator_ty(ctx, c), "comparator")
            .with_body(comparator),
    );

    let mut add = Body::new();
    ctx.check_not_null(&mut add, "element");
    ensure_mutable(ctx, p, c, &mut add);
    add.line(format!("this.{}.add(element);", p.name));
    add.line(ctx.return_this());
    methods.push(
        chained(ctx, p.method("add"))
            .javadoc(format!(
                "Adds {{@code element}} to the set to be returned from {}.\nIf the set already contains {{@code element}}, then {{@code {}}}\nhas no effect (only the previously added element is retained).\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code element}} is null",
                link,
                p.method("add")
            ))
            .param(&element, "element")
            .with_body(add),
    );

    if c.varargs {
        methods.push(
            chained(ctx, p.method("add"))
                .javadoc(format!(
                    "Adds each element of {{@code elements}} to the set to be returned from {}, ignoring duplicate elements.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code elements}} is null or contains a null element",
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

    methods.push(
        chained(ctx, p.method("addAll"))
            .javadoc(format!(
                "Adds each element of {{@code elements}} to the set to be returned from {}, ignoring duplicate elements.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code elements}} is null or contains a null element",
                link
            ))
            .param(iterable_of(ctx, &c.element), "elements")
            .body(|b| {
                b.block(format!("for ({} element : elements)", element), |b| {
                    b.line(format!("{}(element);", p.method("add")));
                });
                b.line(ctx.return_this());
            }),
    );

    let mut remove = Body::new();
    ctx.check_not_null(&mut remove, "element");
    ensure_mutable(ctx, p, c, &mut remove);
    remove.line(format!("this.{}.remove(element);", p.name));
    remove.line(ctx.return_this());
    methods.push(
        chained(ctx, p.method("remove"))
            .javadoc(format!(
                "Removes {{@code element}} from the set to be returned from {}.\nDoes nothing if {{@code element}} is not present.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code element}} is null",
                link
            ))
            .param(&element, "element")
            .with_body(remove),
    );

    if ctx.features.has_lambdas() {
        let mut mutate = Body::new();
        ensure_mutable(ctx, p, c, &mut mutate);
        if c.overridden_add {
            mutate.line(format!(
                "mutator.accept(new CheckedSortedSet<>(this.{}, this::{}));",
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
                    "Applies {{@code mutator}} to the set to be returned from {}.\n\n<p>This method mutates the set in-place. {{@code mutator}} is a void consumer, so any value returned from a lambda will be ignored.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code mutator}} is null",
                    link
                ))
                .param(consumer_of(ctx, &sorted_set_of(ctx, c)), "mutator")
                .with_body(mutate),
        );
    }

    let mut clear = Body::new();
    clear_body(ctx, p, &mut clear);
    clear.line(ctx.return_this());
    methods.push(
        chained(ctx, p.method("clear"))
            .javadoc(format!(
                "Clears the set to be returned from {}.\nThe comparator is retained.\n\n@return this {{@code Builder}} object",
                link
            ))
            .with_body(clear),
    );

    let mut get = Body::new();
    ensure_mutable(ctx, p, c, &mut get);
    get.line(format!(
        "return {}.unmodifiable{}(this.{});",
        ctx.util("Collections"),
        set_class(c),
        p.name
    ));
    methods.push(
        MethodSpec::new(&p.builder_getter.name)
            .javadoc(format!(
                "Returns an unmodifiable view of the set that will be returned by {}.\nChanges to this builder will be reflected in the view.",
                link
            ))
            .visibility(p.builder_getter.visibility)
            .returns(set_of(ctx, c))
            .with_body(get),
    );

    methods
}

pub(super) fn clear_body(ctx: &SourceContext<'_>, p: &Property, body: &mut Body) {
    if ctx.features.guava {
        body.if_block(
            format!("this.{} instanceof {}", p.name, ctx.guava("ImmutableSortedSet")),
            |b| {
                b.line(format!("this.{} = null;", p.name));
            },
        );
    }
    body.if_block(format!("this.{} != null", p.name), |b| {
        b.line(format!("this.{}.clear();", p.name));
    });
}

/// With Guava an `ImmutableSortedSet` from the value is adopted as-is when
/// nothing has been added yet and its comparator matches the one the
/// builder would use.
pub(super) fn merge_from_value(
    ctx: &SourceContext<'_>,
    p: &Property,
    _c: &CollectionProperty,
    body: &mut Body,
) {
    let source = format!("value.{}()", p.getter_name);
    let add_all = format!("{}({});", p.method("addAll"), source);
    if ctx.features.guava {
        let comparator = comparator_field(p);
        let condition = format!(
            "this.{name} == null && {source} instanceof {immutable} && (this.{cmp} == null ? {ordering}.natural().equals({source}.comparator()) : this.{cmp}.equals({source}.comparator()))",
            name = p.name,
            source = source,
            immutable = ctx.guava("ImmutableSortedSet"),
            cmp = comparator,
            ordering = ctx.guava("Ordering"),
        );
        body.if_else(
            condition,
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

pub(super) fn merge_from_builder(p: &Property, body: &mut Body) {
    body.if_block(format!("base.{} != null", p.name), |b| {
        b.line(format!("{}(base.{});", p.method("addAll"), p.name));
    });
}

pub(super) fn finish(ctx: &SourceContext<'_>, p: &Property, c: &CollectionProperty) -> String {
    let tree_set = ctx.util("TreeSet");
    let empty = ctx.new_explicit(
        &tree_set,
        &[c.element.clone()],
        &format!("builder.{}", comparator_field(p)),
    );
    if ctx.features.guava {
        format!(
            "{}.copyOfSorted(builder.{name} == null ? {empty} : builder.{name})",
            ctx.guava("ImmutableSortedSet"),
            name = p.name,
            empty = empty,
        )
    } else {
        let copy = ctx.new_explicit(&tree_set, &[c.element.clone()], &format!("builder.{}", p.name));
        format!(
            "{}.unmodifiable{}(builder.{} == null ? {} : {})",
            ctx.util("Collections"),
            set_class(c),
            p.name,
            empty,
            copy
        )
    }
}
