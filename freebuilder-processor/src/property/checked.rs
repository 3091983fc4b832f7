//! Private collection wrappers routing writes through the builder.
//!
//! When the user's builder overrides `addX` or `putX` (typically to
//! validate), `mutateX` hands the mutator one of these views so that
//! every element added inside the lambda still passes through the
//! override.

use freebuilder_codegen::java::{Body, ClassSpec, FieldSpec, MethodSpec};
use freebuilder_model::{ClassName, Visibility};

use crate::generator::SourceContext;

/// A wrapper class emitted at most once per generated builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckedHelper {
    List,
    Set,
    SortedSet,
    Map,
    SetMultimap,
}

impl CheckedHelper {
    pub const ALL: [CheckedHelper; 5] = [
        Self::List,
        Self::Set,
        Self::SortedSet,
        Self::Map,
        Self::SetMultimap,
    ];

    /// The simple name of the generated nested class.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::List => "CheckedList",
            Self::Set => "CheckedSet",
            Self::SortedSet => "CheckedSortedSet",
            Self::Map => "CheckedMap",
            Self::SetMultimap => "CheckedSetMultimap",
        }
    }

    /// The nested class declaration.
    pub fn spec(&self, ctx: &SourceContext<'_>) -> ClassSpec {
        match self {
            Self::List => checked_list(ctx),
            Self::Set => checked_set(ctx),
            Self::SortedSet => checked_sorted_set(ctx),
            Self::Map => checked_map(ctx),
            Self::SetMultimap => checked_set_multimap(ctx),
        }
    }
}

fn helper(name: &str) -> ClassSpec {
    ClassSpec::class(name)
        .visibility(Visibility::Private)
        .static_()
}

fn final_field(ty: impl Into<String>, name: &str) -> FieldSpec {
    FieldSpec::new(ty, name).final_()
}

/// A package-private constructor assigning each parameter to the field of
/// the same name.
fn constructor(class: &str, params: &[(&str, &str)]) -> MethodSpec {
    let mut ctor = MethodSpec::constructor(class).visibility(Visibility::PackagePrivate);
    let mut body = Body::new();
    for (ty, name) in params {
        ctor = ctor.param(*ty, *name);
        body.line(format!("this.{0} = {0};", name));
    }
    ctor.with_body(body)
}

/// `@Override public <returns> <name>(<params>) { return <expr>; }`
fn forwarding(returns: &str, name: &str, params: &[(&str, &str)], expr: &str) -> MethodSpec {
    let mut method = MethodSpec::new(name).overriding().returns(returns);
    for (ty, param) in params {
        method = method.param(*ty, *param);
    }
    method.body(|b| {
        if returns == "void" {
            b.line(format!("{};", expr));
        } else {
            b.line(format!("return {};", expr));
        }
    })
}

fn map_entry(ctx: &SourceContext<'_>) -> String {
    ctx.class(&ClassName::java_util("Map").nested("Entry"))
}

fn checked_list(ctx: &SourceContext<'_>) -> ClassSpec {
    let list = format!("{}<E>", ctx.util("List"));
    let consumer = format!("{}<E>", ctx.function("Consumer"));
    helper("CheckedList")
        .type_param("E")
        .extends(format!("{}<E>", ctx.util("AbstractList")))
        .field(final_field(&list, "list"))
        .field(final_field(&consumer, "add"))
        .method(constructor("CheckedList", &[(&list, "list"), (&consumer, "add")]))
        .method(forwarding("int", "size", &[], "list.size()"))
        .method(forwarding("E", "get", &[("int", "index")], "list.get(index)"))
        .method(
            MethodSpec::new("set")
                .overriding()
                .returns("E")
                .param("int", "index")
                .param("E", "e")
                .body(|b| {
                    b.line("add.accept(e);");
                    b.line("return list.set(index, list.remove(list.size() - 1));");
                }),
        )
        .method(
            MethodSpec::new("add")
                .overriding()
                .param("int", "index")
                .param("E", "e")
                .body(|b| {
                    b.line("add.accept(e);");
                    b.if_block("index < list.size() - 1", |b| {
                        b.line("list.add(index, list.remove(list.size() - 1));");
                    });
                }),
        )
        .method(forwarding("E", "remove", &[("int", "index")], "list.remove(index)"))
        .method(forwarding("void", "clear", &[], "list.clear()"))
}

fn checked_set(ctx: &SourceContext<'_>) -> ClassSpec {
    let set = format!("{}<E>", ctx.util("Set"));
    let consumer = format!("{}<E>", ctx.function("Consumer"));
    helper("CheckedSet")
        .type_param("E")
        .extends(format!("{}<E>", ctx.util("AbstractSet")))
        .field(final_field(&set, "set"))
        .field(final_field(&consumer, "add"))
        .method(constructor("CheckedSet", &[(&set, "set"), (&consumer, "add")]))
        .method(forwarding(
            &format!("{}<E>", ctx.util("Iterator")),
            "iterator",
            &[],
            "set.iterator()",
        ))
        .method(forwarding("int", "size", &[], "set.size()"))
        .method(forwarding("boolean", "contains", &[("Object", "e")], "set.contains(e)"))
        .method(
            MethodSpec::new("add")
                .overriding()
                .returns("boolean")
                .param("E", "e")
                .body(|b| {
                    b.line("int oldSize = set.size();");
                    b.line("add.accept(e);");
                    b.line("return oldSize != set.size();");
                }),
        )
        .method(forwarding("boolean", "remove", &[("Object", "e")], "set.remove(e)"))
        .method(forwarding("void", "clear", &[], "set.clear()"))
}

/// Views returned by `subSet`, `headSet` and `tailSet` stay checked.
fn checked_sorted_set(ctx: &SourceContext<'_>) -> ClassSpec {
    let sorted_set = format!("{}<E>", ctx.util("SortedSet"));
    let consumer = format!("{}<E>", ctx.function("Consumer"));
    let comparator = format!("{}<? super E>", ctx.util("Comparator"));
    let ctor = MethodSpec::constructor("CheckedSortedSet")
        .visibility(Visibility::PackagePrivate)
        .param(&sorted_set, "set")
        .param(&consumer, "add")
        .body(|b| {
            b.line("super(set, add);");
            b.line("this.set = set;");
            b.line("this.add = add;");
        });
    helper("CheckedSortedSet")
        .type_param("E")
        .extends("CheckedSet<E>")
        .implements(&sorted_set)
        .field(final_field(&sorted_set, "set"))
        .field(final_field(&consumer, "add"))
        .method(ctor)
        .method(forwarding(&comparator, "comparator", &[], "set.comparator()"))
        .method(forwarding(
            &sorted_set,
            "subSet",
            &[("E", "fromElement"), ("E", "toElement")],
            "new CheckedSortedSet<>(set.subSet(fromElement, toElement), add)",
        ))
        .method(forwarding(
            &sorted_set,
            "headSet",
            &[("E", "toElement")],
            "new CheckedSortedSet<>(set.headSet(toElement), add)",
        ))
        .method(forwarding(
            &sorted_set,
            "tailSet",
            &[("E", "fromElement")],
            "new CheckedSortedSet<>(set.tailSet(fromElement), add)",
        ))
        .method(forwarding("E", "first", &[], "set.first()"))
        .method(forwarding("E", "last", &[], "set.last()"))
}

/// Entries seen through `entrySet()` route `setValue` through `putX`.
fn checked_map(ctx: &SourceContext<'_>) -> ClassSpec {
    let map = format!("{}<K, V>", ctx.util("Map"));
    let put = format!("{}<K, V>", ctx.function("BiConsumer"));
    let entry = format!("{}<K, V>", map_entry(ctx));
    let entry_set = format!("{}<{}>", ctx.util("Set"), entry);
    let entry_iterator = format!("{}<{}>", ctx.util("Iterator"), entry);

    let checked_entry = helper("CheckedEntry")
        .type_param("K")
        .type_param("V")
        .implements(&entry)
        .field(final_field(&entry, "entry"))
        .field(final_field(&put, "put"))
        .method(constructor("CheckedEntry", &[(&entry, "entry"), (&put, "put")]))
        .method(forwarding("K", "getKey", &[], "entry.getKey()"))
        .method(forwarding("V", "getValue", &[], "entry.getValue()"))
        .method(
            MethodSpec::new("setValue")
                .overriding()
                .returns("V")
                .param("V", "value")
                .body(|b| {
                    b.line("V oldValue = entry.getValue();");
                    b.line("put.accept(entry.getKey(), value);");
                    b.line("return oldValue;");
                }),
        )
        .method(forwarding("boolean", "equals", &[("Object", "o")], "entry.equals(o)"))
        .method(forwarding("int", "hashCode", &[], "entry.hashCode()"));

    let checked_entry_iterator = helper("CheckedEntryIterator")
        .type_param("K")
        .type_param("V")
        .implements(&entry_iterator)
        .field(final_field(&entry_iterator, "iterator"))
        .field(final_field(&put, "put"))
        .method(constructor(
            "CheckedEntryIterator",
            &[(&entry_iterator, "iterator"), (&put, "put")],
        ))
        .method(forwarding("boolean", "hasNext", &[], "iterator.hasNext()"))
        .method(forwarding(
            &entry,
            "next",
            &[],
            "new CheckedEntry<>(iterator.next(), put)",
        ))
        .method(forwarding("void", "remove", &[], "iterator.remove()"));

    let checked_entry_set = helper("CheckedEntrySet")
        .type_param("K")
        .type_param("V")
        .extends(format!("{}<{}>", ctx.util("AbstractSet"), entry))
        .field(final_field(&entry_set, "set"))
        .field(final_field(&put, "put"))
        .method(constructor("CheckedEntrySet", &[(&entry_set, "set"), (&put, "put")]))
        .method(forwarding("int", "size", &[], "set.size()"))
        .method(forwarding(
            &entry_iterator,
            "iterator",
            &[],
            "new CheckedEntryIterator<>(set.iterator(), put)",
        ))
        .method(forwarding("void", "clear", &[], "set.clear()"));

    helper("CheckedMap")
        .type_param("K")
        .type_param("V")
        .extends(format!("{}<K, V>", ctx.util("AbstractMap")))
        .field(final_field(&map, "map"))
        .field(final_field(&put, "put"))
        .method(constructor("CheckedMap", &[(&map, "map"), (&put, "put")]))
        .method(forwarding("V", "get", &[("Object", "key")], "map.get(key)"))
        .method(forwarding(
            "boolean",
            "containsKey",
            &[("Object", "key")],
            "map.containsKey(key)",
        ))
        .method(
            MethodSpec::new("put")
                .overriding()
                .returns("V")
                .param("K", "key")
                .param("V", "value")
                .body(|b| {
                    b.line("V oldValue = map.get(key);");
                    b.line("put.accept(key, value);");
                    b.line("return oldValue;");
                }),
        )
        .method(forwarding("V", "remove", &[("Object", "key")], "map.remove(key)"))
        .method(forwarding("void", "clear", &[], "map.clear()"))
        .method(forwarding(
            &entry_set,
            "entrySet",
            &[],
            "new CheckedEntrySet<>(map.entrySet(), put)",
        ))
        .nested(checked_entry_set)
        .nested(checked_entry_iterator)
        .nested(checked_entry)
}

/// Value sets returned by `get(key)` route `add` through `putX`.
fn checked_set_multimap(ctx: &SourceContext<'_>) -> ClassSpec {
    let multimap = format!("{}<K, V>", ctx.guava("SetMultimap"));
    let put = format!("{}<K, V>", ctx.function("BiConsumer"));
    let values_of = format!("{}<? extends V>", ctx.class(&ClassName::java_lang("Iterable")));
    let source = format!("{}<? extends K, ? extends V>", ctx.guava("Multimap"));
    let value_set = format!("{}<V>", ctx.util("Set"));
    let collection = format!("{}<? extends V>", ctx.util("Collection"));

    let checked_values = helper("CheckedValueSet")
        .type_param("K")
        .type_param("V")
        .extends(format!("{}<V>", ctx.guava("ForwardingSet")))
        .field(final_field("K", "key"))
        .field(final_field(&value_set, "values"))
        .field(final_field(&put, "put"))
        .method(constructor(
            "CheckedValueSet",
            &[("K", "key"), (&value_set, "values"), (&put, "put")],
        ))
        .method(
            MethodSpec::new("delegate")
                .overriding()
                .visibility(Visibility::Protected)
                .returns(&value_set)
                .body(|b| {
                    b.line("return values;");
                }),
        )
        .method(
            MethodSpec::new("add")
                .overriding()
                .returns("boolean")
                .param("V", "value")
                .body(|b| {
                    b.line("int oldSize = values.size();");
                    b.line("put.accept(key, value);");
                    b.line("return oldSize != values.size();");
                }),
        )
        .method(forwarding(
            "boolean",
            "addAll",
            &[(&collection, "collection")],
            "standardAddAll(collection)",
        ));

    helper("CheckedSetMultimap")
        .type_param("K")
        .type_param("V")
        .extends(format!("{}<K, V>", ctx.guava("ForwardingSetMultimap")))
        .field(final_field(&multimap, "multimap"))
        .field(final_field(&put, "put"))
        .method(constructor(
            "CheckedSetMultimap",
            &[(&multimap, "multimap"), (&put, "put")],
        ))
        .method(
            MethodSpec::new("delegate")
                .overriding()
                .visibility(Visibility::Protected)
                .returns(&multimap)
                .body(|b| {
                    b.line("return multimap;");
                }),
        )
        .method(
            MethodSpec::new("put")
                .overriding()
                .returns("boolean")
                .param("K", "key")
                .param("V", "value")
                .body(|b| {
                    b.line("int oldSize = multimap.size();");
                    b.line("put.accept(key, value);");
                    b.line("return oldSize != multimap.size();");
                }),
        )
        .method(
            MethodSpec::new("putAll")
                .overriding()
                .returns("boolean")
                .param("K", "key")
                .param(&values_of, "values")
                .body(|b| {
                    b.line("boolean changed = false;");
                    b.block("for (V value : values)", |b| {
                        b.line("changed |= put(key, value);");
                    });
                    b.line("return changed;");
                }),
        )
        .method(
            MethodSpec::new("putAll")
                .overriding()
                .returns("boolean")
                .param(&source, "source")
                .body(|b| {
                    b.line("boolean changed = false;");
                    b.block(
                        format!(
                            "for ({}<? extends K, ? extends V> entry : source.entries())",
                            map_entry(ctx)
                        ),
                        |b| {
                            b.line("changed |= put(entry.getKey(), entry.getValue());");
                        },
                    );
                    b.line("return changed;");
                }),
        )
        .method(forwarding(
            &value_set,
            "get",
            &[("K", "key")],
            "new CheckedValueSet<>(key, multimap.get(key), put)",
        ))
        .method(
            MethodSpec::new("replaceValues")
                .overriding()
                .returns(&value_set)
                .param("K", "key")
                .param(&values_of, "values")
                .body(|b| {
                    b.line(format!("{} oldValues = multimap.removeAll(key);", value_set));
                    b.line("putAll(key, values);");
                    b.line("return oldValues;");
                }),
        )
        .nested(checked_values)
}

#[cfg(test)]
mod tests {
    use freebuilder_codegen::builder::CodeBuilder;
    use freebuilder_codegen::java::TypeShortener;
    use freebuilder_core::{FeatureSet, SourceLevel};

    use super::*;
    use crate::analysis::TypeMetadata;

    fn render(helper: CheckedHelper, features: FeatureSet) -> (String, Vec<String>) {
        let metadata = TypeMetadata::fixture("com.example", "Person");
        let types = TypeShortener::new("com.example");
        let ctx = SourceContext::new(&metadata, features, &types);
        let mut code = CodeBuilder::java();
        code.emit(&helper.spec(&ctx));
        (code.build(), types.imports())
    }

    #[test]
    fn test_checked_list_routes_set_through_consumer() {
        let (source, imports) = render(CheckedHelper::List, FeatureSet::default());
        assert!(source.starts_with("private static class CheckedList<E> extends AbstractList<E> {"));
        assert!(source.contains("  private final Consumer<E> add;\n"));
        assert!(source.contains("    add.accept(e);\n    return list.set(index, list.remove(list.size() - 1));\n"));
        assert!(imports.contains(&"java.util.function.Consumer".to_string()));
        assert!(imports.contains(&"java.util.AbstractList".to_string()));
    }

    #[test]
    fn test_checked_sorted_set_extends_checked_set() {
        let (source, _) = render(CheckedHelper::SortedSet, FeatureSet::default());
        assert!(source.starts_with(
            "private static class CheckedSortedSet<E> extends CheckedSet<E> implements SortedSet<E> {"
        ));
        assert!(source.contains("return new CheckedSortedSet<>(set.headSet(toElement), add);"));
    }

    #[test]
    fn test_checked_map_wraps_entries() {
        let (source, imports) = render(CheckedHelper::Map, FeatureSet::default());
        assert!(source.contains("public Set<Map.Entry<K, V>> entrySet() {"));
        assert!(source.contains("private static class CheckedEntry<K, V> implements Map.Entry<K, V> {"));
        assert!(imports.contains(&"java.util.Map".to_string()));
        assert!(imports.contains(&"java.util.function.BiConsumer".to_string()));
    }

    #[test]
    fn test_checked_set_multimap_uses_guava_forwarding() {
        let features = FeatureSet {
            source: SourceLevel::Java8,
            guava: true,
        };
        let (source, imports) = render(CheckedHelper::SetMultimap, features);
        assert!(source.contains("extends ForwardingSetMultimap<K, V>"));
        assert!(source.contains("return new CheckedValueSet<>(key, multimap.get(key), put);"));
        assert!(imports.contains(&"com.google.common.collect.ForwardingSetMultimap".to_string()));
    }
}
