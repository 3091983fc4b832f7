//! Library types usable by simple name in a declaration file.

use freebuilder_model::ClassName;

const JAVA_LANG: &[&str] = &[
    "Boolean",
    "Byte",
    "CharSequence",
    "Character",
    "Class",
    "Comparable",
    "Double",
    "Enum",
    "Float",
    "Integer",
    "Iterable",
    "Long",
    "Number",
    "Object",
    "Override",
    "Short",
    "String",
    "Void",
];

const JAVA_UTIL: &[&str] = &[
    "ArrayList",
    "Collection",
    "Comparator",
    "Date",
    "EnumSet",
    "HashMap",
    "LinkedHashMap",
    "LinkedHashSet",
    "List",
    "Map",
    "NavigableSet",
    "Optional",
    "Set",
    "SortedSet",
    "TreeSet",
    "UUID",
];

const GUAVA_COLLECT: &[&str] = &[
    "ImmutableList",
    "ImmutableMap",
    "ImmutableSet",
    "ImmutableSetMultimap",
    "ImmutableSortedSet",
    "Multimap",
    "SetMultimap",
];

/// Annotations with a conventional home package.
const ANNOTATIONS: &[(&str, &str)] = &[
    ("FreeBuilder", "org.inferred.freebuilder"),
    ("GwtCompatible", "com.google.common.annotations"),
    ("Nullable", "javax.annotation"),
];

/// The class a well-known simple name stands for.
pub(crate) fn lookup(simple_name: &str) -> Option<ClassName> {
    let package = if JAVA_LANG.contains(&simple_name) {
        "java.lang"
    } else if JAVA_UTIL.contains(&simple_name) {
        "java.util"
    } else if GUAVA_COLLECT.contains(&simple_name) {
        "com.google.common.collect"
    } else {
        ANNOTATIONS
            .iter()
            .find(|(name, _)| *name == simple_name)
            .map(|(_, package)| *package)?
    };
    Some(ClassName::new(package, simple_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("List"), Some(ClassName::java_util("List")));
        assert_eq!(lookup("String"), Some(ClassName::java_lang("String")));
        assert_eq!(
            lookup("FreeBuilder").map(|c| c.qualified()).as_deref(),
            Some("org.inferred.freebuilder.FreeBuilder")
        );
        assert_eq!(lookup("Person"), None);
    }
}
