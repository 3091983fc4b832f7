//! Import-aware rendering of type names.

use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet, HashSet},
};

use freebuilder_model::{Annotation, ClassName, TypeRef, Wildcard};

/// Renders class names as short as the compilation unit allows and
/// records the imports that makes necessary.
///
/// The first class to claim a simple name gets it; later classes with the
/// same simple name are written fully qualified. Reserved names (member
/// classes of the generated type, type variables, inherited member types)
/// are never imported, since they would be shadowed inside the class body.
#[derive(Debug)]
pub struct TypeShortener {
    package: String,
    reserved: HashSet<String>,
    assigned: RefCell<BTreeMap<String, ClassName>>,
}

impl TypeShortener {
    /// A shortener for a compilation unit in `package`.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            reserved: HashSet::new(),
            assigned: RefCell::new(BTreeMap::new()),
        }
    }

    /// Prevent `simple_name` from being used for any imported class.
    pub fn reserve(&mut self, simple_name: impl Into<String>) {
        self.reserved.insert(simple_name.into());
    }

    /// Render a class name, importing its top-level class if possible.
    pub fn class(&self, name: &ClassName) -> String {
        let top = name.top_level();
        let key = top.simple_name().to_string();
        if self.reserved.contains(&key) {
            return name.qualified();
        }

        let mut assigned = self.assigned.borrow_mut();
        match assigned.get(&key) {
            Some(existing) if existing == &top => name.relative_name(),
            Some(_) => name.qualified(),
            None => {
                assigned.insert(key, top);
                name.relative_name()
            }
        }
    }

    /// Render a type reference.
    pub fn ty(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Primitive(kind) => kind.keyword().to_string(),
            TypeRef::Void => "void".to_string(),
            TypeRef::Variable(name) => name.clone(),
            TypeRef::Declared { name, args } => {
                let base = self.class(name);
                if args.is_empty() {
                    base
                } else {
                    format!("{}<{}>", base, self.type_list(args))
                }
            }
            TypeRef::Array(component) => format!("{}[]", self.ty(component)),
            TypeRef::Wildcard(Wildcard::Unbounded) => "?".to_string(),
            TypeRef::Wildcard(Wildcard::Extends(bound)) => format!("? extends {}", self.ty(bound)),
            TypeRef::Wildcard(Wildcard::Super(bound)) => format!("? super {}", self.ty(bound)),
        }
    }

    /// Render a comma-separated list of types.
    pub fn type_list(&self, types: &[TypeRef]) -> String {
        types
            .iter()
            .map(|t| self.ty(t))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render an annotation usage, e.g. `@GwtCompatible(serializable = true)`.
    pub fn annotation(&self, annotation: &Annotation) -> String {
        match &annotation.args {
            Some(args) => format!("@{}({})", self.class(&annotation.name), args),
            None => format!("@{}", self.class(&annotation.name)),
        }
    }

    /// Qualified names that need an import statement, sorted.
    pub fn imports(&self) -> Vec<String> {
        self.assigned
            .borrow()
            .values()
            .filter(|c| {
                !c.package().is_empty() && c.package() != "java.lang" && c.package() != self.package
            })
            .map(ClassName::qualified)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imports_first_claimant() {
        let shortener = TypeShortener::new("com.example");
        let util_list = ClassName::java_util("List");
        let awt_list = ClassName::new("java.awt", "List");

        assert_eq!(shortener.class(&util_list), "List");
        assert_eq!(shortener.class(&awt_list), "java.awt.List");
        assert_eq!(shortener.class(&util_list), "List");
        assert_eq!(shortener.imports(), ["java.util.List"]);
    }

    #[test]
    fn test_nested_classes_import_top_level() {
        let shortener = TypeShortener::new("com.example");
        let entry = ClassName::java_util("Map").nested("Entry");
        assert_eq!(shortener.class(&entry), "Map.Entry");
        assert_eq!(shortener.imports(), ["java.util.Map"]);
    }

    #[test]
    fn test_same_package_and_java_lang_not_imported() {
        let shortener = TypeShortener::new("com.example");
        assert_eq!(shortener.class(&ClassName::new("com.example", "Item")), "Item");
        assert_eq!(shortener.class(&ClassName::java_lang("String")), "String");
        assert!(shortener.imports().is_empty());
    }

    #[test]
    fn test_reserved_names_stay_qualified() {
        let mut shortener = TypeShortener::new("com.example");
        shortener.reserve("Value");
        let value = ClassName::new("com.other", "Value");
        assert_eq!(shortener.class(&value), "com.other.Value");
        assert!(shortener.imports().is_empty());
    }

    #[test]
    fn test_render_parameterized_type() {
        let shortener = TypeShortener::new("com.example");
        let ty = TypeRef::generic(
            ClassName::java_util("Map"),
            vec![
                TypeRef::string(),
                TypeRef::generic(
                    ClassName::java_util("List"),
                    vec![TypeRef::Wildcard(Wildcard::Extends(Box::new(
                        TypeRef::variable("T"),
                    )))],
                ),
            ],
        );
        assert_eq!(shortener.ty(&ty), "Map<String, List<? extends T>>");
        assert_eq!(shortener.imports(), ["java.util.List", "java.util.Map"]);
    }

    #[test]
    fn test_annotation_rendering() {
        let shortener = TypeShortener::new("com.example");
        let gwt = Annotation::with_args(
            ClassName::new("com.google.common.annotations", "GwtCompatible"),
            "serializable = true",
        );
        assert_eq!(
            shortener.annotation(&gwt),
            "@GwtCompatible(serializable = true)"
        );
    }
}
