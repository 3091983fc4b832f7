//! Type lookup.

use indexmap::IndexMap;

use crate::{ClassName, TypeDecl};

/// Read-only access to the declarations visible to the generator.
///
/// Implemented by adapters over whatever the host toolchain exposes.
/// Lookups must be pure: the same name always yields the same declaration
/// for the lifetime of the model.
pub trait TypeModel {
    /// Look up a declaration by its qualified class name.
    fn lookup(&self, name: &ClassName) -> Option<&TypeDecl>;

    /// All declarations, in a stable order.
    fn declarations(&self) -> Box<dyn Iterator<Item = &TypeDecl> + '_>;
}

/// An in-memory type model keyed by qualified name, iterated in insertion
/// order.
#[derive(Debug, Clone, Default)]
pub struct ModelIndex {
    types: IndexMap<ClassName, TypeDecl>,
}

impl ModelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration, replacing any previous one with the same name.
    pub fn insert(&mut self, decl: TypeDecl) -> Option<TypeDecl> {
        self.types.insert(decl.name.clone(), decl)
    }

    /// Builder-style insert.
    pub fn with(mut self, decl: TypeDecl) -> Self {
        self.insert(decl);
        self
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn contains(&self, name: &ClassName) -> bool {
        self.types.contains_key(name)
    }
}

impl TypeModel for ModelIndex {
    fn lookup(&self, name: &ClassName) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    fn declarations(&self) -> Box<dyn Iterator<Item = &TypeDecl> + '_> {
        Box::new(self.types.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeKind;

    #[test]
    fn test_insertion_order_is_kept() {
        let index = ModelIndex::new()
            .with(TypeDecl::new(ClassName::new("p", "B"), TypeKind::Interface))
            .with(TypeDecl::new(ClassName::new("p", "A"), TypeKind::Interface));

        let names: Vec<_> = index
            .declarations()
            .map(|d| d.name.simple_name().to_string())
            .collect();
        assert_eq!(names, ["B", "A"]);
        assert!(index.lookup(&ClassName::new("p", "A")).is_some());
        assert!(index.lookup(&ClassName::new("p", "C")).is_none());
    }
}
