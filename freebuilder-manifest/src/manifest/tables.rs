//! The raw TOML layout of a declaration file.

use freebuilder_core::FeatureSet;
use freebuilder_model::{TypeKind, Visibility};
use serde::Deserialize;
use toml::Spanned;

/// Root of a `types.toml` file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TypesFile {
    #[serde(default)]
    pub features: FeatureSet,
    #[serde(default, rename = "type")]
    pub types: Vec<TypeTable>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum KindEntry {
    #[default]
    Interface,
    Class,
    Enum,
}

impl From<KindEntry> for TypeKind {
    fn from(kind: KindEntry) -> Self {
        match kind {
            KindEntry::Interface => TypeKind::Interface,
            KindEntry::Class => TypeKind::Class,
            KindEntry::Enum => TypeKind::Enum,
        }
    }
}

/// Access level; `package` stands for package-private.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum VisibilityEntry {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

impl From<VisibilityEntry> for Visibility {
    fn from(visibility: VisibilityEntry) -> Self {
        match visibility {
            VisibilityEntry::Public => Visibility::Public,
            VisibilityEntry::Protected => Visibility::Protected,
            VisibilityEntry::Package => Visibility::PackagePrivate,
            VisibilityEntry::Private => Visibility::Private,
        }
    }
}

/// One `[[type]]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct TypeTable {
    /// Fully-qualified name; nested types use their enclosing type's name,
    /// e.g. `com.example.Person.Builder`.
    pub name: Spanned<String>,
    #[serde(default)]
    pub kind: KindEntry,
    #[serde(default)]
    pub visibility: VisibilityEntry,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub type_params: Vec<Spanned<String>>,
    /// Superclass of a class; for an interface, an extra superinterface.
    pub extends: Option<Spanned<String>>,
    #[serde(default)]
    pub implements: Vec<Spanned<String>>,
    /// `Name` or `Name(args)`, e.g. `GwtCompatible(serializable = true)`.
    #[serde(default)]
    pub annotations: Vec<Spanned<String>>,
    /// Member types not declared with their own `[[type]]` table.
    #[serde(default)]
    pub member_types: Vec<String>,
    #[serde(default, rename = "method")]
    pub methods: Vec<MethodTable>,
    #[serde(default, rename = "constructor")]
    pub constructors: Vec<ConstructorTable>,
}

/// One `[[type.method]]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct MethodTable {
    pub name: Spanned<String>,
    /// Return type; `void` when absent.
    pub returns: Option<Spanned<String>>,
    #[serde(default)]
    pub params: Vec<Spanned<String>>,
    #[serde(default)]
    pub visibility: VisibilityEntry,
    /// Defaults to true for interface methods that are neither static nor
    /// default, false otherwise.
    #[serde(rename = "abstract")]
    pub is_abstract: Option<bool>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "default")]
    pub is_default: bool,
    #[serde(default, rename = "final")]
    pub is_final: bool,
    #[serde(default)]
    pub annotations: Vec<Spanned<String>>,
}

/// One `[[type.constructor]]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct ConstructorTable {
    #[serde(default)]
    pub visibility: VisibilityEntry,
    #[serde(default)]
    pub params: Vec<Spanned<String>>,
    /// Methods of the same instance the constructor body calls.
    #[serde(default)]
    pub calls: Vec<Spanned<String>>,
}
