//! The per-type and per-property model produced by analysis.

use freebuilder_model::{Annotation, ClassName, TypeParam, TypeRef, Visibility};
use serde::Serialize;

use crate::{factory::BuilderFactory, names::NameAndVisibility, property::PropertyCodeGenerator};

/// Everything the generator needs to know about one FreeBuilder type.
///
/// Built once by the analyser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeMetadata {
    /// The user's value type, e.g. `com.example.Person`.
    #[serde(serialize_with = "serialize_display")]
    pub datatype: ClassName,
    #[serde(skip)]
    pub type_params: Vec<TypeParam>,
    pub is_interface: bool,
    /// The generated superclass, e.g. `com.example.Person_Builder`.
    #[serde(serialize_with = "serialize_display")]
    pub generated: ClassName,
    /// The user's `Person.Builder`, if declared.
    #[serde(serialize_with = "serialize_optional_display")]
    pub builder: Option<ClassName>,
    pub factory: Option<BuilderFactory>,
    pub methods: StructuralMethods,
    pub standard_methods: StandardMethods,
    /// Annotations copied onto the generated class.
    #[serde(skip)]
    pub passthrough_annotations: Vec<Annotation>,
    /// Simple names of the datatype's member types.
    #[serde(skip)]
    pub member_types: Vec<String>,
    /// Properties in declaration order.
    pub properties: Vec<Property>,
}

impl TypeMetadata {
    fn type_vars(&self) -> Vec<TypeRef> {
        self.type_params
            .iter()
            .map(|p| TypeRef::variable(&p.name))
            .collect()
    }

    /// `Person<T>`.
    pub fn datatype_ref(&self) -> TypeRef {
        TypeRef::generic(self.datatype.clone(), self.type_vars())
    }

    /// `Person_Builder<T>`.
    pub fn generated_ref(&self) -> TypeRef {
        TypeRef::generic(self.generated.clone(), self.type_vars())
    }

    /// The type generated methods return: `Person.Builder<T>`, or the
    /// generated class itself when the user declared no builder.
    pub fn builder_ref(&self) -> TypeRef {
        match &self.builder {
            Some(builder) => TypeRef::generic(builder.clone(), self.type_vars()),
            None => self.generated_ref(),
        }
    }

    /// Whether some property needs unset-state tracking.
    pub fn has_tracked_properties(&self) -> bool {
        self.properties
            .iter()
            .any(|p| p.code_generator.is_tracked())
    }

    pub fn has_defaulted_properties(&self) -> bool {
        self.properties
            .iter()
            .any(|p| matches!(p.code_generator, PropertyCodeGenerator::Defaulted))
    }

    /// Whether a fresh builder can serve as a template of default values.
    pub fn has_defaults_template(&self) -> bool {
        self.factory.is_some() && self.has_defaulted_properties()
    }
}

/// Names picked for the structural builder methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralMethods {
    pub build: NameAndVisibility,
    pub build_partial: NameAndVisibility,
    pub clear: NameAndVisibility,
    pub merge_from_value: NameAndVisibility,
    pub merge_from_builder: NameAndVisibility,
}

/// Which `Object` methods the generated `Value` and `Partial` implement.
///
/// A concrete implementation on the datatype suppresses generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StandardMethods {
    pub equals: bool,
    pub hash_code: bool,
    pub to_string: bool,
}

impl Default for StandardMethods {
    fn default() -> Self {
        Self {
            equals: true,
            hash_code: true,
            to_string: true,
        }
    }
}

/// One accessor-derived property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    /// `name`, derived from `getName()` or `name()`.
    pub name: String,
    /// `Name`, for synthesised method names.
    pub capitalized_name: String,
    /// `NAME`, the unset-tracking enum constant.
    pub all_caps_name: String,
    /// Declared type, with the datatype's bindings applied.
    #[serde(serialize_with = "serialize_display")]
    pub ty: TypeRef,
    /// The accessor on the datatype.
    pub getter_name: String,
    #[serde(skip)]
    pub accessor_visibility: Visibility,
    /// `@Nullable` annotations carried over to generated members.
    #[serde(skip)]
    pub nullable_annotations: Vec<Annotation>,
    pub setter: NameAndVisibility,
    pub builder_getter: NameAndVisibility,
    pub code_generator: PropertyCodeGenerator,
}

impl Property {
    /// `mapName`, `addName` and friends.
    pub fn method(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.capitalized_name)
    }
}

fn serialize_display<T: std::fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

fn serialize_optional_display<T: std::fmt::Display, S: serde::Serializer>(
    value: &Option<T>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(value) => serializer.collect_str(value),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
impl TypeMetadata {
    /// A property-less interface datatype with no user builder.
    pub(crate) fn fixture(package: &str, simple_name: &str) -> Self {
        let datatype = ClassName::new(package, simple_name);
        let generated = datatype.peer(format!("{}_Builder", datatype.flat_name()));
        Self {
            datatype,
            type_params: Vec::new(),
            is_interface: true,
            generated,
            builder: None,
            factory: Some(BuilderFactory::NoArgsConstructor),
            methods: StructuralMethods {
                build: NameAndVisibility::public("build"),
                build_partial: NameAndVisibility::public("buildPartial"),
                clear: NameAndVisibility::public("clear"),
                merge_from_value: NameAndVisibility::public("mergeFrom"),
                merge_from_builder: NameAndVisibility::public("mergeFrom"),
            },
            standard_methods: StandardMethods::default(),
            passthrough_annotations: Vec::new(),
            member_types: Vec::new(),
            properties: Vec::new(),
        }
    }
}
