//! Per-property code generation.
//!
//! Each property is claimed by exactly one [`PropertyCodeGenerator`],
//! picked by the first detector in [`DETECTORS`] that accepts it. The
//! variants are a closed set; every generation step dispatches with an
//! exhaustive `match`.

mod buildable;
mod checked;
mod list;
mod map;
mod multimap;
mod set;
mod sorted_set;
mod value;

use freebuilder_codegen::java::{Body, FieldSpec, MethodSpec};
use freebuilder_core::FeatureSet;
use freebuilder_model::{ClassName, TypeModel, TypeRef, Wildcard};
use serde::Serialize;
use tracing::debug;

pub use buildable::BuildableProperty;
pub use checked::CheckedHelper;

use crate::{
    analysis::Property, generator::SourceContext, introspect::ResolvedMethod,
};

/// Which nested class a value field is being initialised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    /// `Value`, created by `build()`.
    Build,
    /// `Partial`, created by `buildPartial()`.
    BuildPartial,
}

/// Element type of a list or set property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionProperty {
    #[serde(serialize_with = "serialize_type")]
    pub element: TypeRef,
    /// The user's builder overrides the single-element `addX`.
    pub overridden_add: bool,
    /// A varargs `addX(E...)` overload is safe.
    pub varargs: bool,
    /// Declared as `NavigableSet` rather than `SortedSet`.
    pub navigable: bool,
}

/// Key and value types of a map or multimap property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapProperty {
    #[serde(serialize_with = "serialize_type")]
    pub key: TypeRef,
    #[serde(serialize_with = "serialize_type")]
    pub value: TypeRef,
    /// The user's builder overrides `putX(K, V)`.
    pub overridden_put: bool,
}

/// How a property's builder members are generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PropertyCodeGenerator {
    /// Must be set before `build()`.
    Required,
    /// Given a value by the user's builder constructor.
    Defaulted,
    /// Annotated `@Nullable`; null means absent.
    Nullable,
    /// A required property whose type mentions type variables.
    Generic,
    List(CollectionProperty),
    Set(CollectionProperty),
    SortedSet(CollectionProperty),
    Map(MapProperty),
    SetMultimap(MapProperty),
    Buildable(BuildableProperty),
}

/// What detectors get to see about a property.
pub struct PropertyConfig<'a> {
    pub ty: &'a TypeRef,
    pub capitalized_name: &'a str,
    /// An annotation with simple name `Nullable` is present.
    pub is_nullable: bool,
    /// The user's builder constructor calls this property's setter.
    pub has_default: bool,
    /// Methods declared on the user's builder.
    pub builder_methods: &'a [ResolvedMethod],
    pub model: &'a dyn TypeModel,
    pub features: FeatureSet,
}

impl PropertyConfig<'_> {
    /// Whether the user's builder declares `<prefix><Name>` with `arity`
    /// parameters.
    pub fn overrides(&self, prefix: &str, arity: usize) -> bool {
        let name = format!("{}{}", prefix, self.capitalized_name);
        self.builder_methods
            .iter()
            .any(|m| m.name() == name && m.params().len() == arity)
    }

    /// The type arguments if the property is declared as one of `classes`
    /// with exactly `arity` concrete (non-wildcard) arguments.
    fn type_args_of(&self, classes: &[ClassName], arity: usize) -> Option<&[TypeRef]> {
        let name = self.ty.class_name()?;
        let args = self.ty.type_args();
        let concrete = args.iter().all(|a| !matches!(a, TypeRef::Wildcard(_)));
        (classes.contains(name) && args.len() == arity && concrete).then_some(args)
    }
}

type Detector = fn(&PropertyConfig<'_>) -> Option<PropertyCodeGenerator>;

/// Detectors in priority order; the first to accept a property wins.
pub const DETECTORS: &[(&str, Detector)] = &[
    ("buildable", buildable::detect),
    ("list", list::detect),
    ("sorted-set", sorted_set::detect),
    ("set", set::detect),
    ("set-multimap", multimap::detect),
    ("map", map::detect),
    ("nullable", detect_nullable),
    ("defaulted", detect_defaulted),
    ("required", detect_required),
    ("generic", detect_generic),
];

/// Pick the code generator for a property.
pub fn create(config: &PropertyConfig<'_>) -> Option<PropertyCodeGenerator> {
    DETECTORS.iter().find_map(|(name, detect)| {
        let generator = detect(config)?;
        debug!(detector = name, ty = %config.ty, "claimed property");
        Some(generator)
    })
}

/// Primitives cannot hold null, so `@Nullable` on one is ignored.
fn detect_nullable(config: &PropertyConfig<'_>) -> Option<PropertyCodeGenerator> {
    (config.is_nullable && !config.ty.is_primitive()).then_some(PropertyCodeGenerator::Nullable)
}

fn detect_defaulted(config: &PropertyConfig<'_>) -> Option<PropertyCodeGenerator> {
    config.has_default.then_some(PropertyCodeGenerator::Defaulted)
}

fn detect_required(config: &PropertyConfig<'_>) -> Option<PropertyCodeGenerator> {
    (!config.ty.mentions_variables()).then_some(PropertyCodeGenerator::Required)
}

fn detect_generic(_config: &PropertyConfig<'_>) -> Option<PropertyCodeGenerator> {
    Some(PropertyCodeGenerator::Generic)
}

impl PropertyCodeGenerator {
    /// Whether the property starts unset and is listed in the `Property`
    /// enum.
    pub fn is_tracked(&self) -> bool {
        matches!(self, Self::Required | Self::Generic)
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable)
    }

    /// Short kind label for reports and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Defaulted => "defaulted",
            Self::Nullable => "nullable",
            Self::Generic => "generic",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::SortedSet(_) => "sorted-set",
            Self::Map(_) => "map",
            Self::SetMultimap(_) => "set-multimap",
            Self::Buildable(_) => "buildable",
        }
    }

    /// Builder fields backing the property.
    pub fn builder_fields(&self, ctx: &SourceContext<'_>, p: &Property) -> Vec<FieldSpec> {
        match self {
            Self::Required | Self::Defaulted | Self::Nullable | Self::Generic => {
                value::fields(ctx, p)
            }
            Self::List(c) => list::fields(ctx, p, c),
            Self::Set(c) => set::fields(ctx, p, c),
            Self::SortedSet(c) => sorted_set::fields(ctx, p, c),
            Self::Map(m) => map::fields(ctx, p, m),
            Self::SetMultimap(m) => multimap::fields(ctx, p, m),
            Self::Buildable(b) => buildable::fields(ctx, p, b),
        }
    }

    /// Setters, getters, mappers and collection mutators.
    pub fn builder_methods(&self, ctx: &SourceContext<'_>, p: &Property) -> Vec<MethodSpec> {
        match self {
            Self::Required | Self::Defaulted | Self::Nullable | Self::Generic => {
                value::methods(ctx, p, self)
            }
            Self::List(c) => list::methods(ctx, p, c),
            Self::Set(c) => set::methods(ctx, p, c),
            Self::SortedSet(c) => sorted_set::methods(ctx, p, c),
            Self::Map(m) => map::methods(ctx, p, m),
            Self::SetMultimap(m) => multimap::methods(ctx, p, m),
            Self::Buildable(b) => buildable::methods(ctx, p, b),
        }
    }

    /// Statements of `mergeFrom(DataType value)`.
    pub fn merge_from_value(&self, ctx: &SourceContext<'_>, p: &Property, body: &mut Body) {
        match self {
            Self::Required | Self::Defaulted | Self::Nullable | Self::Generic => {
                value::merge_from_value(ctx, p, self, body)
            }
            Self::List(c) => list::merge_from_value(ctx, p, c, body),
            Self::Set(c) => set::merge_from_value(ctx, p, c, body),
            Self::SortedSet(c) => sorted_set::merge_from_value(ctx, p, c, body),
            Self::Map(m) => map::merge_from_value(ctx, p, m, body),
            Self::SetMultimap(_) => multimap::merge_from_value(p, body),
            Self::Buildable(b) => buildable::merge_from_value(ctx, p, b, body),
        }
    }

    /// Statements of `mergeFrom(DataType.Builder template)`, reading the
    /// source through the upcast local `base`.
    pub fn merge_from_builder(&self, ctx: &SourceContext<'_>, p: &Property, body: &mut Body) {
        match self {
            Self::Required | Self::Defaulted | Self::Nullable | Self::Generic => {
                value::merge_from_builder(ctx, p, self, body)
            }
            Self::List(_) | Self::Set(_) => {
                body.line(format!("{}(base.{});", p.method("addAll"), p.name));
            }
            Self::SortedSet(_) => sorted_set::merge_from_builder(p, body),
            Self::Map(_) | Self::SetMultimap(_) => {
                body.line(format!("{}(base.{});", p.method("putAll"), p.name));
            }
            Self::Buildable(b) => buildable::merge_from_builder(p, b, body),
        }
    }

    /// Statements of `clear()`. Value properties copy from `_defaults`
    /// when the template is available.
    pub fn clear(&self, ctx: &SourceContext<'_>, p: &Property, body: &mut Body) {
        match self {
            Self::Required | Self::Defaulted | Self::Nullable | Self::Generic => {
                value::clear(ctx, p, body)
            }
            Self::List(_) => list::clear_body(ctx, p, body),
            Self::Set(_) => set::clear_body(ctx, p, body),
            Self::SortedSet(_) => sorted_set::clear_body(ctx, p, body),
            Self::Map(_) => map::clear_body(ctx, p, body),
            Self::SetMultimap(_) => {
                body.line(format!("this.{}.clear();", p.name));
            }
            Self::Buildable(b) => buildable::clear(p, b, body),
        }
    }

    /// The expression initialising the `Value`/`Partial` field from the
    /// builder parameter `builder`.
    pub fn finish(&self, ctx: &SourceContext<'_>, p: &Property, finish: Finish) -> String {
        match self {
            Self::Required | Self::Defaulted | Self::Nullable | Self::Generic => {
                format!("builder.{}", p.name)
            }
            Self::List(c) => list::finish(ctx, p, c),
            Self::Set(c) => set::finish(ctx, p, c),
            Self::SortedSet(c) => sorted_set::finish(ctx, p, c),
            Self::Map(m) => map::finish(ctx, p, m),
            Self::SetMultimap(_) => {
                format!("{}.copyOf(builder.{})", ctx.guava("ImmutableSetMultimap"), p.name)
            }
            Self::Buildable(b) => buildable::finish(p, b, finish),
        }
    }

    /// Private helper classes `mutateX` needs.
    pub fn checked_helpers(&self, features: &FeatureSet) -> Vec<CheckedHelper> {
        if !features.has_lambdas() {
            return Vec::new();
        }
        match self {
            Self::List(c) if c.overridden_add => vec![CheckedHelper::List],
            Self::Set(c) if c.overridden_add => vec![CheckedHelper::Set],
            Self::SortedSet(c) if c.overridden_add => {
                vec![CheckedHelper::Set, CheckedHelper::SortedSet]
            }
            Self::Map(m) if m.overridden_put => vec![CheckedHelper::Map],
            Self::SetMultimap(m) if m.overridden_put => vec![CheckedHelper::SetMultimap],
            _ => Vec::new(),
        }
    }
}

/// A chained builder method: `public Person.Builder <name>(...)`.
pub(crate) fn chained(ctx: &SourceContext<'_>, name: impl Into<String>) -> MethodSpec {
    MethodSpec::new(name).returns(ctx.builder_ty())
}

/// `Iterable<? extends E>`.
pub(crate) fn iterable_of(ctx: &SourceContext<'_>, element: &TypeRef) -> String {
    ctx.ty(&TypeRef::generic(
        ClassName::java_lang("Iterable"),
        vec![TypeRef::Wildcard(Wildcard::Extends(Box::new(element.clone())))],
    ))
}

/// `Consumer<? super T>` where `target` is already rendered.
pub(crate) fn consumer_of(ctx: &SourceContext<'_>, target: &str) -> String {
    format!("{}<? super {}>", ctx.function("Consumer"), target)
}

/// Javadoc link to the property's accessor on the datatype.
pub(crate) fn accessor_link(ctx: &SourceContext<'_>, p: &Property) -> String {
    format!(
        "{{@link {}#{}()}}",
        ctx.class(&ctx.metadata.datatype),
        p.getter_name
    )
}

fn serialize_type<S: serde::Serializer>(
    ty: &TypeRef,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(ty)
}
