//! Assembling the generated builder superclass.
//!
//! Member order is fixed: `from`, the `Property` enum, property fields,
//! the unset set, the constructor, property methods in declaration order,
//! the structural methods, `Value`, `Partial`, then any checked
//! collection helpers.

mod context;
mod value;

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use freebuilder_codegen::java::{Body, ClassSpec, FieldSpec, JavaFile, Member, MethodSpec, TypeShortener};
use freebuilder_core::{FeatureSet, GeneratedFile};
use freebuilder_model::{ClassName, Visibility};
use serde::Serialize;
use tracing::info;

pub use context::SourceContext;

use crate::{
    analysis::TypeMetadata,
    factory::BuilderFactory,
    property::{CheckedHelper, PropertyCodeGenerator},
};
use value::Flavour;

/// Value recorded in the `@Generated` annotation.
pub const GENERATOR_NAME: &str = "org.inferred.freebuilder.processor.Processor";

/// One generated Java source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedBuilder {
    #[serde(serialize_with = "serialize_name")]
    pub name: ClassName,
    pub source: String,
}

impl GeneratedFile for GeneratedBuilder {
    fn path(&self, base: &Path) -> PathBuf {
        let mut path = base.to_path_buf();
        path.extend(self.name.package().split('.').filter(|s| !s.is_empty()));
        path.push(format!("{}.java", self.name.simple_name()));
        path
    }

    fn render(&self) -> String {
        self.source.clone()
    }
}

fn serialize_name<S: serde::Serializer>(
    name: &ClassName,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(name)
}

/// Simple names that must never refer to an imported class inside the
/// generated file.
fn reserved_names(metadata: &TypeMetadata) -> Vec<String> {
    let mut names: Vec<String> = ["Value", "Partial", "Property"]
        .into_iter()
        .map(String::from)
        .collect();
    names.extend(CheckedHelper::ALL.iter().map(|h| h.class_name().to_string()));
    names.extend(metadata.type_params.iter().map(|p| p.name.clone()));
    names.extend(metadata.member_types.iter().cloned());
    names
}

/// `T extends Comparable<T>`, for redeclaring the datatype's parameters.
pub(crate) fn type_param_decls(ctx: &SourceContext<'_>) -> Vec<String> {
    ctx.metadata
        .type_params
        .iter()
        .map(|param| {
            if param.bounds.is_empty() {
                param.name.clone()
            } else {
                let bounds: Vec<String> = param.bounds.iter().map(|b| ctx.ty(b)).collect();
                format!("{} extends {}", param.name, bounds.join(" & "))
            }
        })
        .collect()
}

/// Render the builder superclass for an analysed type.
pub fn generate(metadata: &TypeMetadata, features: FeatureSet) -> GeneratedBuilder {
    let mut types = TypeShortener::new(metadata.datatype.package());
    for name in reserved_names(metadata) {
        types.reserve(name);
    }
    // Claim the datatype and generated names before anything else can.
    types.class(&metadata.generated);
    types.class(&metadata.datatype);

    let ctx = SourceContext::new(metadata, features, &types);
    let class = builder_class(&ctx);
    let source = JavaFile::new(metadata.datatype.package(), types.imports(), class).render();

    info!(
        datatype = %metadata.datatype,
        generated = %metadata.generated,
        properties = metadata.properties.len(),
        "generated builder"
    );
    GeneratedBuilder {
        name: metadata.generated.clone(),
        source,
    }
}

fn builder_class(ctx: &SourceContext<'_>) -> ClassSpec {
    let metadata = ctx.metadata;
    let (generated_pkg, generated_simple) = ctx.features.generated_annotation();

    let mut class = ClassSpec::class(metadata.generated.simple_name())
        .annotation(format!(
            "@{}(\"{}\")",
            ctx.class(&ClassName::new(generated_pkg, generated_simple)),
            GENERATOR_NAME
        ));
    class = match &metadata.builder {
        Some(builder) => class
            .javadoc(format!(
                "Auto-generated superclass of {{@link {}}},\nderived from the API of {{@link {}}}.",
                ctx.class(builder),
                ctx.class(&metadata.datatype)
            ))
            .abstract_(),
        None => class
            .javadoc(format!(
                "Auto-generated builder for {{@link {}}}.",
                ctx.class(&metadata.datatype)
            ))
            .visibility(Visibility::Public),
    };
    for annotation in &metadata.passthrough_annotations {
        class = class.annotation(ctx.types.annotation(annotation));
    }
    for param in type_param_decls(ctx) {
        class = class.type_param(param);
    }

    if let Some(factory) = metadata.factory {
        class = class.method(from_method(ctx, factory));
    }
    if metadata.has_tracked_properties() {
        class = class.nested(property_enum(ctx));
    }
    for p in &metadata.properties {
        for field in p.code_generator.builder_fields(ctx, p) {
            class = class.field(field);
        }
    }
    if metadata.has_tracked_properties() {
        let enum_set = ctx.util("EnumSet");
        let property = ctx.property_enum();
        class = class.field(
            FieldSpec::new(format!("{}<{}>", enum_set, property), "_unsetProperties")
                .final_()
                .init(format!("{}.allOf({}.class)", enum_set, property)),
        );
    }
    if metadata.builder.is_none() {
        class = class.method(
            MethodSpec::constructor(metadata.generated.simple_name())
                .javadoc("Creates a new builder with every property unset or empty."),
        );
    }

    for p in &metadata.properties {
        for method in p.code_generator.builder_methods(ctx, p) {
            class = class.method(method);
        }
    }

    class = class
        .method(merge_from_value(ctx))
        .method(merge_from_builder(ctx));
    if let Some(clear) = clear(ctx) {
        class = class.method(clear);
    }
    class = class
        .method(build(ctx))
        .method(build_partial(ctx))
        .nested(value::value_class(ctx, Flavour::Value))
        .nested(value::value_class(ctx, Flavour::Partial));

    let helpers: BTreeSet<CheckedHelper> = metadata
        .properties
        .iter()
        .flat_map(|p| p.code_generator.checked_helpers(&ctx.features))
        .collect();
    for helper in helpers {
        class.push(Member::Type(helper.spec(ctx)));
    }
    class
}

/// `Person_Builder<T> _defaults = new Person.Builder<>();`
fn declare_defaults(ctx: &SourceContext<'_>, body: &mut Body) {
    let Some(factory) = ctx.metadata.factory else {
        return;
    };
    body.line(format!(
        "{} _defaults = {};",
        ctx.generated_ty(),
        factory.new_builder(
            &ctx.metadata.builder_ref(),
            &ctx.metadata.datatype,
            ctx.types,
            &ctx.features
        )
    ));
}

fn from_method(ctx: &SourceContext<'_>, factory: BuilderFactory) -> MethodSpec {
    let metadata = ctx.metadata;
    let mut method = MethodSpec::new("from")
        .javadoc("Creates a new builder using {@code value} as a template.\n\n@throws NullPointerException if {@code value} is null")
        .static_()
        .returns(ctx.builder_ty())
        .param(ctx.datatype_ty(), "value");
    for param in type_param_decls(ctx) {
        method = method.type_param(param);
    }
    // Diamond inference cannot see through a method receiver, so the new
    // builder goes into a typed local first.
    let new_builder = factory.new_builder(
        &metadata.builder_ref(),
        &metadata.datatype,
        ctx.types,
        &ctx.features,
    );
    method.body(|b| {
        b.line(format!("{} builder = {};", ctx.builder_ty(), new_builder));
        b.line(format!(
            "return builder.{}(value);",
            metadata.methods.merge_from_value.name
        ));
    })
}

fn property_enum(ctx: &SourceContext<'_>) -> ClassSpec {
    let constants = ctx
        .metadata
        .properties
        .iter()
        .filter(|p| p.code_generator.is_tracked())
        .map(|p| format!("{}(\"{}\")", p.all_caps_name, p.name))
        .collect();
    ClassSpec::enum_("Property")
        .visibility(Visibility::Private)
        .enum_constants(constants)
        .field(FieldSpec::new("String", "name").final_())
        .method(
            MethodSpec::constructor("Property")
                .visibility(Visibility::Private)
                .param("String", "name")
                .body(|b| {
                    b.line("this.name = name;");
                }),
        )
        .method(
            MethodSpec::new("toString")
                .overriding()
                .returns("String")
                .body(|b| {
                    b.line("return name;");
                }),
        )
}

fn merge_from_value(ctx: &SourceContext<'_>) -> MethodSpec {
    let metadata = ctx.metadata;
    let mut body = Body::new();
    if metadata.has_defaults_template() {
        declare_defaults(ctx, &mut body);
    }
    for p in &metadata.properties {
        p.code_generator.merge_from_value(ctx, p, &mut body);
    }
    body.line(ctx.return_this());

    let picked = &metadata.methods.merge_from_value;
    MethodSpec::new(&picked.name)
        .javadoc(format!(
            "Sets all property values using the given {{@code {}}} as a template.",
            ctx.class(&metadata.datatype)
        ))
        .visibility(picked.visibility)
        .returns(ctx.builder_ty())
        .param(ctx.datatype_ty(), "value")
        .with_body(body)
}

fn merge_from_builder(ctx: &SourceContext<'_>) -> MethodSpec {
    let metadata = ctx.metadata;
    let mut body = Body::new();
    if !metadata.properties.is_empty() {
        // Private fields are only reachable through the generated type.
        body.line(format!("{} base = template;", ctx.generated_ty()));
    }
    if metadata.has_defaults_template() {
        declare_defaults(ctx, &mut body);
    }
    for p in &metadata.properties {
        p.code_generator.merge_from_builder(ctx, p, &mut body);
    }
    body.line(ctx.return_this());

    let picked = &metadata.methods.merge_from_builder;
    MethodSpec::new(&picked.name)
        .javadoc("Copies values from the given {@code Builder}.\nDoes not affect any properties not set on the input.")
        .visibility(picked.visibility)
        .returns(ctx.builder_ty())
        .param(ctx.builder_ty(), "template")
        .with_body(body)
}

/// `clear()`, or nothing when defaulted properties exist but no fresh
/// builder can be created to read the defaults from.
fn clear(ctx: &SourceContext<'_>) -> Option<MethodSpec> {
    let metadata = ctx.metadata;
    let has_factory = metadata.factory.is_some();
    if !has_factory && metadata.has_defaulted_properties() {
        return None;
    }

    let reads_defaults = has_factory
        && (metadata.has_tracked_properties()
            || metadata.properties.iter().any(|p| {
                matches!(
                    p.code_generator,
                    PropertyCodeGenerator::Required
                        | PropertyCodeGenerator::Defaulted
                        | PropertyCodeGenerator::Nullable
                        | PropertyCodeGenerator::Generic
                )
            }));

    let mut body = Body::new();
    if reads_defaults {
        declare_defaults(ctx, &mut body);
    }
    for p in &metadata.properties {
        p.code_generator.clear(ctx, p, &mut body);
    }
    if metadata.has_tracked_properties() {
        body.line("_unsetProperties.clear();");
        if has_factory {
            body.line("_unsetProperties.addAll(_defaults._unsetProperties);");
        } else {
            body.line(format!(
                "_unsetProperties.addAll({}.allOf({}.class));",
                ctx.util("EnumSet"),
                ctx.property_enum()
            ));
        }
    }
    body.line(ctx.return_this());

    let picked = &metadata.methods.clear;
    Some(
        MethodSpec::new(&picked.name)
            .javadoc("Resets the state of this builder.\n\n@return this {@code Builder} object")
            .visibility(picked.visibility)
            .returns(ctx.builder_ty())
            .with_body(body),
    )
}

fn build(ctx: &SourceContext<'_>) -> MethodSpec {
    let metadata = ctx.metadata;
    let mut body = Body::new();
    if metadata.has_tracked_properties() {
        ctx.check_all_set(&mut body);
    }
    body.line(format!(
        "return {};",
        ctx.new_instance("Value", metadata.datatype_ref().type_args(), "this")
    ));

    let picked = &metadata.methods.build;
    let mut doc = format!(
        "Returns a newly-created {{@link {}}} based on the contents of this {{@code Builder}}.",
        ctx.class(&metadata.datatype)
    );
    if metadata.has_tracked_properties() {
        doc.push_str("\n\n@throws IllegalStateException if any field has not been set");
    }
    MethodSpec::new(&picked.name)
        .javadoc(doc)
        .visibility(picked.visibility)
        .returns(ctx.datatype_ty())
        .with_body(body)
}

fn build_partial(ctx: &SourceContext<'_>) -> MethodSpec {
    let metadata = ctx.metadata;
    let picked = &metadata.methods.build_partial;
    let partial = ctx.new_instance("Partial", metadata.datatype_ref().type_args(), "this");
    MethodSpec::new(&picked.name)
        .javadoc(format!(
            "Returns a newly-created partial {{@link {}}} for use in unit tests.\nState checking will not be performed.\nUnset properties will throw an {{@link UnsupportedOperationException}} when accessed via the partial object.\n\n<p>Partials should only ever be used in tests. They permit writing robust test cases that won't fail if this type gains more application-level constraints (e.g. new required fields) in future.",
            ctx.class(&metadata.datatype)
        ))
        .visibility(picked.visibility)
        .returns(ctx.datatype_ty())
        .body(|b| {
            b.line(format!("return {};", partial));
        })
}
