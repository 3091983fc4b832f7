//! Properties whose type is itself a FreeBuilder type.
//!
//! The parent builder holds a nested builder for the property rather than
//! a value, so callers can edit it in place through `getXBuilder()`.

use freebuilder_codegen::java::{Body, FieldSpec, MethodSpec};
use freebuilder_model::{ClassName, TypeRef, Visibility};
use serde::Serialize;
use tracing::debug;

use super::{Finish, PropertyCodeGenerator, PropertyConfig, accessor_link, chained, consumer_of};
use crate::{
    FREEBUILDER_ANNOTATION, analysis::Property, factory::BuilderFactory,
    generator::SourceContext, introspect::Introspector,
};

/// Methods the nested builder must not hide behind `protected`.
const REQUIRED_PUBLIC: [&str; 4] = ["build", "buildPartial", "clear", "mergeFrom"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildableProperty {
    /// `Item.Builder`, with the property's type arguments.
    #[serde(serialize_with = "super::serialize_type")]
    pub builder: TypeRef,
    /// `Item`, where static factory methods live.
    #[serde(skip)]
    pub datatype: ClassName,
    pub factory: BuilderFactory,
}

pub(super) fn detect(config: &PropertyConfig<'_>) -> Option<PropertyCodeGenerator> {
    if config.is_nullable {
        return None;
    }
    let TypeRef::Declared { name, args } = config.ty else {
        return None;
    };
    let annotation = ClassName::parse(FREEBUILDER_ANNOTATION)?;
    let datatype = config.model.lookup(name)?;
    if !datatype.has_annotation(&annotation) {
        return None;
    }
    let builder_name = name.nested("Builder");
    let builder = config.model.lookup(&builder_name)?;
    if builder.modifiers.visibility == Visibility::Private {
        return None;
    }
    let factory = BuilderFactory::resolve(datatype, builder)?;

    let generated = name.peer(format!("{}_Builder", name.flat_name()));
    let methods = Introspector::new(config.model)
        .tolerate(generated)
        .methods_on(builder)
        .ok()?;
    if let Some(hidden) = methods.iter().find(|m| {
        REQUIRED_PUBLIC.contains(&m.name()) && m.method.visibility() == Visibility::Protected
    }) {
        debug!(builder = %builder_name, method = hidden.name(), "nested builder hides a required method");
        return None;
    }

    Some(PropertyCodeGenerator::Buildable(BuildableProperty {
        builder: TypeRef::generic(builder_name, args.clone()),
        datatype: name.clone(),
        factory,
    }))
}

/// `getItemBuilder` for bean-style accessors, `itemBuilder` otherwise.
fn builder_getter_name(p: &Property) -> String {
    format!("{}Builder", p.builder_getter.name)
}

pub(super) fn fields(ctx: &SourceContext<'_>, p: &Property, b: &BuildableProperty) -> Vec<FieldSpec> {
    let init = b
        .factory
        .new_builder(&b.builder, &b.datatype, ctx.types, &ctx.features);
    vec![
        FieldSpec::new(ctx.ty(&b.builder), &p.name)
            .final_()
            .init(init),
    ]
}

pub(super) fn methods(ctx: &SourceContext<'_>, p: &Property, b: &BuildableProperty) -> Vec<MethodSpec> {
    let builder = ctx.ty(&b.builder);
    let link = accessor_link(ctx, p);
    let mut methods = Vec::new();

    let mut set = Body::new();
    ctx.check_not_null(&mut set, &p.name);
    set.line(format!("this.{}.clear();", p.name));
    set.line(format!("this.{0}.mergeFrom({0});", p.name));
    set.line(ctx.return_this());
    methods.push(
        chained(ctx, &p.setter.name)
            .javadoc(format!(
                "Sets the value to be returned by {}.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code {}}} is null",
                link, p.name
            ))
            .visibility(p.setter.visibility)
            .param(ctx.ty(&p.ty), &p.name)
            .with_body(set),
    );

    methods.push(
        chained(ctx, &p.setter.name)
            .javadoc(format!(
                "Sets the value to be returned by {}.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code builder}} is null",
                link
            ))
            .visibility(p.setter.visibility)
            .param(&builder, "builder")
            .body(|body| {
                body.line(format!("return {}(builder.build());", p.setter.name));
            }),
    );

    methods.push(
        MethodSpec::new(builder_getter_name(p))
            .javadoc(format!(
                "Returns a builder for the value that will be returned by {}.",
                link
            ))
            .visibility(p.builder_getter.visibility)
            .returns(&builder)
            .body(|body| {
                body.line(format!("return this.{};", p.name));
            }),
    );

    if ctx.features.has_lambdas() {
        let mut mutate = Body::new();
        ctx.check_not_null(&mut mutate, "mutator");
        mutate.line(format!("mutator.accept(this.{});", p.name));
        mutate.line(ctx.return_this());
        methods.push(
            chained(ctx, p.method("mutate"))
                .javadoc(format!(
                    "Applies {{@code mutator}} to the builder for the value that will be returned by {}.\n\n<p>This method mutates the builder in-place. {{@code mutator}} is a void consumer, so any value returned from a lambda will be ignored.\n\n@return this {{@code Builder}} object\n@throws NullPointerException if {{@code mutator}} is null",
                    link
                ))
                .param(consumer_of(ctx, &builder), "mutator")
                .with_body(mutate),
        );
    }

    methods
}

pub(super) fn merge_from_value(
    _ctx: &SourceContext<'_>,
    p: &Property,
    _b: &BuildableProperty,
    body: &mut Body,
) {
    body.line(format!("this.{}.mergeFrom(value.{}());", p.name, p.getter_name));
}

pub(super) fn merge_from_builder(p: &Property, _b: &BuildableProperty, body: &mut Body) {
    body.line(format!("this.{0}.mergeFrom(base.{0});", p.name));
}

pub(super) fn clear(p: &Property, _b: &BuildableProperty, body: &mut Body) {
    body.line(format!("this.{}.clear();", p.name));
}

pub(super) fn finish(p: &Property, _b: &BuildableProperty, finish: Finish) -> String {
    match finish {
        Finish::Build => format!("builder.{}.build()", p.name),
        Finish::BuildPartial => format!("builder.{}.buildPartial()", p.name),
    }
}

#[cfg(test)]
mod tests {
    use freebuilder_core::FeatureSet;
    use freebuilder_model::{Annotation, MethodDecl, ModelIndex, Modifiers, TypeDecl, TypeKind};

    use super::*;

    fn item() -> ClassName {
        ClassName::new("com.example", "Item")
    }

    fn model_with(builder_methods: Vec<MethodDecl>) -> ModelIndex {
        let mut datatype = TypeDecl::new(item(), TypeKind::Interface);
        datatype.annotations.push(Annotation::new(
            ClassName::parse(FREEBUILDER_ANNOTATION).unwrap(),
        ));
        let mut builder = TypeDecl::new(item().nested("Builder"), TypeKind::Class);
        builder.modifiers.is_static = true;
        builder.superclass = Some(TypeRef::class(ClassName::new("com.example", "Item_Builder")));
        builder.methods = builder_methods;
        ModelIndex::new().with(datatype).with(builder)
    }

    /// A concrete builder method with the given visibility.
    fn method(name: &str, params: Vec<TypeRef>, returns: TypeRef, visibility: Visibility) -> MethodDecl {
        MethodDecl {
            name: name.to_string(),
            params,
            return_type: returns,
            modifiers: Modifiers {
                visibility,
                ..Modifiers::default()
            },
            annotations: Vec::new(),
        }
    }

    fn structural(name: &str, visibility: Visibility) -> MethodDecl {
        let value = TypeRef::class(item());
        let builder = TypeRef::class(item().nested("Builder"));
        match name {
            "build" | "buildPartial" => method(name, Vec::new(), value, visibility),
            "clear" => method(name, Vec::new(), builder, visibility),
            _ => method(name, vec![value], builder, visibility),
        }
    }

    fn detect_in(model: &ModelIndex) -> Option<PropertyCodeGenerator> {
        let ty = TypeRef::class(item());
        let config = PropertyConfig {
            ty: &ty,
            capitalized_name: "Item",
            is_nullable: false,
            has_default: false,
            builder_methods: &[],
            model,
            features: FeatureSet::default(),
        };
        detect(&config)
    }

    #[test]
    fn test_detects_freebuilder_type() {
        let model = model_with(Vec::new());
        let Some(PropertyCodeGenerator::Buildable(buildable)) = detect_in(&model) else {
            panic!("expected a buildable property");
        };
        assert_eq!(buildable.builder, TypeRef::class(item().nested("Builder")));
        assert_eq!(buildable.factory, BuilderFactory::NoArgsConstructor);
    }

    #[test]
    fn test_rejects_protected_structural_methods() {
        for name in REQUIRED_PUBLIC {
            let model = model_with(vec![structural(name, Visibility::Protected)]);
            assert_eq!(detect_in(&model), None, "protected {name} should be rejected");
        }
    }

    #[test]
    fn test_accepts_public_overrides() {
        let overrides = REQUIRED_PUBLIC
            .iter()
            .map(|name| structural(name, Visibility::Public))
            .collect();
        let model = model_with(overrides);
        assert!(matches!(
            detect_in(&model),
            Some(PropertyCodeGenerator::Buildable(_))
        ));
    }

    #[test]
    fn test_rejects_type_without_annotation() {
        let mut datatype = TypeDecl::new(item(), TypeKind::Interface);
        datatype.methods.push(MethodDecl::accessor("getName", TypeRef::string()));
        let mut builder = TypeDecl::new(item().nested("Builder"), TypeKind::Class);
        builder.modifiers.is_static = true;
        let model = ModelIndex::new().with(datatype).with(builder);
        assert_eq!(detect_in(&model), None);
    }

    #[test]
    fn test_nullable_is_not_buildable() {
        let model = model_with(Vec::new());
        let ty = TypeRef::class(item());
        let config = PropertyConfig {
            ty: &ty,
            capitalized_name: "Item",
            is_nullable: true,
            has_default: false,
            builder_methods: &[],
            model: &model,
            features: FeatureSet::default(),
        };
        assert_eq!(detect(&config), None);
    }
}
