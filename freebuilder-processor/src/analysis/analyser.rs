//! Datatype validation and property discovery.

use freebuilder_core::{FeatureSet, capitalize, decapitalize, strip_accessor_prefix, to_screaming_snake_case};
use freebuilder_model::{
    Annotation, ClassName, MethodDecl, TypeDecl, TypeKind, TypeModel, TypeRef, Visibility,
};
use tracing::debug;

use super::{Property, StandardMethods, StructuralMethods, TypeMetadata};
use crate::{
    error::{AnalysisError, Result},
    factory::BuilderFactory,
    introspect::{Introspector, ResolvedMethod},
    names::{NameAndVisibility, pick_name},
    property::{self, PropertyConfig},
};

/// Annotations copied from the datatype onto the generated builder.
const PASSTHROUGH_ANNOTATIONS: [&str; 1] = ["GwtCompatible"];

/// Generated method names a property accessor must not take, with arity.
const STRUCTURAL_NAMES: [(&str, usize); 5] = [
    ("build", 0),
    ("buildPartial", 0),
    ("clear", 0),
    ("mergeFrom", 1),
    ("from", 1),
];

/// How an abstract method's name maps onto a property name.
enum Accessor {
    /// `getName()` or `isActive()` returning boolean.
    Bean(String),
    /// `isName()` returning something other than boolean.
    NonBooleanIs,
    /// `name()`.
    Prefixless,
}

fn classify(method: &MethodDecl) -> Accessor {
    if let Some(rest) = strip_accessor_prefix(&method.name, "get") {
        return Accessor::Bean(decapitalize(rest));
    }
    match strip_accessor_prefix(&method.name, "is") {
        Some(rest) if method.return_type.is_boolean() => Accessor::Bean(decapitalize(rest)),
        Some(_) => Accessor::NonBooleanIs,
        None => Accessor::Prefixless,
    }
}

/// Analyses FreeBuilder datatypes against a type model.
///
/// Holds no state between calls; analysing the same declaration twice
/// yields equal metadata.
pub struct Analyser<'a> {
    model: &'a dyn TypeModel,
    features: FeatureSet,
}

impl<'a> Analyser<'a> {
    pub fn new(model: &'a dyn TypeModel, features: FeatureSet) -> Self {
        Self { model, features }
    }

    /// Build the metadata for one datatype, or explain why no builder can
    /// be generated for it.
    pub fn analyse(&self, datatype: &TypeDecl) -> Result<TypeMetadata> {
        validate_datatype(datatype)?;

        let name = datatype.name.clone();
        let generated = name.peer(format!("{}_Builder", name.flat_name()));
        let builder = self.user_builder(datatype, &generated)?;

        let builder_methods = match builder {
            Some(builder) => Introspector::new(self.model)
                .tolerate(generated.clone())
                .methods_on(builder)?,
            None => Vec::new(),
        };
        let factory = match builder {
            Some(builder) => BuilderFactory::resolve(datatype, builder),
            None => Some(BuilderFactory::NoArgsConstructor),
        };
        let default_calls: Vec<String> = builder
            .and_then(TypeDecl::no_args_constructor)
            .map(|ctor| ctor.calls)
            .unwrap_or_default();

        let type_vars: Vec<TypeRef> = datatype
            .type_params
            .iter()
            .map(|p| TypeRef::variable(&p.name))
            .collect();
        let datatype_ref = datatype.self_type();
        let builder_ref = TypeRef::generic(
            builder.map_or_else(|| generated.clone(), |b| b.name.clone()),
            type_vars,
        );

        let methods = Introspector::new(self.model).methods_on(datatype)?;
        let standard_methods = standard_methods(&methods);
        let accessors = accessors(datatype, &methods)?;

        let mut properties = Vec::with_capacity(accessors.len());
        for (property_name, method) in accessors {
            properties.push(self.property(
                datatype,
                &property_name,
                method,
                &builder_methods,
                &builder_ref,
                &default_calls,
            )?);
        }

        let structural = StructuralMethods {
            build: pick_name(&builder_methods, &datatype_ref, "build", &[])?,
            build_partial: pick_name(&builder_methods, &datatype_ref, "buildPartial", &[])?,
            clear: pick_name(&builder_methods, &builder_ref, "clear", &[])?,
            merge_from_value: pick_merge_from(&builder_methods, &builder_ref, &datatype_ref)?,
            merge_from_builder: pick_merge_from(&builder_methods, &builder_ref, &builder_ref)?,
        };

        let passthrough_annotations: Vec<Annotation> = datatype
            .annotations
            .iter()
            .filter(|a| PASSTHROUGH_ANNOTATIONS.contains(&a.name.simple_name()))
            .cloned()
            .collect();

        Ok(TypeMetadata {
            datatype: name,
            type_params: datatype.type_params.clone(),
            is_interface: datatype.is_interface(),
            generated,
            builder: builder.map(|b| b.name.clone()),
            factory,
            methods: structural,
            standard_methods,
            passthrough_annotations,
            member_types: datatype.member_types.clone(),
            properties,
        })
    }

    /// The nested `Builder`, if declared, checked against the generated
    /// superclass it must extend.
    fn user_builder(&self, datatype: &TypeDecl, generated: &ClassName) -> Result<Option<&'a TypeDecl>> {
        let Some(builder) = self.model.lookup(&datatype.name.nested("Builder")) else {
            return Ok(None);
        };
        let invalid = |reason: String| AnalysisError::InvalidBuilder {
            name: datatype.name.qualified(),
            reason,
        };

        if builder.kind != TypeKind::Class {
            return Err(invalid("it must be a class".to_string()));
        }
        if builder.modifiers.visibility == Visibility::Private {
            return Err(invalid("it must not be private".to_string()));
        }
        if !datatype.is_interface() && !builder.modifiers.is_static {
            return Err(invalid("it must be static".to_string()));
        }
        let superclass = builder.superclass.as_ref();
        if !superclass.is_some_and(|s| s.is_class(generated)) {
            return Err(invalid(format!("it must extend {}", generated.simple_name())));
        }
        let arity = datatype.type_params.len();
        let super_args = superclass.map_or(0, |s| s.type_args().len());
        if builder.type_params.len() != arity || super_args != arity {
            return Err(invalid(format!(
                "it must declare the same {} type parameter(s) as {}",
                arity,
                datatype.name.simple_name()
            )));
        }
        Ok(Some(builder))
    }

    fn property(
        &self,
        datatype: &TypeDecl,
        name: &str,
        method: &ResolvedMethod,
        builder_methods: &[ResolvedMethod],
        builder_ref: &TypeRef,
        default_calls: &[String],
    ) -> Result<Property> {
        let accessor = &method.method;
        let ty = accessor.return_type.clone();
        let capitalized_name = capitalize(name);
        let is_bean = accessor.name != name;

        let preferred_setter = if is_bean {
            format!("set{}", capitalized_name)
        } else {
            name.to_string()
        };
        for (preferred, arity) in [(&preferred_setter, 1), (&accessor.name, 0)] {
            if STRUCTURAL_NAMES
                .iter()
                .any(|&(structural, a)| structural == preferred.as_str() && a == arity)
            {
                return Err(AnalysisError::NameClash {
                    name: datatype.name.qualified(),
                    property: name.to_string(),
                    method: preferred.clone(),
                });
            }
        }

        let setter = pick_name(builder_methods, builder_ref, &preferred_setter, std::slice::from_ref(&ty))?;
        let builder_getter = pick_name(builder_methods, &ty, &accessor.name, &[])?;

        let nullable_annotations: Vec<Annotation> = accessor
            .annotations
            .iter()
            .filter(|a| !ty.is_primitive() && a.name.simple_name() == "Nullable")
            .cloned()
            .collect();

        let config = PropertyConfig {
            ty: &ty,
            capitalized_name: &capitalized_name,
            is_nullable: !nullable_annotations.is_empty(),
            has_default: default_calls.contains(&setter.name),
            builder_methods,
            model: self.model,
            features: self.features,
        };
        let code_generator =
            property::create(&config).ok_or_else(|| AnalysisError::UnclaimedProperty {
                name: datatype.name.qualified(),
                property: name.to_string(),
            })?;
        debug!(
            datatype = %datatype.name,
            property = name,
            kind = code_generator.kind(),
            setter = %setter.name,
            "analysed property"
        );

        Ok(Property {
            name: name.to_string(),
            all_caps_name: to_screaming_snake_case(name),
            capitalized_name,
            ty,
            getter_name: accessor.name.clone(),
            accessor_visibility: accessor.visibility(),
            nullable_annotations,
            setter,
            builder_getter,
            code_generator,
        })
    }
}

fn validate_datatype(datatype: &TypeDecl) -> Result<()> {
    let name = datatype.name.qualified();
    match datatype.kind {
        TypeKind::Enum => {
            return Err(AnalysisError::UnsupportedKind {
                name,
                kind: "an enum",
            });
        }
        TypeKind::Class if !datatype.modifiers.is_abstract => {
            return Err(AnalysisError::UnsupportedKind {
                name,
                kind: "a concrete class",
            });
        }
        TypeKind::Class | TypeKind::Interface => {}
    }
    if datatype.modifiers.visibility == Visibility::Private {
        return Err(AnalysisError::PrivateType { name });
    }
    if datatype.name.is_nested() && !datatype.is_interface() && !datatype.modifiers.is_static {
        return Err(AnalysisError::NotStatic { name });
    }
    if datatype.is_abstract_class()
        && !datatype
            .no_args_constructor()
            .is_some_and(|c| c.visibility.is_visible_in_package())
    {
        return Err(AnalysisError::MissingNoArgsConstructor { name });
    }
    Ok(())
}

fn is_object(ty: &TypeRef) -> bool {
    ty.is_class(&ClassName::java_lang("Object"))
}

/// `equals(Object)`, `hashCode()` or `toString()`.
fn is_standard_method(method: &MethodDecl) -> bool {
    match (method.name.as_str(), method.params.as_slice()) {
        ("equals", [param]) => is_object(param),
        ("hashCode" | "toString", []) => true,
        _ => false,
    }
}

/// Standard methods are generated unless the datatype already implements
/// them; an abstract redeclaration does not count.
fn standard_methods(methods: &[ResolvedMethod]) -> StandardMethods {
    let implemented = |name: &str| {
        methods
            .iter()
            .any(|m| m.name() == name && is_standard_method(&m.method) && !m.method.is_abstract())
    };
    StandardMethods {
        equals: !implemented("equals"),
        hash_code: !implemented("hashCode"),
        to_string: !implemented("toString"),
    }
}

/// The abstract methods that become properties, paired with their property
/// names, in declaration order.
fn accessors<'m>(
    datatype: &TypeDecl,
    methods: &'m [ResolvedMethod],
) -> Result<Vec<(String, &'m ResolvedMethod)>> {
    let type_name = datatype.name.qualified();
    let mut candidates = Vec::new();
    for method in methods {
        let decl = &method.method;
        if !decl.is_abstract() || is_standard_method(decl) {
            continue;
        }
        let reason = if !decl.params.is_empty() {
            Some("accessors take no parameters")
        } else if decl.return_type.is_void() {
            Some("accessors must return a value")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(AnalysisError::NonAccessorAbstractMethod {
                name: type_name,
                method: decl.name.clone(),
                reason,
            });
        }
        candidates.push((classify(decl), method));
    }

    let bean = candidates
        .iter()
        .find(|(accessor, _)| matches!(accessor, Accessor::Bean(_)))
        .map(|(_, m)| m.name().to_string());

    let Some(bean) = bean else {
        return Ok(candidates
            .into_iter()
            .map(|(_, m)| (m.name().to_string(), m))
            .collect());
    };

    candidates
        .into_iter()
        .map(|(accessor, method)| match accessor {
            Accessor::Bean(name) => Ok((name, method)),
            Accessor::NonBooleanIs => Err(AnalysisError::NonAccessorAbstractMethod {
                name: type_name.clone(),
                method: method.name().to_string(),
                reason: "the 'is' prefix is reserved for boolean accessors",
            }),
            Accessor::Prefixless => Err(AnalysisError::MixedConventions {
                name: type_name.clone(),
                bean: bean.clone(),
                prefixless: method.name().to_string(),
            }),
        })
        .collect()
}

/// Pick a `mergeFrom` overload name, ignoring the sibling overload that is
/// generated alongside it.
fn pick_merge_from(
    builder_methods: &[ResolvedMethod],
    builder_ref: &TypeRef,
    param: &TypeRef,
) -> Result<NameAndVisibility> {
    let erased = param.erasure();
    let others: Vec<ResolvedMethod> = builder_methods
        .iter()
        .filter(|m| {
            m.name() != "mergeFrom"
                || m.params().len() != 1
                || m.params()[0].erasure() == erased
        })
        .cloned()
        .collect();
    pick_name(&others, builder_ref, "mergeFrom", std::slice::from_ref(param))
}

#[cfg(test)]
mod tests {
    use freebuilder_model::{Modifiers, ModelIndex};

    use super::*;

    fn interface(accessors: Vec<MethodDecl>) -> TypeDecl {
        let mut decl = TypeDecl::new(ClassName::new("com.example", "Person"), TypeKind::Interface);
        decl.methods = accessors;
        decl
    }

    fn builder() -> TypeDecl {
        let mut builder = TypeDecl::new(
            ClassName::new("com.example", "Person").nested("Builder"),
            TypeKind::Class,
        );
        builder.modifiers.is_static = true;
        builder.superclass = Some(TypeRef::class(ClassName::new("com.example", "Person_Builder")));
        builder
    }

    fn analyse(model: &ModelIndex, datatype: &TypeDecl) -> Result<TypeMetadata> {
        Analyser::new(model, FeatureSet::default()).analyse(datatype)
    }

    #[test]
    fn test_bean_accessors_become_properties() {
        let datatype = interface(vec![
            MethodDecl::accessor("getName", TypeRef::string()),
            MethodDecl::accessor("isActive", TypeRef::boolean()),
        ]);
        let model = ModelIndex::new().with(datatype.clone());

        let metadata = analyse(&model, &datatype).unwrap();
        let names: Vec<_> = metadata.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["name", "active"]);
        assert_eq!(metadata.properties[1].setter.name, "setActive");
        assert!(metadata.builder.is_none());
    }

    #[test]
    fn test_mixed_conventions_rejected() {
        let datatype = interface(vec![
            MethodDecl::accessor("getName", TypeRef::string()),
            MethodDecl::accessor("age", TypeRef::int()),
        ]);
        let model = ModelIndex::new().with(datatype.clone());

        let err = analyse(&model, &datatype).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MixedConventions {
                name: "com.example.Person".to_string(),
                bean: "getName".to_string(),
                prefixless: "age".to_string(),
            }
        );
    }

    #[test]
    fn test_abstract_method_with_parameters_rejected() {
        let mut lookup = MethodDecl::accessor("getName", TypeRef::string());
        lookup.params.push(TypeRef::int());
        let datatype = interface(vec![lookup]);
        let model = ModelIndex::new().with(datatype.clone());

        match analyse(&model, &datatype).unwrap_err() {
            AnalysisError::NonAccessorAbstractMethod { method, reason, .. } => {
                assert_eq!(method, "getName");
                assert_eq!(reason, "accessors take no parameters");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_void_abstract_method_rejected() {
        let datatype = interface(vec![MethodDecl::accessor("reset", TypeRef::Void)]);
        let model = ModelIndex::new().with(datatype.clone());

        match analyse(&model, &datatype).unwrap_err() {
            AnalysisError::NonAccessorAbstractMethod { method, reason, .. } => {
                assert_eq!(method, "reset");
                assert_eq!(reason, "accessors must return a value");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_boolean_is_prefix_rejected() {
        let datatype = interface(vec![
            MethodDecl::accessor("getName", TypeRef::string()),
            MethodDecl::accessor("isMember", TypeRef::string()),
        ]);
        let model = ModelIndex::new().with(datatype.clone());

        match analyse(&model, &datatype).unwrap_err() {
            AnalysisError::NonAccessorAbstractMethod { method, reason, .. } => {
                assert_eq!(method, "isMember");
                assert_eq!(reason, "the 'is' prefix is reserved for boolean accessors");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_boolean_is_prefix_allowed_without_bean_accessors() {
        let datatype = interface(vec![
            MethodDecl::accessor("isMember", TypeRef::string()),
            MethodDecl::accessor("age", TypeRef::int()),
        ]);
        let model = ModelIndex::new().with(datatype.clone());

        let metadata = analyse(&model, &datatype).unwrap();
        assert_eq!(metadata.properties[0].name, "isMember");
        assert_eq!(metadata.properties[0].setter.name, "isMember");
    }

    #[test]
    fn test_builder_must_be_a_class() {
        let datatype = interface(vec![MethodDecl::accessor("getName", TypeRef::string())]);
        let mut builder = builder();
        builder.kind = TypeKind::Interface;
        let model = ModelIndex::new().with(datatype.clone()).with(builder);

        assert_eq!(
            analyse(&model, &datatype).unwrap_err(),
            AnalysisError::InvalidBuilder {
                name: "com.example.Person".to_string(),
                reason: "it must be a class".to_string(),
            }
        );
    }

    #[test]
    fn test_builder_must_extend_generated_class() {
        let datatype = interface(vec![MethodDecl::accessor("getName", TypeRef::string())]);
        let mut builder = builder();
        builder.superclass = None;
        let model = ModelIndex::new().with(datatype.clone()).with(builder);

        assert_eq!(
            analyse(&model, &datatype).unwrap_err(),
            AnalysisError::InvalidBuilder {
                name: "com.example.Person".to_string(),
                reason: "it must extend Person_Builder".to_string(),
            }
        );
    }

    #[test]
    fn test_builder_of_abstract_class_must_be_static() {
        let mut datatype = TypeDecl::new(ClassName::new("com.example", "Person"), TypeKind::Class);
        datatype.modifiers.is_abstract = true;
        datatype.methods = vec![MethodDecl::accessor("getName", TypeRef::string())];
        let mut builder = builder();
        builder.modifiers.is_static = false;
        let model = ModelIndex::new().with(datatype.clone()).with(builder);

        assert_eq!(
            analyse(&model, &datatype).unwrap_err(),
            AnalysisError::InvalidBuilder {
                name: "com.example.Person".to_string(),
                reason: "it must be static".to_string(),
            }
        );
    }

    #[test]
    fn test_builder_override_keeps_its_name() {
        let datatype = interface(vec![MethodDecl::accessor("getName", TypeRef::string())]);
        let mut builder = builder();
        builder.methods.push(MethodDecl {
            name: "setName".to_string(),
            params: vec![TypeRef::string()],
            return_type: TypeRef::class(builder.name.clone()),
            modifiers: Modifiers::public(),
            annotations: Vec::new(),
        });
        let model = ModelIndex::new().with(datatype.clone()).with(builder);

        let metadata = analyse(&model, &datatype).unwrap();
        assert_eq!(metadata.properties[0].setter, NameAndVisibility::public("setName"));
        assert_eq!(
            metadata.builder,
            Some(ClassName::new("com.example", "Person").nested("Builder"))
        );
    }

    #[test]
    fn test_nullable_primitive_is_required() {
        let mut count = MethodDecl::accessor("getCount", TypeRef::int());
        count
            .annotations
            .push(Annotation::new(ClassName::new("javax.annotation", "Nullable")));
        let datatype = interface(vec![count]);
        let model = ModelIndex::new().with(datatype.clone());

        let metadata = analyse(&model, &datatype).unwrap();
        let property = &metadata.properties[0];
        assert_eq!(property.code_generator, property::PropertyCodeGenerator::Required);
        assert!(property.nullable_annotations.is_empty());
    }

    #[test]
    fn test_property_json_shape() {
        let datatype = interface(vec![MethodDecl::accessor("getName", TypeRef::string())]);
        let model = ModelIndex::new().with(datatype.clone());

        let metadata = analyse(&model, &datatype).unwrap();
        let json = serde_json::to_value(&metadata.properties[0]).unwrap();
        let mut keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "all_caps_name",
                "builder_getter",
                "capitalized_name",
                "code_generator",
                "getter_name",
                "name",
                "setter",
                "ty",
            ]
        );
        assert_eq!(json["ty"], "java.lang.String");
        assert_eq!(json["code_generator"]["kind"], "required");
    }

    #[test]
    fn test_analysis_is_repeatable() {
        let datatype = interface(vec![MethodDecl::accessor("getName", TypeRef::string())]);
        let model = ModelIndex::new().with(datatype.clone());

        assert_eq!(analyse(&model, &datatype), analyse(&model, &datatype));
    }
}
