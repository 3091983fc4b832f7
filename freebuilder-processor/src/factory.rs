//! How generated code obtains a fresh builder instance.

use freebuilder_codegen::java::TypeShortener;
use freebuilder_core::FeatureSet;
use freebuilder_model::{ClassName, TypeDecl, TypeRef};
use serde::Serialize;

/// Policy for constructing a builder, chosen once per type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuilderFactory {
    /// `new DataType.Builder()`
    NoArgsConstructor,
    /// `DataType.builder()`
    BuilderMethod,
    /// `DataType.newBuilder()`
    NewBuilderMethod,
}

impl BuilderFactory {
    /// Pick the factory for `builder`, the builder nested in `datatype`.
    ///
    /// Static zero-argument `newBuilder()` then `builder()` methods on the
    /// datatype returning the builder type take priority over a visible
    /// no-argument constructor. Returns `None` when no way to instantiate
    /// the builder is visible from the same package.
    pub fn resolve(datatype: &TypeDecl, builder: &TypeDecl) -> Option<Self> {
        let has_static_method = |method_name: &str| {
            datatype.methods.iter().any(|m| {
                m.name == method_name
                    && m.is_static()
                    && m.params.is_empty()
                    && m.visibility().is_visible_in_package()
                    && m.return_type.is_class(&builder.name)
            })
        };

        if has_static_method("newBuilder") {
            Some(Self::NewBuilderMethod)
        } else if has_static_method("builder") {
            Some(Self::BuilderMethod)
        } else if !builder.modifiers.is_abstract
            && builder
                .no_args_constructor()
                .is_some_and(|c| c.visibility.is_visible_in_package())
        {
            Some(Self::NoArgsConstructor)
        } else {
            None
        }
    }

    /// The Java expression creating a new builder.
    ///
    /// `builder` is the (possibly parameterized) builder type and
    /// `datatype` the class the static factory methods live on.
    pub fn new_builder(
        &self,
        builder: &TypeRef,
        datatype: &ClassName,
        types: &TypeShortener,
        features: &FeatureSet,
    ) -> String {
        let args = builder.type_args();
        match self {
            Self::NoArgsConstructor => {
                let raw = builder
                    .class_name()
                    .map(|name| types.class(name))
                    .unwrap_or_else(|| types.ty(builder));
                if args.is_empty() {
                    format!("new {}()", raw)
                } else if features.has_diamond() {
                    format!("new {}<>()", raw)
                } else {
                    format!("new {}<{}>()", raw, types.type_list(args))
                }
            }
            Self::BuilderMethod | Self::NewBuilderMethod => {
                let method = if *self == Self::BuilderMethod {
                    "builder"
                } else {
                    "newBuilder"
                };
                if args.is_empty() {
                    format!("{}.{}()", types.class(datatype), method)
                } else {
                    format!(
                        "{}.<{}>{}()",
                        types.class(datatype),
                        types.type_list(args),
                        method
                    )
                }
            }
        }
    }
}
