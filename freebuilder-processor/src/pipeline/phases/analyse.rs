//! Analyse phase - one `TypeMetadata` per `@FreeBuilder` type.

use eyre::{Result, eyre};
use freebuilder_model::ClassName;
use tracing::warn;

use crate::{
    FREEBUILDER_ANNOTATION,
    analysis::Analyser,
    pipeline::{CompilationContext, Diagnostic, Phase},
};

/// Phase that analyses every annotated declaration in the model.
///
/// Each type is analysed in isolation: a failure becomes an error
/// diagnostic located at the type and the next type is processed.
pub struct AnalysePhase;

impl Phase for AnalysePhase {
    fn name(&self) -> &'static str {
        "analyse"
    }

    fn description(&self) -> &'static str {
        "Validate FreeBuilder types and discover their properties"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let marker = ClassName::parse(FREEBUILDER_ANNOTATION)
            .ok_or_else(|| eyre!("invalid marker annotation name {FREEBUILDER_ANNOTATION}"))?;
        let analyser = Analyser::new(ctx.model, ctx.features);

        let mut metadata = Vec::new();
        let mut diagnostics = Vec::new();
        for decl in ctx.model.declarations() {
            if !decl.has_annotation(&marker) {
                continue;
            }
            let location = decl.name.qualified();
            match analyser.analyse(decl) {
                Ok(analysed) => {
                    if analysed.builder.is_none() {
                        diagnostics.push(
                            Diagnostic::info(
                                self.name(),
                                format!(
                                    "add \"public static class Builder extends {}_Builder {{}}\" to {} to customise the generated builder",
                                    decl.name.flat_name(),
                                    decl.name.relative_name()
                                ),
                            )
                            .at(&location),
                        );
                    }
                    metadata.push(analysed);
                }
                Err(err) => {
                    warn!(datatype = %location, error = %err, "no builder generated");
                    diagnostics.push(Diagnostic::error(self.name(), err.to_string()).at(location));
                }
            }
        }

        ctx.diagnostics.extend(diagnostics);
        ctx.metadata = Some(metadata);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use freebuilder_core::FeatureSet;
    use freebuilder_model::{
        Annotation, MethodDecl, ModelIndex, TypeDecl, TypeKind, TypeRef,
    };

    use super::*;

    fn marker() -> Annotation {
        Annotation::new(ClassName::parse(FREEBUILDER_ANNOTATION).unwrap())
    }

    fn datatype(name: &str) -> TypeDecl {
        let mut decl = TypeDecl::new(ClassName::new("com.example", name), TypeKind::Interface);
        decl.annotations.push(marker());
        decl
    }

    #[test]
    fn test_failure_is_isolated_to_its_type() {
        let mut broken = datatype("Broken");
        broken.methods.push(MethodDecl::accessor("getName", TypeRef::string()));
        broken.methods.push(MethodDecl::accessor("age", TypeRef::int()));

        let mut person = datatype("Person");
        person.methods.push(MethodDecl::accessor("getName", TypeRef::string()));

        let model = ModelIndex::new().with(broken).with(person);
        let mut ctx = CompilationContext::new(&model, FeatureSet::default());
        AnalysePhase.run(&mut ctx).unwrap();

        let metadata = ctx.take_metadata().unwrap();
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata[0].datatype.simple_name(), "Person");

        let errors: Vec<_> = ctx.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].location.as_deref(), Some("com.example.Broken"));
        assert!(errors[0].message.contains("mixes accessor conventions"));
    }

    #[test]
    fn test_unannotated_types_are_ignored() {
        let plain = TypeDecl::new(ClassName::new("com.example", "Plain"), TypeKind::Interface);
        let model = ModelIndex::new().with(plain);
        let mut ctx = CompilationContext::new(&model, FeatureSet::default());
        AnalysePhase.run(&mut ctx).unwrap();

        assert!(ctx.take_metadata().unwrap().is_empty());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_builder_suggestion() {
        let model = ModelIndex::new().with(datatype("Person"));
        let mut ctx = CompilationContext::new(&model, FeatureSet::default());
        AnalysePhase.run(&mut ctx).unwrap();

        assert!(!ctx.has_errors());
        assert_eq!(ctx.diagnostics.len(), 1);
        assert!(ctx.diagnostics[0].message.contains("extends Person_Builder"));
    }
}
