//! Lowering parsed tables into a type model.

use std::{collections::HashSet, ops::Range};

use freebuilder_model::{
    Annotation, ClassName, ConstructorDecl, MethodDecl, ModelIndex, Modifiers, PrimitiveKind,
    TypeDecl, TypeKind, TypeParam, TypeRef, Wildcard,
};
use toml::Spanned;

use super::{
    tables::{ConstructorTable, KindEntry, MethodTable, TypeTable, TypesFile},
    validate::ParseContext,
};
use crate::{
    Result, known,
    syntax::{TypeExpr, WildcardExpr, parse_type, parse_type_param},
};

pub(super) fn lower(file: &TypesFile, ctx: &ParseContext) -> Result<ModelIndex> {
    let declared = declared_names(file, ctx)?;
    let mut model = ModelIndex::new();
    for (table, name) in file.types.iter().zip(&declared) {
        let decl = lower_type(table, name, &declared, &ctx.push(name.qualified()))?;
        model.insert(decl);
    }
    Ok(model)
}

/// Parse and check every `[[type]]` name before any type expression is
/// resolved, so declarations may refer to each other in any order.
fn declared_names(file: &TypesFile, ctx: &ParseContext) -> Result<Vec<ClassName>> {
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(file.types.len());
    for table in &file.types {
        let raw = table.name.get_ref();
        let span = table.name.span();
        let name = ClassName::parse(raw)
            .filter(|name| !name.package().is_empty())
            .ok_or_else(|| {
                ctx.source().validation_error_at(
                    format!(
                        "type name '{}' must be fully qualified, e.g. 'com.example.Person'",
                        raw
                    ),
                    span.clone(),
                )
            })?;
        for segment in name.simple_names() {
            ctx.validate_name(segment, "type", span.clone())?;
        }
        if !seen.insert(name.clone()) {
            return Err(ctx
                .source()
                .validation_error_at(format!("type '{}' is declared twice", raw), span));
        }
        names.push(name);
    }
    Ok(names)
}

fn lower_type(
    table: &TypeTable,
    name: &ClassName,
    declared: &[ClassName],
    ctx: &ParseContext,
) -> Result<TypeDecl> {
    let kind = TypeKind::from(table.kind);
    let mut decl = TypeDecl::new(name.clone(), kind);
    decl.modifiers = Modifiers {
        visibility: table.visibility.into(),
        is_abstract: table.is_abstract && table.kind == KindEntry::Class,
        is_static: table.is_static,
        ..Modifiers::default()
    };

    let params = table
        .type_params
        .iter()
        .map(|param| {
            parse_type_param(param.get_ref())
                .map_err(|err| ctx.source().invalid_type_error(param.get_ref(), err.message, param.span()))
        })
        .collect::<Result<Vec<_>>>()?;
    let type_vars: Vec<String> = params.iter().map(|p| p.name.clone()).collect();
    let resolver = Resolver {
        package: name.package(),
        declared,
        type_vars: &type_vars,
        ctx,
    };

    for (param, raw) in params.iter().zip(&table.type_params) {
        ctx.validate_name(&param.name, "type parameter", raw.span())?;
        let mut type_param = TypeParam::new(&param.name);
        for bound in &param.bounds {
            type_param = type_param.bound(resolver.resolve(bound, raw)?);
        }
        decl.type_params.push(type_param);
    }

    if let Some(extends) = &table.extends {
        let supertype = resolver.declared_type(extends)?;
        match kind {
            TypeKind::Interface => decl.interfaces.push(supertype),
            TypeKind::Class | TypeKind::Enum => decl.superclass = Some(supertype),
        }
    }
    for implements in &table.implements {
        decl.interfaces.push(resolver.declared_type(implements)?);
    }
    decl.annotations = resolver.annotations(&table.annotations)?;

    for method in &table.methods {
        decl.methods.push(lower_method(method, kind, &resolver)?);
    }
    if !table.constructors.is_empty() && kind == TypeKind::Interface {
        return Err(ctx.source().validation_error_at(
            format!("interface '{}' cannot declare constructors", name),
            table.name.span(),
        ));
    }
    for constructor in &table.constructors {
        decl.constructors.push(lower_constructor(constructor, &resolver)?);
    }

    decl.member_types = table.member_types.clone();
    for member in declared.iter().filter(|d| d.enclosing().as_ref() == Some(name)) {
        let simple = member.simple_name().to_string();
        if !decl.member_types.contains(&simple) {
            decl.member_types.push(simple);
        }
    }
    Ok(decl)
}

fn lower_method(table: &MethodTable, kind: TypeKind, resolver: &Resolver<'_>) -> Result<MethodDecl> {
    let ctx = resolver.ctx;
    let name = table.name.get_ref();
    ctx.validate_name(name, "method", table.name.span())?;
    if table.is_default && kind != TypeKind::Interface {
        return Err(ctx.source().validation_error_at(
            format!("method '{}' is marked default outside an interface", name),
            table.name.span(),
        ));
    }

    let return_type = match &table.returns {
        Some(returns) => resolver.type_ref(returns, true)?,
        None => TypeRef::Void,
    };
    let params = table
        .params
        .iter()
        .map(|param| resolver.type_ref(param, false))
        .collect::<Result<Vec<_>>>()?;
    let is_abstract = table.is_abstract.unwrap_or(
        kind == TypeKind::Interface && !table.is_static && !table.is_default,
    );

    Ok(MethodDecl {
        name: name.clone(),
        params,
        return_type,
        modifiers: Modifiers {
            visibility: table.visibility.into(),
            is_abstract,
            is_static: table.is_static,
            is_final: table.is_final,
            is_default: table.is_default,
        },
        annotations: resolver.annotations(&table.annotations)?,
    })
}

fn lower_constructor(table: &ConstructorTable, resolver: &Resolver<'_>) -> Result<ConstructorDecl> {
    let params = table
        .params
        .iter()
        .map(|param| resolver.type_ref(param, false))
        .collect::<Result<Vec<_>>>()?;
    let mut calls = Vec::with_capacity(table.calls.len());
    for call in &table.calls {
        resolver
            .ctx
            .validate_name(call.get_ref(), "constructor call", call.span())?;
        calls.push(call.get_ref().clone());
    }
    Ok(ConstructorDecl {
        visibility: table.visibility.into(),
        params,
        calls,
    })
}

/// Resolves names in type expressions for one declaration.
///
/// Lookup order: the declaration's type variables, qualified names,
/// types declared in the same package, types declared anywhere in the
/// file, builders generated for declared types, then well-known library
/// types.
struct Resolver<'a> {
    package: &'a str,
    declared: &'a [ClassName],
    type_vars: &'a [String],
    ctx: &'a ParseContext,
}

impl Resolver<'_> {
    /// Parse and resolve a type expression.
    fn type_ref(&self, raw: &Spanned<String>, allow_void: bool) -> Result<TypeRef> {
        let expr = parse_type(raw.get_ref()).map_err(|err| {
            self.ctx
                .source()
                .invalid_type_error(raw.get_ref(), err.message, raw.span())
        })?;
        let ty = self.resolve(&expr, raw)?;
        if ty.is_void() && !allow_void {
            return Err(self.ctx.source().invalid_type_error(
                raw.get_ref(),
                "void is only allowed as a return type",
                raw.span(),
            ));
        }
        Ok(ty)
    }

    /// A supertype, which must be a class or interface type.
    fn declared_type(&self, raw: &Spanned<String>) -> Result<TypeRef> {
        let ty = self.type_ref(raw, false)?;
        if ty.class_name().is_none() {
            return Err(self.ctx.source().invalid_type_error(
                raw.get_ref(),
                "supertypes must be classes or interfaces",
                raw.span(),
            ));
        }
        Ok(ty)
    }

    fn resolve(&self, expr: &TypeExpr, raw: &Spanned<String>) -> Result<TypeRef> {
        let span = raw.span();
        match expr {
            TypeExpr::Named { name, args } if args.is_empty() => {
                if let Some(kind) = PrimitiveKind::from_keyword(name) {
                    return Ok(TypeRef::Primitive(kind));
                }
                if name == "void" {
                    return Ok(TypeRef::Void);
                }
                if self.type_vars.contains(name) {
                    return Ok(TypeRef::variable(name));
                }
                Ok(TypeRef::class(self.class(name, span)?))
            }
            TypeExpr::Named { name, args } => {
                let class = self.class(name, span)?;
                let args = args
                    .iter()
                    .map(|arg| self.resolve(arg, raw))
                    .collect::<Result<Vec<_>>>()?;
                if args.iter().any(|a| a.is_primitive() || a.is_void()) {
                    return Err(self.ctx.source().invalid_type_error(
                        raw.get_ref(),
                        "type arguments cannot be primitive",
                        raw.span(),
                    ));
                }
                Ok(TypeRef::generic(class, args))
            }
            TypeExpr::Array(component) => {
                let component = self.resolve(component, raw)?;
                if component.is_void() {
                    return Err(self.ctx.source().invalid_type_error(
                        raw.get_ref(),
                        "arrays of void are not allowed",
                        raw.span(),
                    ));
                }
                Ok(TypeRef::array(component))
            }
            TypeExpr::Wildcard(WildcardExpr::Unbounded) => Ok(TypeRef::Wildcard(Wildcard::Unbounded)),
            TypeExpr::Wildcard(WildcardExpr::Extends(bound)) => Ok(TypeRef::Wildcard(
                Wildcard::Extends(Box::new(self.resolve(bound, raw)?)),
            )),
            TypeExpr::Wildcard(WildcardExpr::Super(bound)) => Ok(TypeRef::Wildcard(
                Wildcard::Super(Box::new(self.resolve(bound, raw)?)),
            )),
        }
    }

    /// Resolve a possibly dotted class name.
    fn class(&self, name: &str, span: Range<usize>) -> Result<ClassName> {
        let unknown = || self.ctx.source().unknown_type_error(name, span.clone());
        let qualified = name
            .split('.')
            .next()
            .is_some_and(|first| first.starts_with(char::is_lowercase));
        if qualified {
            return ClassName::parse(name).ok_or_else(unknown);
        }

        let mut segments = name.split('.');
        let top = segments.next().ok_or_else(unknown)?;
        let candidates: Vec<ClassName> = self
            .declared
            .iter()
            .filter(|d| d.simple_names()[0] == top)
            .map(ClassName::top_level)
            .collect();
        let base = candidates
            .iter()
            .find(|c| c.package() == self.package)
            .or_else(|| candidates.first())
            .cloned()
            .or_else(|| self.generated_builder(top))
            .or_else(|| known::lookup(top))
            .ok_or_else(unknown)?;
        Ok(segments.fold(base, |class, segment| class.nested(segment)))
    }

    /// `Person_Builder` names the builder generated for a declared
    /// `Person`, which does not exist until generation runs.
    fn generated_builder(&self, simple_name: &str) -> Option<ClassName> {
        let flat = simple_name.strip_suffix("_Builder")?;
        self.declared
            .iter()
            .filter(|d| d.flat_name() == flat)
            .map(|d| d.peer(simple_name))
            .find(|c| c.package() == self.package)
    }

    fn annotations(&self, raw: &[Spanned<String>]) -> Result<Vec<Annotation>> {
        raw.iter()
            .map(|annotation| -> Result<Annotation> {
                let text = annotation.get_ref().trim().trim_start_matches('@');
                let (name, args) = match text.split_once('(') {
                    Some((name, rest)) => {
                        let args = rest.strip_suffix(')').ok_or_else(|| {
                            self.ctx.source().validation_error_at(
                                format!("annotation '{}' is missing a closing ')'", text),
                                annotation.span(),
                            )
                        })?;
                        (name.trim(), Some(args.trim()))
                    }
                    None => (text, None),
                };
                let class = self.class(name, annotation.span())?;
                Ok(match args {
                    Some(args) => Annotation::with_args(class, args),
                    None => Annotation::new(class),
                })
            })
            .collect()
    }
}
