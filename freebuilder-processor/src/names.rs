//! Choosing names for generated builder methods.

use freebuilder_model::{TypeRef, Visibility};
use serde::Serialize;
use tracing::debug;

use crate::{
    error::{AnalysisError, Result},
    introspect::ResolvedMethod,
};

/// Upper bound on `_nameImplN` candidates before giving up.
const MAX_MANGLED: usize = 100;

/// The name and access level picked for a generated method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameAndVisibility {
    pub name: String,
    #[serde(serialize_with = "serialize_visibility")]
    pub visibility: Visibility,
}

impl NameAndVisibility {
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
        }
    }
}

fn serialize_visibility<S: serde::Serializer>(
    visibility: &Visibility,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(match visibility {
        Visibility::Public => "public",
        Visibility::Protected => "protected",
        Visibility::PackagePrivate => "package-private",
        Visibility::Private => "private",
    })
}

/// Pick a name for a generated method that will not collide with what the
/// user's builder already declares.
///
/// `existing` are the methods visible on the user's builder. A user method
/// with the preferred name and the same parameter types and return type is
/// an override and keeps its name, at most package-private if it was
/// protected. Any other clash moves the generated method to
/// `_<preferred>Impl`, `_<preferred>Impl2`, ... with package-private access.
pub fn pick_name(
    existing: &[ResolvedMethod],
    return_type: &TypeRef,
    preferred: &str,
    params: &[TypeRef],
) -> Result<NameAndVisibility> {
    let Some(clash) = find_clash(existing, preferred, params) else {
        return Ok(NameAndVisibility::public(preferred));
    };

    let method = &clash.method;
    let compatible = method.visibility() != Visibility::Private
        && !method.modifiers.is_final
        && erasures(&method.params) == erasures(params)
        && method.return_type.erasure() == return_type.erasure();

    if compatible {
        let visibility = match method.visibility() {
            Visibility::Public => Visibility::Public,
            _ => Visibility::PackagePrivate,
        };
        debug!(name = preferred, ?visibility, "reusing user-declared method name");
        return Ok(NameAndVisibility {
            name: preferred.to_string(),
            visibility,
        });
    }

    for n in 1..=MAX_MANGLED {
        let candidate = if n == 1 {
            format!("_{}Impl", preferred)
        } else {
            format!("_{}Impl{}", preferred, n)
        };
        if find_clash(existing, &candidate, params).is_none() {
            debug!(preferred, chosen = %candidate, "mangled generated method name");
            return Ok(NameAndVisibility {
                name: candidate,
                visibility: Visibility::PackagePrivate,
            });
        }
    }

    Err(AnalysisError::Internal(format!(
        "no free name for generated method '{}'",
        preferred
    )))
}

/// A user method with `name` and the arity of `params`, preferring one
/// whose erased parameters match exactly.
fn find_clash<'m>(
    existing: &'m [ResolvedMethod],
    name: &str,
    params: &[TypeRef],
) -> Option<&'m ResolvedMethod> {
    let same_arity = |m: &&ResolvedMethod| m.name() == name && m.params().len() == params.len();
    let wanted = erasures(params);
    existing
        .iter()
        .filter(same_arity)
        .find(|m| erasures(m.params()) == wanted)
        .or_else(|| existing.iter().find(same_arity))
}

fn erasures(types: &[TypeRef]) -> Vec<TypeRef> {
    types.iter().map(TypeRef::erasure).collect()
}
