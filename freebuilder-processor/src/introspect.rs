//! Method resolution across a type and its supertypes.

use std::collections::{HashMap, HashSet};

use freebuilder_model::{ClassName, MethodDecl, TypeDecl, TypeKind, TypeModel, TypeRef, Visibility};
use indexmap::IndexMap;

use crate::error::{AnalysisError, Result};

/// A method visible on a type, with type variables of the declaring
/// supertype replaced by the arguments the subtype supplies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMethod {
    pub method: MethodDecl,
    /// The type that declares the method.
    pub owner: ClassName,
    /// Whether `owner` is a class rather than an interface.
    pub owner_is_class: bool,
}

impl ResolvedMethod {
    pub fn name(&self) -> &str {
        &self.method.name
    }

    pub fn params(&self) -> &[TypeRef] {
        &self.method.params
    }
}

/// Supertypes every Java type may have without them being modelled.
fn is_implicit_supertype(name: &ClassName) -> bool {
    matches!(
        name.qualified().as_str(),
        "java.lang.Object" | "java.io.Serializable" | "java.lang.Cloneable"
    )
}

/// Collects the most specific set of methods reachable from a type.
///
/// Results are recomputed on every call; nothing is cached between types.
pub struct Introspector<'a> {
    model: &'a dyn TypeModel,
    tolerated: Vec<ClassName>,
}

impl<'a> Introspector<'a> {
    pub fn new(model: &'a dyn TypeModel) -> Self {
        Self {
            model,
            tolerated: Vec::new(),
        }
    }

    /// Allow `name` to appear as a supertype without being in the model.
    ///
    /// Used for the generated builder superclass, which does not exist yet
    /// when the user's builder is introspected.
    pub fn tolerate(mut self, name: ClassName) -> Self {
        self.tolerated.push(name);
        self
    }

    /// All non-static methods visible on `decl`, one per signature.
    ///
    /// Methods sharing a name and erased parameter list are merged, keeping
    /// the declaration from the type that is a subtype of every other
    /// declarer. Without such a type, a class method beats interface
    /// methods; failing that, the first declaration met in a depth-first,
    /// superclass-before-interfaces walk wins. Results are in that same
    /// walk order.
    pub fn methods_on(&self, decl: &TypeDecl) -> Result<Vec<ResolvedMethod>> {
        let mut walk = Walk {
            introspector: self,
            root: decl.name.clone(),
            found: Vec::new(),
            ancestors: HashMap::new(),
        };
        walk.visit(decl, &HashMap::new())?;

        let mut groups: IndexMap<(String, Vec<TypeRef>), Vec<ResolvedMethod>> = IndexMap::new();
        for method in walk.found {
            let key = (
                method.method.name.clone(),
                method.method.params.iter().map(TypeRef::erasure).collect(),
            );
            groups.entry(key).or_default().push(method);
        }

        let ancestors = walk.ancestors;
        let is_subtype = |sub: &ClassName, sup: &ClassName| {
            sub == sup || ancestors.get(sub).is_some_and(|a| a.contains(sup))
        };

        Ok(groups
            .into_values()
            .filter_map(|candidates| {
                let most_specific = candidates
                    .iter()
                    .position(|m| candidates.iter().all(|o| is_subtype(&m.owner, &o.owner)))
                    .or_else(|| candidates.iter().position(|m| m.owner_is_class))
                    .unwrap_or(0);
                candidates.into_iter().nth(most_specific)
            })
            .collect())
    }

    fn is_tolerated(&self, name: &ClassName) -> bool {
        is_implicit_supertype(name) || self.tolerated.contains(name)
    }
}

struct Walk<'w, 'a> {
    introspector: &'w Introspector<'a>,
    root: ClassName,
    found: Vec<ResolvedMethod>,
    /// Transitive supertypes of every visited type.
    ancestors: HashMap<ClassName, HashSet<ClassName>>,
}

impl Walk<'_, '_> {
    /// Visit `decl`, returning its transitive supertypes.
    fn visit(
        &mut self,
        decl: &TypeDecl,
        bindings: &HashMap<String, TypeRef>,
    ) -> Result<HashSet<ClassName>> {
        if let Some(known) = self.ancestors.get(&decl.name) {
            return Ok(known.clone());
        }
        // Mark before recursing so cyclic models terminate.
        self.ancestors.insert(decl.name.clone(), HashSet::new());

        let is_root = decl.name == self.root;
        for method in &decl.methods {
            if method.is_static() || (!is_root && method.visibility() == Visibility::Private) {
                continue;
            }
            self.found.push(ResolvedMethod {
                method: method.substitute(bindings),
                owner: decl.name.clone(),
                owner_is_class: decl.kind == TypeKind::Class,
            });
        }

        let mut ancestors = HashSet::new();
        for supertype in decl.supertypes() {
            let supertype = supertype.substitute(bindings);
            let Some(name) = supertype.class_name() else {
                continue;
            };
            ancestors.insert(name.clone());
            match self.introspector.model.lookup(name) {
                Some(super_decl) => {
                    let super_bindings = super_decl.bindings_for(&supertype);
                    ancestors.extend(self.visit(super_decl, &super_bindings)?);
                }
                None if self.introspector.is_tolerated(name) => {}
                None => {
                    return Err(AnalysisError::UnknownSupertype {
                        name: decl.name.qualified(),
                        supertype: supertype.to_string(),
                    });
                }
            }
        }

        self.ancestors.insert(decl.name.clone(), ancestors.clone());
        Ok(ancestors)
    }
}
