//! Choosing a replacement name that collides with nothing.
//!
//! The naive fix prepends `I`. That name is rejected if it is already
//! taken by a sibling declaration, a containing type, a member of the
//! declaration itself, or anything unqualified lookup can reach from the
//! declaration's scope (external symbols included). A rejected candidate
//! gets the lowest free numeric suffix: `IFoo1`, `IFoo2`, ...

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::{debug, warn};

use super::ids::DeclId;
use super::model::SemanticModel;
use super::naming::is_conforming;
use super::resolve::{Resolver, ScopeChain, SymbolOracle};
use crate::error::{FixError, FixResult};

/// Default ceiling for the suffix search.
pub const DEFAULT_MAX_SUFFIX_ATTEMPTS: u32 = 10_000;

/// Names a replacement must avoid.
pub struct CollisionSet<'a> {
    local: FxHashSet<SmolStr>,
    chain: ScopeChain,
    resolver: Resolver<'a>,
}

impl CollisionSet<'_> {
    pub fn contains(&self, name: &str) -> bool {
        self.local.contains(name) || self.resolver.is_visible(&self.chain, name)
    }
}

/// `name` with the `I` prefix prepended.
pub fn naive_candidate(name: &str) -> String {
    format!("I{name}")
}

/// Computes replacement names against one [`SemanticModel`].
pub struct ConflictResolver<'a> {
    model: &'a SemanticModel,
    oracle: SymbolOracle<'a>,
    max_attempts: u32,
}

impl<'a> ConflictResolver<'a> {
    pub fn new(model: &'a SemanticModel) -> Self {
        Self {
            model,
            oracle: model.oracle(),
            max_attempts: DEFAULT_MAX_SUFFIX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Everything `decl`'s new name must not be.
    pub fn collision_set(&self, decl: DeclId) -> FixResult<CollisionSet<'_>> {
        let tree = self.model.tree();
        let data = tree.get_decl(decl).ok_or(FixError::UnknownDeclaration)?;
        let body = data.body.ok_or(FixError::MalformedDeclaration)?;

        let mut local: FxHashSet<SmolStr> = tree.sibling_names(decl).cloned().collect();

        // Containing types, and what they declare directly.
        for scope in tree.ancestors(data.scope) {
            let scope = tree.scope(scope);
            if !scope.is_type() {
                continue;
            }
            local.insert(scope.name.clone());
            local.extend(scope.members.iter().map(|m| m.name.clone()));
            local.extend(scope.type_params.iter().cloned());
        }

        // Members of the declaration itself, across partial parts.
        let own = tree.scope(body);
        local.extend(own.members.iter().map(|m| m.name.clone()));
        local.extend(own.type_params.iter().cloned());
        local.extend(
            own.declarations
                .iter()
                .filter_map(|&d| tree.decl(d).name.clone()),
        );

        Ok(CollisionSet {
            local,
            chain: self.model.decl_chain(decl),
            resolver: Resolver::new(&self.oracle),
        })
    }

    /// The conflict-free `I`-prefixed name for a non-conforming interface.
    pub fn resolve(&self, decl: DeclId) -> FixResult<SmolStr> {
        let data = self
            .model
            .tree()
            .get_decl(decl)
            .ok_or(FixError::UnknownDeclaration)?;
        let name = data.name.as_ref().ok_or(FixError::MalformedDeclaration)?;
        if !data.is_interface() {
            return Err(FixError::NotAnInterface {
                name: name.to_string(),
            });
        }
        if is_conforming(name) {
            return Err(FixError::AlreadyConforming {
                name: name.to_string(),
            });
        }

        let candidate = naive_candidate(name);
        let taken = self.collision_set(decl)?;
        self.first_free(&candidate, |n| taken.contains(n))
    }

    /// `candidate`, or the lowest suffixed form of it `taken` rejects none of.
    pub fn first_free(
        &self,
        candidate: &str,
        taken: impl Fn(&str) -> bool,
    ) -> FixResult<SmolStr> {
        if !taken(candidate) {
            return Ok(SmolStr::new(candidate));
        }
        debug!(candidate, "candidate name is taken; searching for a suffix");

        for suffix in 1..=self.max_attempts {
            let next = format!("{candidate}{suffix}");
            if !taken(&next) {
                return Ok(SmolStr::new(next));
            }
        }

        warn!(candidate, attempts = self.max_attempts, "no free name within the attempt limit");
        Err(FixError::ResolutionExhausted {
            candidate: candidate.to_string(),
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::base::FileId;
    use crate::hir::{ExternalSymbols, SymbolKind};
    use crate::syntax::parse;
    use rstest::rstest;

    fn model(text: &str, external: ExternalSymbols) -> SemanticModel {
        let parse = parse(text);
        SemanticModel::build(&[(FileId::new(0), &parse)], Arc::new(external))
    }

    fn decl(model: &SemanticModel, name: &str) -> DeclId {
        model
            .tree()
            .decls()
            .find(|(_, d)| d.name.as_deref() == Some(name))
            .map(|(id, _)| id)
            .unwrap()
    }

    fn resolved(text: &str) -> String {
        let model = model(text, ExternalSymbols::new());
        let foo = decl(&model, "Foo");
        ConflictResolver::new(&model).resolve(foo).unwrap().to_string()
    }

    #[rstest]
    #[case::no_conflict("interface Foo {}", "IFoo")]
    #[case::sibling("interface Foo {} interface IFoo {}", "IFoo1")]
    #[case::own_member("interface Foo { int IFoo { get; } }", "IFoo1")]
    #[case::own_method("interface Foo { void IFoo(); }", "IFoo1")]
    #[case::own_type_param("interface Foo<IFoo> {}", "IFoo1")]
    #[case::nested_sibling("class Outer { interface Foo {} interface IFoo {} }", "IFoo1")]
    #[case::containing_type("class IFoo { interface Foo {} }", "IFoo1")]
    #[case::outer_containing_type("class IFoo { class Mid { interface Foo {} } }", "IFoo1")]
    #[case::containing_member("class Outer { interface Foo {} private int IFoo => 0; }", "IFoo1")]
    #[case::two_taken("interface Foo {} interface IFoo {} class IFoo1 {}", "IFoo2")]
    #[case::other_namespace_is_free("namespace A { interface IFoo {} } namespace B { interface Foo {} }", "IFoo")]
    #[case::imported_namespace("using A; namespace A { interface IFoo {} } namespace B { interface Foo {} }", "IFoo1")]
    #[case::outer_namespace("namespace A { interface IFoo {} namespace B { interface Foo {} } }", "IFoo1")]
    fn test_resolve(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(resolved(text), expected);
    }

    #[test]
    fn test_external_symbols_collide() {
        let external = ExternalSymbols::new().with_type("System.IDisposable", SymbolKind::INTERFACE);
        let model = model("namespace System { public interface Disposable {} }", external);
        let target = decl(&model, "Disposable");

        assert_eq!(ConflictResolver::new(&model).resolve(target).unwrap(), "IDisposable1");
    }

    #[test]
    fn test_external_symbols_imported_collide() {
        let external = ExternalSymbols::new().with_type("System.IDisposable", SymbolKind::INTERFACE);
        let model = model("using System; namespace N { interface Disposable {} }", external);
        let target = decl(&model, "Disposable");

        assert_eq!(ConflictResolver::new(&model).resolve(target).unwrap(), "IDisposable1");
    }

    #[test]
    fn test_search_ceiling() {
        let model = model("interface Foo {} interface IFoo {} interface IFoo1 {}", ExternalSymbols::new());
        let foo = decl(&model, "Foo");
        let err = ConflictResolver::new(&model)
            .with_max_attempts(1)
            .resolve(foo)
            .unwrap_err();

        assert!(matches!(err, FixError::ResolutionExhausted { attempts: 1, .. }));
    }

    #[test]
    fn test_first_free_is_lowest_suffix() {
        let model = model("", ExternalSymbols::new());
        let resolver = ConflictResolver::new(&model);
        let taken = ["IFoo", "IFoo1", "IFoo2", "IFoo4"];

        let name = resolver.first_free("IFoo", |n| taken.contains(&n)).unwrap();
        assert_eq!(name, "IFoo3");
    }

    #[rstest]
    #[case("interface IFoo {}", "IFoo")]
    #[case("class Foo {}", "Foo")]
    fn test_resolve_rejects(#[case] text: &str, #[case] name: &str) {
        let model = model(text, ExternalSymbols::new());
        let target = decl(&model, name);
        let err = ConflictResolver::new(&model).resolve(target).unwrap_err();

        assert!(matches!(
            err,
            FixError::AlreadyConforming { .. } | FixError::NotAnInterface { .. }
        ));
    }
}
