//! Name resolution: the symbol oracle and scope-chain lookup.
//!
//! # Architecture
//!
//! Lookup is split in two layers:
//!
//! 1. **Symbol tables** answer "what is named `x` directly inside container
//!    `C`?" through the [`SymbolLookup`] trait. [`SymbolIndex`] answers for
//!    the analysed sources, [`ExternalSymbols`] for referenced assemblies,
//!    and [`SymbolOracle`] stacks several tables behind the same trait.
//! 2. **The [`Resolver`]** walks a [`ScopeChain`] outwards and applies the
//!    C# lookup order at each level: members, then `using` aliases, then
//!    `using` namespace and static imports.
//!
//! Callers never branch on where a symbol was defined; the origin is
//! carried on the returned [`Symbol`].

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::ids::ScopeId;
use super::lower::{Import, ImportKind, LoweredFile};
use super::scope::{ScopeKind, ScopeTree};
use super::symbols::{Symbol, SymbolKind, SymbolOrigin, qualify, split_qualified};
use crate::syntax::MemberKind;

// ============================================================================
// LOOKUP TRAIT
// ============================================================================

/// Answers direct-member queries against a set of symbols.
///
/// Containers are dotted qualified names; the global namespace is `""`.
pub trait SymbolLookup: Send + Sync {
    /// Symbols named `name` declared directly inside `container`.
    fn lookup_in(&self, container: &str, name: &str) -> Vec<Symbol>;

    /// Whether `qualified` names a namespace or type.
    fn has_container(&self, qualified: &str) -> bool {
        if qualified.is_empty() {
            return true;
        }
        let (container, name) = split_qualified(qualified);
        self.lookup_in(container, name)
            .iter()
            .any(|s| s.kind.is_container())
    }
}

// ============================================================================
// SYMBOL TABLES
// ============================================================================

/// Container → simple name → symbols.
#[derive(Clone, Debug, Default)]
struct SymbolTable {
    by_container: FxHashMap<Arc<str>, FxHashMap<SmolStr, Vec<Symbol>>>,
    len: usize,
}

impl SymbolTable {
    fn insert(&mut self, container: &str, symbol: Symbol) {
        let slot = self
            .by_container
            .entry(Arc::from(container))
            .or_default()
            .entry(symbol.name.clone())
            .or_default();
        if !slot.contains(&symbol) {
            slot.push(symbol);
            self.len += 1;
        }
    }

    fn get(&self, container: &str, name: &str) -> &[Symbol] {
        self.by_container
            .get(container)
            .and_then(|names| names.get(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Symbols declared in the analysed sources.
#[derive(Clone, Debug, Default)]
pub struct SymbolIndex {
    table: SymbolTable,
}

impl SymbolIndex {
    /// Index every namespace, type, member and type parameter of `tree`.
    pub fn build(tree: &ScopeTree) -> Self {
        let mut table = SymbolTable::default();

        for (_, scope) in tree.scopes() {
            let Some(parent) = scope.parent else {
                continue;
            };
            let container = &tree.scope(parent).qualified_name;
            let kind = match scope.kind {
                ScopeKind::Namespace => SymbolKind::Namespace,
                ScopeKind::Type(kind) => SymbolKind::Type(kind),
            };
            table.insert(
                container,
                Symbol::new(container, scope.name.clone(), kind, SymbolOrigin::Source),
            );

            let own = &scope.qualified_name;
            for member in &scope.members {
                table.insert(
                    own,
                    Symbol::new(
                        own,
                        member.name.clone(),
                        SymbolKind::Member(member.kind),
                        SymbolOrigin::Source,
                    ),
                );
            }
            for param in &scope.type_params {
                table.insert(
                    own,
                    Symbol::new(own, param.clone(), SymbolKind::TypeParameter, SymbolOrigin::Source),
                );
            }
        }

        Self { table }
    }

    pub fn len(&self) -> usize {
        self.table.len
    }

    pub fn is_empty(&self) -> bool {
        self.table.len == 0
    }
}

impl SymbolLookup for SymbolIndex {
    fn lookup_in(&self, container: &str, name: &str) -> Vec<Symbol> {
        self.table.get(container, name).to_vec()
    }
}

/// Read-only symbols from outside the analysed sources, such as the types
/// of referenced assemblies.
///
/// ```
/// use namecheck::hir::{ExternalSymbols, SymbolKind, SymbolLookup};
///
/// let externals = ExternalSymbols::new().with_type("System.IDisposable", SymbolKind::INTERFACE);
/// assert_eq!(externals.lookup_in("System", "IDisposable").len(), 1);
/// assert!(externals.has_container("System"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExternalSymbols {
    table: SymbolTable,
}

impl ExternalSymbols {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, qualified: &str) -> Self {
        self.add(qualified, SymbolKind::Namespace);
        self
    }

    pub fn with_type(mut self, qualified: &str, kind: SymbolKind) -> Self {
        self.add(qualified, kind);
        self
    }

    /// A member of an already registered external type.
    pub fn with_member(mut self, type_name: &str, member: &str, kind: MemberKind) -> Self {
        self.add(&qualify(type_name, member), SymbolKind::Member(kind));
        self
    }

    /// Register `qualified`, creating missing parent namespaces.
    pub fn add(&mut self, qualified: &str, kind: SymbolKind) {
        let (container, name) = split_qualified(qualified);
        if !container.is_empty() && !self.has_container(container) {
            self.add(container, SymbolKind::Namespace);
        }
        self.table.insert(
            container,
            Symbol::new(container, name, kind, SymbolOrigin::External),
        );
    }

    pub fn len(&self) -> usize {
        self.table.len
    }

    pub fn is_empty(&self) -> bool {
        self.table.len == 0
    }
}

impl SymbolLookup for ExternalSymbols {
    fn lookup_in(&self, container: &str, name: &str) -> Vec<Symbol> {
        self.table.get(container, name).to_vec()
    }
}

/// Several symbol tables queried as one.
///
/// A namespace declared both locally and externally is reported once, as
/// the source namespace. The same applies to a type declared in both
/// places: the source declaration shadows the external one.
#[derive(Clone, Default)]
pub struct SymbolOracle<'a> {
    sources: Vec<&'a dyn SymbolLookup>,
}

impl<'a> SymbolOracle<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: &'a dyn SymbolLookup) -> Self {
        self.sources.push(source);
        self
    }
}

impl SymbolLookup for SymbolOracle<'_> {
    fn lookup_in(&self, container: &str, name: &str) -> Vec<Symbol> {
        let mut hits: Vec<Symbol> = Vec::new();
        for source in &self.sources {
            for symbol in source.lookup_in(container, name) {
                if !hits.contains(&symbol) {
                    hits.push(symbol);
                }
            }
        }
        prefer_source(hits)
    }
}

/// Drop external symbols shadowed by a source symbol of the same path and
/// kind.
fn prefer_source(mut hits: Vec<Symbol>) -> Vec<Symbol> {
    if hits.len() < 2 {
        return hits;
    }
    let shadowed: Vec<bool> = hits
        .iter()
        .map(|h| {
            h.is_external()
                && hits.iter().any(|o| {
                    !o.is_external() && o.qualified_name == h.qualified_name && o.kind == h.kind
                })
        })
        .collect();
    let mut flags = shadowed.into_iter();
    hits.retain(|_| !flags.next().unwrap_or(false));
    hits
}

// ============================================================================
// SCOPE CHAIN
// ============================================================================

/// One level of a [`ScopeChain`].
#[derive(Clone, Debug)]
pub struct ScopeLevel {
    pub scope: ScopeId,
    /// Qualified name of the scope.
    pub container: Arc<str>,
    pub is_type: bool,
    /// Directives written directly in this scope, in the file being looked at.
    pub imports: Vec<Import>,
}

/// The scopes visible from a position, innermost first, with the `using`
/// directives in effect at each level.
#[derive(Clone, Debug)]
pub struct ScopeChain {
    levels: Vec<ScopeLevel>,
}

impl ScopeChain {
    /// Chain from `scope` to the global namespace. Imports are taken from
    /// `file` when given.
    pub fn new(tree: &ScopeTree, file: Option<&LoweredFile>, scope: ScopeId) -> Self {
        let levels = tree
            .ancestors(scope)
            .map(|id| {
                let data = tree.scope(id);
                ScopeLevel {
                    scope: id,
                    container: data.qualified_name.clone(),
                    is_type: data.is_type(),
                    imports: file
                        .map(|f| f.imports_in(id).cloned().collect())
                        .unwrap_or_default(),
                }
            })
            .collect();
        Self { levels }
    }

    /// A chain with only the global namespace and no imports.
    pub fn global() -> Self {
        Self {
            levels: vec![ScopeLevel {
                scope: ScopeId::ROOT,
                container: Arc::from(""),
                is_type: false,
                imports: Vec::new(),
            }],
        }
    }

    pub fn levels(&self) -> &[ScopeLevel] {
        &self.levels
    }

    pub fn innermost(&self) -> Option<&ScopeLevel> {
        self.levels.first()
    }
}

// ============================================================================
// RESOLUTION RESULT
// ============================================================================

/// Result of resolving a reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// Successfully resolved to a single symbol.
    Found(Symbol),
    /// Resolved to multiple candidates (ambiguous).
    Ambiguous(Vec<Symbol>),
    /// Could not resolve the reference.
    NotFound,
}

impl ResolveResult {
    fn from_hits(mut hits: Vec<Symbol>) -> Self {
        match hits.len() {
            0 => ResolveResult::NotFound,
            1 => ResolveResult::Found(hits.remove(0)),
            _ => ResolveResult::Ambiguous(hits),
        }
    }

    /// Get the resolved symbol if unambiguous.
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            ResolveResult::Found(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ResolveResult::Found(_))
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ResolveResult::Ambiguous(_))
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Unqualified and qualified name lookup over a [`SymbolLookup`].
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    oracle: &'a dyn SymbolLookup,
}

impl<'a> Resolver<'a> {
    pub fn new(oracle: &'a dyn SymbolLookup) -> Self {
        Self { oracle }
    }

    /// Resolve a simple name from the innermost level of `chain` outwards.
    /// The first level with any hit decides the result.
    pub fn resolve(&self, chain: &ScopeChain, name: &str) -> ResolveResult {
        let levels = chain.levels();
        for depth in 0..levels.len() {
            let hits = self.level_hits(&levels[depth..], name);
            if !hits.is_empty() {
                return ResolveResult::from_hits(hits);
            }
        }
        ResolveResult::NotFound
    }

    /// Resolve a dotted name. The first segment is looked up like
    /// [`resolve`](Self::resolve), or in the global namespace when
    /// `is_global`; later segments are members of the previous one.
    pub fn resolve_path<S: AsRef<str>>(
        &self,
        chain: &ScopeChain,
        segments: &[S],
        is_global: bool,
    ) -> ResolveResult {
        let Some((first, rest)) = segments.split_first() else {
            return ResolveResult::NotFound;
        };

        let mut current = if is_global {
            ResolveResult::from_hits(self.oracle.lookup_in("", first.as_ref()))
        } else {
            self.resolve(chain, first.as_ref())
        };

        for segment in rest {
            current = match current {
                ResolveResult::Found(symbol) if symbol.kind.is_container() => ResolveResult::from_hits(
                    self.oracle.lookup_in(&symbol.qualified_name, segment.as_ref()),
                ),
                ResolveResult::Ambiguous(candidates) => return ResolveResult::Ambiguous(candidates),
                _ => return ResolveResult::NotFound,
            };
        }
        current
    }

    /// Whether any level of `chain` makes `name` visible, whatever it binds to.
    pub fn is_visible(&self, chain: &ScopeChain, name: &str) -> bool {
        let levels = chain.levels();
        (0..levels.len()).any(|depth| !self.level_hits(&levels[depth..], name).is_empty())
    }

    /// Hits for `name` at `levels[0]`; the rest of the slice is the outer
    /// context `using` targets are resolved in.
    fn level_hits(&self, levels: &[ScopeLevel], name: &str) -> Vec<Symbol> {
        let level = &levels[0];

        let direct = self.oracle.lookup_in(&level.container, name);
        if !direct.is_empty() {
            return direct;
        }

        for import in &level.imports {
            if let ImportKind::Alias(alias) = &import.kind {
                if alias == name {
                    return self.import_target(levels, import).into_iter().collect();
                }
            }
        }

        let mut hits: Vec<Symbol> = Vec::new();
        for import in &level.imports {
            let keep: fn(&Symbol) -> bool = match import.kind {
                ImportKind::Namespace => |s| s.kind.is_type(),
                ImportKind::Static => {
                    |s| !matches!(s.kind, SymbolKind::Namespace | SymbolKind::TypeParameter)
                }
                ImportKind::Alias(_) => continue,
            };
            let Some(target) = self.import_target(levels, import) else {
                continue;
            };
            for symbol in self.oracle.lookup_in(&target.qualified_name, name) {
                if keep(&symbol) && !hits.contains(&symbol) {
                    hits.push(symbol);
                }
            }
        }
        hits
    }

    /// The namespace or type a `using` directive names. Relative targets
    /// are tried against each enclosing namespace, innermost first.
    fn import_target(&self, levels: &[ScopeLevel], import: &Import) -> Option<Symbol> {
        let dotted = import
            .target
            .iter()
            .map(SmolStr::as_str)
            .collect::<Vec<_>>()
            .join(".");

        let containers: Vec<&str> = if import.is_global {
            vec![""]
        } else {
            levels
                .iter()
                .filter(|l| !l.is_type)
                .map(|l| &*l.container)
                .collect()
        };

        containers.into_iter().find_map(|outer| {
            let qualified = qualify(outer, &dotted);
            let (container, name) = split_qualified(&qualified);
            self.oracle
                .lookup_in(container, name)
                .into_iter()
                .find(|s| s.kind.is_container())
        })
    }
}
