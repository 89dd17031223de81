//! Semantic layer: scopes, symbols, name resolution and the naming rule.
//!
//! ```text
//! Parse ──lower──▶ ScopeTree + LoweredFile tables
//!                    │
//!                    ├─▶ SymbolIndex ─┐
//!                    │                ├─▶ SymbolOracle ─▶ Resolver
//!                    │ ExternalSymbols┘
//!                    ▼
//!         ConventionChecker ─▶ findings
//!         ConflictResolver  ─▶ replacement names
//! ```
//!
//! Everything here is rebuilt per analysis pass from a read-only snapshot
//! of the sources.

mod conflict;
mod diagnostics;
mod ids;
mod lower;
mod model;
mod naming;
mod resolve;
mod scope;
mod source;
mod symbols;

pub use conflict::{CollisionSet, ConflictResolver, DEFAULT_MAX_SUFFIX_ATTEMPTS, naive_candidate};
pub use diagnostics::{DiagnosticCollector, Finding, Severity, codes};
pub use ids::{DeclId, ScopeId};
pub use lower::{DeclToken, Import, ImportKind, LoweredFile, lower};
pub use model::SemanticModel;
pub use naming::{ConventionChecker, NATIVE_METHODS_SUFFIX, is_conforming, is_native_import_exempt};
pub use resolve::{
    ExternalSymbols, ResolveResult, Resolver, ScopeChain, ScopeLevel, SymbolIndex, SymbolLookup,
    SymbolOracle,
};
pub use scope::{Declaration, Marker, MemberEntry, ScopeData, ScopeKind, ScopeTree};
pub use source::FileSet;
pub use symbols::{Symbol, SymbolKind, SymbolOrigin, qualify, split_qualified};
