//! Semantic model of one analysis pass.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::ids::{DeclId, ScopeId};
use super::lower::{LoweredFile, lower};
use super::resolve::{ExternalSymbols, ScopeChain, SymbolIndex, SymbolOracle};
use super::scope::{ScopeKind, ScopeTree};
use super::symbols::{Symbol, SymbolKind, SymbolOrigin};
use crate::base::{FileId, TextSize};
use crate::syntax::Parse;

/// Scope tree, per-file tables and symbol tables built from one set of
/// parsed files. Immutable once built; an edit requires a new model.
#[derive(Debug)]
pub struct SemanticModel {
    tree: ScopeTree,
    files: Vec<LoweredFile>,
    file_slots: FxHashMap<FileId, usize>,
    index: SymbolIndex,
    external: Arc<ExternalSymbols>,
}

impl SemanticModel {
    pub fn build(files: &[(FileId, &Parse)], external: Arc<ExternalSymbols>) -> Self {
        let (tree, files) = lower(files);
        let index = SymbolIndex::build(&tree);
        let file_slots = files
            .iter()
            .enumerate()
            .map(|(slot, f)| (f.file, slot))
            .collect();
        Self {
            tree,
            files,
            file_slots,
            index,
            external,
        }
    }

    pub fn tree(&self) -> &ScopeTree {
        &self.tree
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    pub fn external(&self) -> &ExternalSymbols {
        &self.external
    }

    pub fn file(&self, file: FileId) -> Option<&LoweredFile> {
        self.file_slots.get(&file).map(|&slot| &self.files[slot])
    }

    pub fn files(&self) -> &[LoweredFile] {
        &self.files
    }

    /// Local and external symbols behind one lookup.
    pub fn oracle(&self) -> SymbolOracle<'_> {
        SymbolOracle::new()
            .with(&self.index)
            .with(self.external.as_ref())
    }

    pub fn scope_chain(&self, file: FileId, scope: ScopeId) -> ScopeChain {
        ScopeChain::new(&self.tree, self.file(file), scope)
    }

    /// Chain visible from a text position.
    pub fn chain_at(&self, file: FileId, offset: TextSize) -> ScopeChain {
        let scope = self
            .file(file)
            .map(|f| f.scope_at(offset))
            .unwrap_or(ScopeId::ROOT);
        self.scope_chain(file, scope)
    }

    /// Chain of the scope a declaration appears in.
    pub fn decl_chain(&self, decl: DeclId) -> ScopeChain {
        let data = self.tree.decl(decl);
        self.scope_chain(data.file, data.scope)
    }

    /// The symbol a declaration defines; `None` for a malformed one.
    pub fn decl_symbol(&self, decl: DeclId) -> Option<Symbol> {
        let data = self.tree.decl(decl);
        let body = self.tree.scope(data.body?);
        let kind = match body.kind {
            ScopeKind::Type(kind) => SymbolKind::Type(kind),
            ScopeKind::Namespace => SymbolKind::Namespace,
        };
        Some(Symbol {
            name: body.name.clone(),
            qualified_name: body.qualified_name.clone(),
            kind,
            origin: SymbolOrigin::Source,
        })
    }
}
