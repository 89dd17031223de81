//! Lowering parsed files into the shared [`ScopeTree`].
//!
//! Besides filling the arena, lowering keeps three per-file tables that
//! later passes need to bind tokens: which text ranges belong to which
//! scope, which `using` directives apply where, and which identifier
//! tokens are declaration names rather than uses.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;

use super::ids::{DeclId, ScopeId};
use super::scope::{Declaration, Marker, ScopeKind, ScopeTree};
use crate::base::{FileId, TextRange, TextSize};
use crate::syntax::{Item, Member, MemberKind, Parse, TypeDecl, TypeKind, UsingKind};

/// Attribute short names that mark a native interop import.
const NATIVE_IMPORT_ATTRIBUTES: &[&str] = &["ComImport"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportKind {
    /// `using N;`
    Namespace,
    /// `using static T;`
    Static,
    /// `using A = T;`
    Alias(SmolStr),
}

/// A `using` directive and the scope whose body it appears in.
#[derive(Clone, Debug)]
pub struct Import {
    pub kind: ImportKind,
    pub target: Vec<SmolStr>,
    pub is_global: bool,
    pub scope: ScopeId,
}

/// What an identifier token declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclToken {
    /// Name of a type declaration, or of a constructor/destructor of it.
    Type(DeclId),
    /// Any other declared name: namespaces, members, parameters, aliases.
    Other,
}

/// Per-file tables produced by lowering.
#[derive(Clone, Debug)]
pub struct LoweredFile {
    pub file: FileId,
    scope_ranges: Vec<(TextRange, ScopeId)>,
    imports: Vec<Import>,
    decl_tokens: FxHashMap<TextSize, DeclToken>,
}

impl LoweredFile {
    fn new(file: FileId) -> Self {
        Self {
            file,
            scope_ranges: Vec::new(),
            imports: Vec::new(),
            decl_tokens: FxHashMap::default(),
        }
    }

    /// Innermost scope whose body contains `offset`.
    pub fn scope_at(&self, offset: TextSize) -> ScopeId {
        self.scope_ranges
            .iter()
            .filter(|(range, _)| range.contains(offset))
            .min_by_key(|(range, _)| range.len())
            .map(|&(_, scope)| scope)
            .unwrap_or(ScopeId::ROOT)
    }

    /// The declaration a token starting at `offset` names, if any.
    pub fn decl_token(&self, offset: TextSize) -> Option<DeclToken> {
        self.decl_tokens.get(&offset).copied()
    }

    /// Directives of this file written directly in `scope`.
    pub fn imports_in(&self, scope: ScopeId) -> impl Iterator<Item = &Import> + '_ {
        self.imports.iter().filter(move |i| i.scope == scope)
    }

    pub fn imports(&self) -> &[Import] {
        &self.imports
    }
}

/// Lower every file into one tree. Files are processed in the given order.
pub fn lower(files: &[(FileId, &Parse)]) -> (ScopeTree, Vec<LoweredFile>) {
    let mut tree = ScopeTree::new();
    let lowered = files
        .iter()
        .map(|&(file, parse)| {
            let mut lowerer = Lowerer {
                tree: &mut tree,
                out: LoweredFile::new(file),
            };
            lowerer.items(&parse.file.items, ScopeId::ROOT);
            lowerer.out
        })
        .collect();
    (tree, lowered)
}

struct Lowerer<'t> {
    tree: &'t mut ScopeTree,
    out: LoweredFile,
}

impl Lowerer<'_> {
    fn declares(&mut self, range: TextRange, token: DeclToken) {
        self.out.decl_tokens.insert(range.start(), token);
    }

    fn items(&mut self, items: &[Item], scope: ScopeId) {
        for item in items {
            match item {
                Item::Using(using) => {
                    let kind = match &using.kind {
                        UsingKind::Namespace => ImportKind::Namespace,
                        UsingKind::Static => ImportKind::Static,
                        UsingKind::Alias(alias) => {
                            self.declares(alias.range, DeclToken::Other);
                            ImportKind::Alias(alias.text.clone())
                        }
                    };
                    self.out.imports.push(Import {
                        kind,
                        target: using.target.segments.iter().map(|s| s.text.clone()).collect(),
                        is_global: using.target.is_global,
                        scope,
                    });
                }
                Item::Namespace(ns) => {
                    let mut inner = scope;
                    for segment in &ns.name.segments {
                        inner = self.tree.child_scope(inner, &segment.text, ScopeKind::Namespace);
                        self.declares(segment.range, DeclToken::Other);
                    }
                    self.out.scope_ranges.push((ns.body_range, inner));
                    self.items(&ns.items, inner);
                }
                Item::Type(ty) => {
                    self.type_decl(ty, scope);
                }
            }
        }
    }

    fn type_decl(&mut self, ty: &TypeDecl, scope: ScopeId) -> DeclId {
        let markers = ty
            .attributes
            .iter()
            .filter_map(|a| a.short_name())
            .filter(|name| NATIVE_IMPORT_ATTRIBUTES.contains(name))
            .map(|_| Marker::NativeInteropImport)
            .take(1)
            .collect();

        let Some(name) = &ty.name else {
            debug!(
                file = ?self.out.file,
                range = ?ty.range,
                "type declaration without a name; nested members not lowered"
            );
            return self.tree.add_decl(Declaration {
                name: None,
                name_range: None,
                kind: ty.kind,
                file: self.out.file,
                range: ty.range,
                scope,
                body: None,
                members: Vec::new(),
                markers,
            });
        };

        let body = self
            .tree
            .child_scope(scope, &name.text, ScopeKind::Type(ty.kind));
        if let Some(range) = ty.body_range {
            self.out.scope_ranges.push((range, body));
        }

        let mut members = Vec::new();
        let mut own_name_tokens = Vec::new();

        for param in &ty.type_params {
            self.tree.add_type_param(body, param.text.clone());
            self.declares(param.range, DeclToken::Other);
            members.push(param.text.clone());
        }
        for param in &ty.params {
            // Positional record parameters become properties.
            if ty.kind == TypeKind::Record {
                self.tree
                    .add_member(body, param.text.clone(), MemberKind::Property);
                members.push(param.text.clone());
            }
            self.declares(param.range, DeclToken::Other);
        }

        for member in &ty.members {
            match member {
                Member::Type(nested) => {
                    self.type_decl(nested, body);
                    if let Some(nested_name) = &nested.name {
                        members.push(nested_name.text.clone());
                    }
                }
                Member::Named(decl) => {
                    for ident in &decl.names {
                        if matches!(decl.kind, MemberKind::Constructor | MemberKind::Destructor) {
                            own_name_tokens.push(ident.range);
                            continue;
                        }
                        self.tree.add_member(body, ident.text.clone(), decl.kind);
                        self.declares(ident.range, DeclToken::Other);
                        members.push(ident.text.clone());
                    }
                    for ident in decl.type_params.iter().chain(&decl.params) {
                        self.declares(ident.range, DeclToken::Other);
                    }
                }
            }
        }

        let id = self.tree.add_decl(Declaration {
            name: Some(name.text.clone()),
            name_range: Some(name.range),
            kind: ty.kind,
            file: self.out.file,
            range: ty.range,
            scope,
            body: Some(body),
            members,
            markers,
        });
        self.declares(name.range, DeclToken::Type(id));
        for range in own_name_tokens {
            self.declares(range, DeclToken::Type(id));
        }
        id
    }
}
