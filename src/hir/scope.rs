//! Scope arena: the namespace / type nesting of one analysis pass.
//!
//! Scopes and declarations live in flat vectors addressed by [`ScopeId`]
//! and [`DeclId`]. Children point at their parent by index, so there is no
//! shared ownership between a type and the declarations nested in it.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::ids::{DeclId, ScopeId};
use super::symbols::qualify;
use crate::base::{FileId, TextRange};
use crate::syntax::{MemberKind, TypeKind};

// ============================================================================
// SCOPES
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Namespace,
    Type(TypeKind),
}

/// A named member declared directly in a type scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberEntry {
    pub name: SmolStr,
    pub kind: MemberKind,
}

/// A namespace or type scope.
///
/// Namespaces with the same qualified name are one scope no matter how
/// many files or blocks declare them. The same holds for the parts of a
/// `partial` type.
#[derive(Clone, Debug)]
pub struct ScopeData {
    pub kind: ScopeKind,
    /// Simple name; empty for the global namespace.
    pub name: SmolStr,
    pub qualified_name: Arc<str>,
    pub parent: Option<ScopeId>,
    /// Nested namespace and type scopes.
    pub children: Vec<ScopeId>,
    /// Type declarations directly in this scope, every partial part included.
    pub declarations: Vec<DeclId>,
    /// Non-type members (types only).
    pub members: Vec<MemberEntry>,
    /// Type parameter names (types only).
    pub type_params: Vec<SmolStr>,
}

impl ScopeData {
    pub fn is_type(&self) -> bool {
        matches!(self.kind, ScopeKind::Type(_))
    }
}

// ============================================================================
// DECLARATIONS
// ============================================================================

/// Flags attached to a declaration from its attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `[ComImport]`: the type mirrors an interface defined outside .NET.
    NativeInteropImport,
}

/// One syntactic type declaration.
#[derive(Clone, Debug)]
pub struct Declaration {
    /// `None` when the declaration has no identifier token.
    pub name: Option<SmolStr>,
    pub name_range: Option<TextRange>,
    pub kind: TypeKind,
    pub file: FileId,
    /// Whole declaration, attributes included.
    pub range: TextRange,
    /// Scope the declaration appears in.
    pub scope: ScopeId,
    /// Scope the declaration's own members live in. Shared by partial parts.
    pub body: Option<ScopeId>,
    /// Names declared directly inside this part: nested types, members,
    /// enum members and type parameters.
    pub members: Vec<SmolStr>,
    pub markers: Vec<Marker>,
}

impl Declaration {
    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }
}

// ============================================================================
// TREE
// ============================================================================

/// Arena of every scope and type declaration of an analysis pass.
#[derive(Clone, Debug)]
pub struct ScopeTree {
    scopes: Vec<ScopeData>,
    decls: Vec<Declaration>,
    /// (parent, simple name, is namespace) → child scope.
    child_index: FxHashMap<(ScopeId, SmolStr, bool), ScopeId>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    /// A tree holding only the global namespace.
    pub fn new() -> Self {
        Self {
            scopes: vec![ScopeData {
                kind: ScopeKind::Namespace,
                name: SmolStr::default(),
                qualified_name: Arc::from(""),
                parent: None,
                children: Vec::new(),
                declarations: Vec::new(),
                members: Vec::new(),
                type_params: Vec::new(),
            }],
            decls: Vec::new(),
            child_index: FxHashMap::default(),
        }
    }

    pub fn scope(&self, id: ScopeId) -> &ScopeData {
        &self.scopes[id.index()]
    }

    pub fn get_scope(&self, id: ScopeId) -> Option<&ScopeData> {
        self.scopes.get(id.index())
    }

    pub fn decl(&self, id: DeclId) -> &Declaration {
        &self.decls[id.index()]
    }

    pub fn get_decl(&self, id: DeclId) -> Option<&Declaration> {
        self.decls.get(id.index())
    }

    pub fn scopes(&self) -> impl Iterator<Item = (ScopeId, &ScopeData)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(i, s)| (ScopeId(i as u32), s))
    }

    pub fn decls(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        self.decls
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclId(i as u32), d))
    }

    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    /// `scope` and its parents up to the global namespace, innermost first.
    pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), move |&s| self.scope(s).parent)
    }

    /// Qualified name of a declaration; `None` for a malformed one.
    pub fn decl_qualified_name(&self, id: DeclId) -> Option<&Arc<str>> {
        let body = self.decl(id).body?;
        Some(&self.scope(body).qualified_name)
    }

    /// Simple names of every type declaration sharing `scope` with `decl`,
    /// excluding the parts of `decl` itself.
    pub fn sibling_names(&self, decl: DeclId) -> impl Iterator<Item = &SmolStr> + '_ {
        let this = self.decl(decl);
        self.scope(this.scope)
            .declarations
            .iter()
            .map(|&d| self.decl(d))
            .filter(move |d| d.body.is_none() || d.body != this.body)
            .filter_map(|d| d.name.as_ref())
    }

    pub fn find_child(&self, parent: ScopeId, name: &str, namespace: bool) -> Option<ScopeId> {
        self.child_index
            .get(&(parent, SmolStr::new(name), namespace))
            .copied()
    }

    // ------------------------------------------------------------------
    // Construction (used by lowering)
    // ------------------------------------------------------------------

    /// Get or create the child scope `name` of `parent`.
    pub(crate) fn child_scope(&mut self, parent: ScopeId, name: &SmolStr, kind: ScopeKind) -> ScopeId {
        let key = (parent, name.clone(), kind == ScopeKind::Namespace);
        if let Some(&id) = self.child_index.get(&key) {
            return id;
        }

        let id = ScopeId(self.scopes.len() as u32);
        let qualified_name = Arc::from(qualify(&self.scope(parent).qualified_name, name));
        self.scopes.push(ScopeData {
            kind,
            name: name.clone(),
            qualified_name,
            parent: Some(parent),
            children: Vec::new(),
            declarations: Vec::new(),
            members: Vec::new(),
            type_params: Vec::new(),
        });
        self.scopes[parent.index()].children.push(id);
        self.child_index.insert(key, id);
        id
    }

    pub(crate) fn add_decl(&mut self, decl: Declaration) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.scopes[decl.scope.index()].declarations.push(id);
        self.decls.push(decl);
        id
    }

    pub(crate) fn add_member(&mut self, scope: ScopeId, name: SmolStr, kind: MemberKind) {
        let entry = MemberEntry { name, kind };
        let members = &mut self.scopes[scope.index()].members;
        if !members.contains(&entry) {
            members.push(entry);
        }
    }

    pub(crate) fn add_type_param(&mut self, scope: ScopeId, name: SmolStr) {
        let params = &mut self.scopes[scope.index()].type_params;
        if !params.contains(&name) {
            params.push(name);
        }
    }
}
