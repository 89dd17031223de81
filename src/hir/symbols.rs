//! Resolved symbol identities.
//!
//! A [`Symbol`] names any entity lookup can return: namespaces, types,
//! members and type parameters, whether declared in the analysed sources
//! or in referenced assemblies.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::syntax::{MemberKind, TypeKind};

/// The kind of a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Namespace,
    Type(TypeKind),
    Member(MemberKind),
    TypeParameter,
}

impl SymbolKind {
    pub const INTERFACE: SymbolKind = SymbolKind::Type(TypeKind::Interface);
    pub const CLASS: SymbolKind = SymbolKind::Type(TypeKind::Class);

    pub fn is_type(&self) -> bool {
        matches!(self, SymbolKind::Type(_))
    }

    /// Namespaces and types can be qualified into (`A.B`).
    pub fn is_container(&self) -> bool {
        matches!(self, SymbolKind::Namespace | SymbolKind::Type(_))
    }

    pub fn display(&self) -> &'static str {
        match self {
            SymbolKind::Namespace => "namespace",
            SymbolKind::Type(kind) => kind.display(),
            SymbolKind::Member(MemberKind::Field) => "field",
            SymbolKind::Member(MemberKind::Property) => "property",
            SymbolKind::Member(MemberKind::Method) => "method",
            SymbolKind::Member(MemberKind::Event) => "event",
            SymbolKind::Member(MemberKind::EnumMember) => "enum member",
            SymbolKind::Member(_) => "member",
            SymbolKind::TypeParameter => "type parameter",
        }
    }
}

/// Where a symbol is defined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolOrigin {
    /// Declared in the analysed source set; editable.
    Source,
    /// Declared outside the analysed source set; read-only.
    External,
}

/// A resolved symbol.
///
/// Equality is identity: two symbols are the same entity when kind, origin
/// and qualified name agree. The parts of a `partial` type are therefore
/// one symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: SmolStr,
    /// Dotted path from the global namespace, e.g. `System.IDisposable`.
    pub qualified_name: Arc<str>,
    pub kind: SymbolKind,
    pub origin: SymbolOrigin,
}

impl Symbol {
    pub fn new(
        container: &str,
        name: impl Into<SmolStr>,
        kind: SymbolKind,
        origin: SymbolOrigin,
    ) -> Self {
        let name = name.into();
        Self {
            qualified_name: Arc::from(qualify(container, &name)),
            name,
            kind,
            origin,
        }
    }

    pub fn is_external(&self) -> bool {
        self.origin == SymbolOrigin::External
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.display(), self.qualified_name)
    }
}

/// Join a container's qualified name and a simple name. The global
/// namespace is the empty string.
pub fn qualify(container: &str, name: &str) -> String {
    if container.is_empty() {
        name.to_string()
    } else {
        format!("{container}.{name}")
    }
}

/// Split a qualified name into its container and simple name.
pub fn split_qualified(qualified: &str) -> (&str, &str) {
    match qualified.rfind('.') {
        Some(pos) => (&qualified[..pos], &qualified[pos + 1..]),
        None => ("", qualified),
    }
}
