//! Declaration skeleton produced by the parser.
//!
//! The tree keeps only what naming analysis needs: the nesting of
//! namespaces and types, declared names with their token ranges, attribute
//! names, base lists and import directives. Bodies and expressions are not
//! represented; their tokens stay available in [`Parse::tokens`].
//!
//! [`Parse::tokens`]: super::Parse::tokens

use smol_str::SmolStr;

use crate::base::TextRange;

/// An identifier token with its logical text (a verbatim `@` is dropped).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    pub text: SmolStr,
    pub range: TextRange,
}

/// A dotted name such as `System.Runtime.InteropServices.ComImport`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    pub segments: Vec<Ident>,
    /// Written with a leading `global::`.
    pub is_global: bool,
}

impl Path {
    pub fn last(&self) -> Option<&Ident> {
        self.segments.last()
    }

    /// Dotted text of the path, without any `global::` prefix.
    pub fn dotted(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[derive(Clone, Debug, Default)]
pub struct SourceFile {
    pub items: Vec<Item>,
}

#[derive(Clone, Debug)]
pub enum Item {
    Using(UsingDirective),
    Namespace(NamespaceDecl),
    Type(TypeDecl),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UsingKind {
    /// `using System.IO;`
    Namespace,
    /// `using static System.Math;`
    Static,
    /// `using Alias = System.IO.File;`
    Alias(Ident),
}

#[derive(Clone, Debug)]
pub struct UsingDirective {
    pub kind: UsingKind,
    pub target: Path,
    pub range: TextRange,
}

#[derive(Clone, Debug)]
pub struct NamespaceDecl {
    pub name: Path,
    pub items: Vec<Item>,
    /// Text the namespace's members live in: between the braces, or from
    /// the `;` of a file-scoped namespace to the end of the file.
    pub body_range: TextRange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Record,
    Delegate,
}

impl TypeKind {
    pub fn display(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Record => "record",
            TypeKind::Delegate => "delegate",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Attribute {
    pub name: Path,
}

impl Attribute {
    /// Last path segment with any `Attribute` suffix removed.
    pub fn short_name(&self) -> Option<&str> {
        let last = self.name.last()?.text.as_str();
        Some(last.strip_suffix("Attribute").unwrap_or(last))
    }
}

#[derive(Clone, Debug)]
pub struct TypeDecl {
    pub kind: TypeKind,
    /// `None` when the declaration has no identifier token.
    pub name: Option<Ident>,
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<SmolStr>,
    pub type_params: Vec<Ident>,
    /// Primary constructor or delegate parameters.
    pub params: Vec<Ident>,
    pub bases: Vec<Path>,
    pub members: Vec<Member>,
    pub body_range: Option<TextRange>,
    pub range: TextRange,
}

impl TypeDecl {
    pub fn is_partial(&self) -> bool {
        self.modifiers.iter().any(|m| m == "partial")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberKind {
    Field,
    Property,
    Method,
    Event,
    Constructor,
    Destructor,
    Indexer,
    Operator,
    EnumMember,
}

#[derive(Clone, Debug)]
pub enum Member {
    Type(TypeDecl),
    Named(MemberDecl),
}

#[derive(Clone, Debug)]
pub struct MemberDecl {
    pub kind: MemberKind,
    /// Declared names. Fields may declare several; indexers and
    /// operators declare none.
    pub names: Vec<Ident>,
    pub type_params: Vec<Ident>,
    pub params: Vec<Ident>,
}
