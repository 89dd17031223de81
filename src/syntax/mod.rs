//! Syntax layer: tokens and the declaration skeleton of C# sources.
//!
//! ```text
//! text ──lex──▶ Vec<Token> ──parse──▶ SourceFile (namespaces, types, members)
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{
    Attribute, Ident, Item, Member, MemberDecl, MemberKind, NamespaceDecl, Path, SourceFile,
    TypeDecl, TypeKind, UsingDirective, UsingKind,
};
pub use lexer::{Token, TokenKind, lex};
pub use parser::{Parse, SyntaxError, parse};

/// Whether `text` is usable as a C# identifier in the skeleton grammar.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("IFoo1"));
        assert!(is_identifier("_x"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1Foo"));
        assert!(!is_identifier("I Foo"));
    }
}
