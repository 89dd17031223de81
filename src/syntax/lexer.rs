//! Tokenizer for the C# declaration skeleton.
//!
//! Only the structural keywords get their own kind. Everything else that
//! looks like a name is an [`TokenKind::Ident`], including contextual
//! keywords, which the parser recognises by text.

use logos::Logos;

use crate::base::{TextRange, TextSize};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"(?:[ \t\r\n\f\x{FEFF}]+|//[^\n]*|#[^\n]*)")]
pub enum TokenKind {
    /// Never produced: the callback skips the whole comment.
    #[token("/*", block_comment)]
    BlockComment,

    #[token("namespace")]
    NamespaceKw,
    #[token("using")]
    UsingKw,
    #[token("class")]
    ClassKw,
    #[token("struct")]
    StructKw,
    #[token("interface")]
    InterfaceKw,
    #[token("enum")]
    EnumKw,
    #[token("delegate")]
    DelegateKw,

    #[regex(r"@?[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    #[regex(r#"@"(?:[^"]|"")*""#)]
    #[regex(r#"\$@?"(?:[^"\\]|\\.)*""#)]
    #[regex(r"'(?:[^'\\\n]|\\.)+'")]
    #[regex(r"[0-9][0-9A-Za-z_]*(?:\.[0-9][0-9A-Za-z_]*)?")]
    Literal,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("=>")]
    FatArrow,
    #[token("?")]
    Question,
    #[token("~")]
    Tilde,

    /// Any character the skeleton grammar does not care about.
    Unknown,
    /// Synthesised by the parser past the last token.
    Eof,
}

impl TokenKind {
    /// Keywords that introduce a type declaration (`record` is contextual
    /// and handled by the parser).
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::ClassKw
                | TokenKind::StructKw
                | TokenKind::InterfaceKw
                | TokenKind::EnumKw
                | TokenKind::DelegateKw
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: TextRange,
}

impl Token {
    /// The token's source text. For verbatim identifiers the `@` is kept.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range]
    }

    /// The identifier as name lookup sees it, without a verbatim `@`.
    pub fn ident_text<'a>(&self, source: &'a str) -> &'a str {
        let text = self.text(source);
        text.strip_prefix('@').unwrap_or(text)
    }
}

/// Skips past the closing `*/`, or to the end of the text when the comment
/// is unterminated.
fn block_comment(lex: &mut logos::Lexer<TokenKind>) -> logos::Skip {
    let rest = lex.remainder();
    let len = rest.find("*/").map_or(rest.len(), |end| end + 2);
    lex.bump(len);
    logos::Skip
}

/// Tokenize the whole text. Never fails: unknown characters become
/// [`TokenKind::Unknown`].
pub fn lex(text: &str) -> Vec<Token> {
    let mut lexer = TokenKind::lexer(text);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        tokens.push(Token {
            kind: result.unwrap_or(TokenKind::Unknown),
            range: TextRange::new(
                TextSize::from(span.start as u32),
                TextSize::from(span.end as u32),
            ),
        });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        lex(text).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_interface_declaration() {
        assert_eq!(
            kinds("public interface Foo { }"),
            vec![
                TokenKind::Ident,
                TokenKind::InterfaceKw,
                TokenKind::Ident,
                TokenKind::LBrace,
                TokenKind::RBrace,
            ]
        );
    }

    #[test]
    fn test_lex_skips_comments_and_directives() {
        let text = "// Foo\n/* Foo */\n#region Foo\nFoo";
        let tokens = lex(text);

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text(text), "Foo");
    }

    #[test]
    fn test_lex_literals_hide_identifiers() {
        let text = r#"Guid("Foo") @"Foo ""x""" 'F' 42"#;
        assert_eq!(
            kinds(text),
            vec![
                TokenKind::Ident,
                TokenKind::LParen,
                TokenKind::Literal,
                TokenKind::RParen,
                TokenKind::Literal,
                TokenKind::Literal,
                TokenKind::Literal,
            ]
        );
    }

    #[test]
    fn test_lex_block_comments_between_tokens() {
        let text = "[ComImport] /* c */ interface /** doc **/ Foo /* a * b / c";
        let tokens = lex(text);

        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::LBracket,
                TokenKind::Ident,
                TokenKind::RBracket,
                TokenKind::InterfaceKw,
                TokenKind::Ident,
            ]
        );
        assert_eq!(tokens[4].text(text), "Foo");
    }

    #[test]
    fn test_lex_verbatim_identifier() {
        let text = "@class";
        let tokens = lex(text);

        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].ident_text(text), "class");
    }

    #[test]
    fn test_lex_keyword_prefix_is_identifier() {
        assert_eq!(kinds("interfaces classy"), vec![TokenKind::Ident, TokenKind::Ident]);
    }

    #[test]
    fn test_lex_punctuation() {
        assert_eq!(
            kinds("global::A.B<int> => x = ?~"),
            vec![
                TokenKind::Ident,
                TokenKind::ColonColon,
                TokenKind::Ident,
                TokenKind::Dot,
                TokenKind::Ident,
                TokenKind::Lt,
                TokenKind::Ident,
                TokenKind::Gt,
                TokenKind::FatArrow,
                TokenKind::Ident,
                TokenKind::Eq,
                TokenKind::Question,
                TokenKind::Tilde,
            ]
        );
    }

    #[test]
    fn test_lex_unknown_characters_do_not_abort() {
        assert_eq!(
            kinds("a + b"),
            vec![TokenKind::Ident, TokenKind::Unknown, TokenKind::Ident]
        );
    }
}
