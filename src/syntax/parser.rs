//! Recursive-descent parser for the C# declaration skeleton.
//!
//! The parser understands namespaces, using directives, attribute lists,
//! type declarations and member declarations down to their names. Member
//! bodies, initializers and expressions are skipped by bracket matching.
//! It never fails: unexpected tokens are recorded as [`SyntaxError`]s and
//! skipped, so one broken declaration cannot hide the rest of the file.

use smol_str::SmolStr;

use super::ast::{
    Attribute, Ident, Item, Member, MemberDecl, MemberKind, NamespaceDecl, Path, SourceFile,
    TypeDecl, TypeKind, UsingDirective, UsingKind,
};
use super::lexer::{Token, TokenKind, lex};
use crate::base::{TextRange, TextSize};

/// Modifier keywords that may precede a type or member declaration.
const MODIFIERS: &[&str] = &[
    "public", "private", "protected", "internal", "static", "readonly", "sealed", "abstract",
    "virtual", "override", "new", "partial", "unsafe", "extern", "volatile", "async", "const",
    "required", "file", "fixed", "implicit", "explicit", "ref", "event", "scoped",
];

/// Modifiers allowed in front of a parameter type.
const PARAM_MODIFIERS: &[&str] = &["this", "ref", "out", "in", "params", "scoped", "readonly"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

/// Result of parsing one file.
#[derive(Clone, Debug)]
pub struct Parse {
    pub file: SourceFile,
    /// Every token of the file, in order. Reference search scans these.
    pub tokens: Vec<Token>,
    pub errors: Vec<SyntaxError>,
}

pub fn parse(text: &str) -> Parse {
    let tokens = lex(text);
    let (items, errors) = {
        let mut parser = Parser::new(text, &tokens);
        let items = parser.items(false);
        (items, parser.errors)
    };

    Parse {
        file: SourceFile { items },
        tokens,
        errors,
    }
}

struct Parser<'a> {
    text: &'a str,
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, tokens: &'a [Token]) -> Self {
        Self {
            text,
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Token cursor
    // ------------------------------------------------------------------

    fn nth(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    fn kind(&self) -> TokenKind {
        self.nth(0)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    fn nth_is_word(&self, n: usize, word: &str) -> bool {
        self.tokens
            .get(self.pos + n)
            .is_some_and(|t| t.kind == TokenKind::Ident && t.text(self.text) == word)
    }

    fn at_word(&self, word: &str) -> bool {
        self.nth_is_word(0, word)
    }

    fn current_text(&self) -> &'a str {
        self.tokens.get(self.pos).map_or("", |t| t.text(self.text))
    }

    fn bump(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn current_range(&self) -> TextRange {
        match self.tokens.get(self.pos) {
            Some(token) => token.range,
            None => TextRange::empty(TextSize::of(self.text)),
        }
    }

    fn prev_end(&self) -> TextSize {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.range.end(),
            None => TextSize::from(0),
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        let range = self.current_range();
        self.errors.push(SyntaxError {
            message: message.into(),
            range,
        });
    }

    fn ident(&mut self) -> Option<Ident> {
        let token = self.tokens.get(self.pos).filter(|t| t.kind == TokenKind::Ident)?;
        let ident = Ident {
            text: SmolStr::new(token.ident_text(self.text)),
            range: token.range,
        };
        self.bump();
        Some(ident)
    }

    /// Skip a bracketed group starting at the current opener, including the
    /// matching closer. All three bracket kinds count towards one depth.
    fn skip_balanced(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.kind() {
                TokenKind::Eof => return,
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.bump();
                        return;
                    }
                }
                _ => {}
            }
            self.bump();
        }
    }

    /// Skip tokens until one of `stops` at nesting depth zero. Stops without
    /// consuming at an unmatched closer so an enclosing body stays intact.
    fn skip_until(&mut self, stops: &[TokenKind]) {
        loop {
            let kind = self.kind();
            if kind == TokenKind::Eof || stops.contains(&kind) {
                return;
            }
            match kind {
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => self.skip_balanced(),
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => return,
                _ => self.bump(),
            }
        }
    }

    fn skip_generic_args(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.kind() {
                TokenKind::Lt => depth += 1,
                TokenKind::Gt => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.bump();
                        return;
                    }
                }
                TokenKind::LParen | TokenKind::LBracket => {
                    self.skip_balanced();
                    continue;
                }
                TokenKind::Eof | TokenKind::LBrace | TokenKind::RBrace | TokenKind::Semi => return,
                _ => {}
            }
            self.bump();
        }
    }

    // ------------------------------------------------------------------
    // Compilation unit and namespaces
    // ------------------------------------------------------------------

    fn items(&mut self, in_braces: bool) -> Vec<Item> {
        let mut items = Vec::new();
        loop {
            match self.kind() {
                TokenKind::Eof => break,
                TokenKind::RBrace if in_braces => break,
                TokenKind::RBrace => {
                    self.error("unmatched '}'");
                    self.bump();
                }
                TokenKind::UsingKw => {
                    if let Some(using) = self.using_directive() {
                        items.push(Item::Using(using));
                    }
                }
                TokenKind::NamespaceKw => items.push(Item::Namespace(self.namespace())),
                _ if self.at_word("global") && self.nth(1) == TokenKind::UsingKw => self.bump(),
                _ => match self.type_decl_opt() {
                    Some(decl) => items.push(Item::Type(decl)),
                    // Top-level statements and anything else outside a declaration.
                    None => match self.kind() {
                        TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => {
                            self.skip_balanced()
                        }
                        _ => self.bump(),
                    },
                },
            }
        }
        items
    }

    fn using_directive(&mut self) -> Option<UsingDirective> {
        let start = self.current_range().start();
        self.bump();

        // `using (...)` statement
        if self.at(TokenKind::LParen) {
            self.skip_until(&[TokenKind::Semi]);
            self.eat(TokenKind::Semi);
            return None;
        }

        let kind = if self.at_word("static") {
            self.bump();
            UsingKind::Static
        } else if self.at(TokenKind::Ident) && self.nth(1) == TokenKind::Eq {
            let alias = self.ident()?;
            self.bump();
            UsingKind::Alias(alias)
        } else {
            UsingKind::Namespace
        };

        let target = self.path();
        if self.at(TokenKind::Lt) {
            self.skip_generic_args();
        }

        // `using var x = ...;` declaration statement
        if target.segments.is_empty() || self.at(TokenKind::Ident) {
            if target.segments.is_empty() {
                self.error("expected namespace or type name");
            }
            self.skip_until(&[TokenKind::Semi]);
            self.eat(TokenKind::Semi);
            return None;
        }

        if !self.eat(TokenKind::Semi) {
            self.error("expected ';'");
            self.skip_until(&[TokenKind::Semi]);
            self.eat(TokenKind::Semi);
        }

        Some(UsingDirective {
            kind,
            target,
            range: TextRange::new(start, self.prev_end()),
        })
    }

    fn namespace(&mut self) -> NamespaceDecl {
        self.bump();
        let name = self.path();
        if name.segments.is_empty() {
            self.error("expected namespace name");
        }

        let (items, body_range) = if self.eat(TokenKind::Semi) {
            let body_start = self.prev_end();
            let items = self.items(false);
            (items, TextRange::new(body_start, TextSize::of(self.text)))
        } else if self.at(TokenKind::LBrace) {
            let body_start = self.current_range().start();
            self.bump();
            let items = self.items(true);
            if !self.eat(TokenKind::RBrace) {
                self.error("expected '}'");
            }
            (items, TextRange::new(body_start, self.prev_end()))
        } else {
            self.error("expected '{'");
            (Vec::new(), TextRange::empty(self.prev_end()))
        };

        NamespaceDecl {
            name,
            items,
            body_range,
        }
    }

    // ------------------------------------------------------------------
    // Names and types
    // ------------------------------------------------------------------

    /// `[global::] Ident ((. | ::) Ident)*`, no generic arguments.
    fn path(&mut self) -> Path {
        let mut path = Path::default();
        if self.at_word("global") && self.nth(1) == TokenKind::ColonColon {
            self.bump();
            self.bump();
            path.is_global = true;
        }
        while let Some(ident) = self.ident() {
            path.segments.push(ident);
            if matches!(self.kind(), TokenKind::Dot | TokenKind::ColonColon)
                && self.nth(1) == TokenKind::Ident
            {
                self.bump();
            } else {
                break;
            }
        }
        path
    }

    /// A type reference: a path with optional generic arguments on any
    /// segment, or a tuple type, followed by nullable/array/pointer suffixes.
    fn type_ref(&mut self) -> Path {
        let mut path = Path::default();
        if self.at(TokenKind::LParen) {
            self.skip_balanced();
        } else {
            if self.at_word("global") && self.nth(1) == TokenKind::ColonColon {
                self.bump();
                self.bump();
                path.is_global = true;
            }
            while let Some(ident) = self.ident() {
                path.segments.push(ident);
                if self.at(TokenKind::Lt) {
                    self.skip_generic_args();
                }
                if matches!(self.kind(), TokenKind::Dot | TokenKind::ColonColon)
                    && self.nth(1) == TokenKind::Ident
                {
                    self.bump();
                } else {
                    break;
                }
            }
        }

        loop {
            match self.kind() {
                TokenKind::Question => self.bump(),
                TokenKind::LBracket
                    if matches!(self.nth(1), TokenKind::RBracket | TokenKind::Comma) =>
                {
                    self.skip_balanced()
                }
                TokenKind::Unknown if self.current_text() == "*" => self.bump(),
                _ => break,
            }
        }
        path
    }

    fn type_params(&mut self) -> Vec<Ident> {
        let mut params = Vec::new();
        self.bump();
        loop {
            self.attributes();
            if (self.at_word("in") || self.at_word("out")) && self.nth(1) == TokenKind::Ident {
                self.bump();
            }
            match self.kind() {
                TokenKind::Ident => {
                    if let Some(ident) = self.ident() {
                        params.push(ident);
                    }
                    if self.at(TokenKind::Lt) {
                        self.skip_generic_args();
                    }
                }
                TokenKind::Gt => {
                    self.bump();
                    break;
                }
                TokenKind::Eof
                | TokenKind::LBrace
                | TokenKind::RBrace
                | TokenKind::Semi
                | TokenKind::LParen => break,
                _ => self.bump(),
            }
        }
        params
    }

    fn attributes(&mut self) -> Vec<Attribute> {
        let mut attributes = Vec::new();
        while self.at(TokenKind::LBracket) {
            self.bump();
            // attribute target such as `assembly:`
            if self.at(TokenKind::Ident) && self.nth(1) == TokenKind::Colon {
                self.bump();
                self.bump();
            }
            loop {
                let name = self.path();
                if name.segments.is_empty() {
                    self.skip_until(&[TokenKind::RBracket]);
                    break;
                }
                if self.at(TokenKind::Lt) {
                    self.skip_generic_args();
                }
                if self.at(TokenKind::LParen) {
                    self.skip_balanced();
                }
                attributes.push(Attribute { name });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            if !self.eat(TokenKind::RBracket) {
                self.error("expected ']'");
                self.skip_until(&[TokenKind::RBracket]);
                self.eat(TokenKind::RBracket);
            }
        }
        attributes
    }

    fn modifiers(&mut self) -> Vec<SmolStr> {
        let mut modifiers = Vec::new();
        while self.at(TokenKind::Ident)
            && MODIFIERS.contains(&self.current_text())
            && !matches!(
                self.nth(1),
                TokenKind::LParen | TokenKind::Semi | TokenKind::Eq | TokenKind::Comma
            )
        {
            modifiers.push(SmolStr::new(self.current_text()));
            self.bump();
        }
        modifiers
    }

    // ------------------------------------------------------------------
    // Type declarations
    // ------------------------------------------------------------------

    fn type_keyword(&self) -> Option<TypeKind> {
        match self.kind() {
            TokenKind::ClassKw => Some(TypeKind::Class),
            TokenKind::StructKw => Some(TypeKind::Struct),
            TokenKind::InterfaceKw => Some(TypeKind::Interface),
            TokenKind::EnumKw => Some(TypeKind::Enum),
            TokenKind::DelegateKw => Some(TypeKind::Delegate),
            TokenKind::Ident
                if self.at_word("record")
                    && matches!(
                        self.nth(1),
                        TokenKind::Ident | TokenKind::ClassKw | TokenKind::StructKw
                    ) =>
            {
                Some(TypeKind::Record)
            }
            _ => None,
        }
    }

    fn type_decl_opt(&mut self) -> Option<TypeDecl> {
        let start_pos = self.pos;
        let error_count = self.errors.len();
        let start = self.current_range().start();

        let attributes = self.attributes();
        let modifiers = self.modifiers();
        match self.type_keyword() {
            Some(kind) => Some(self.type_decl(start, kind, attributes, modifiers)),
            None => {
                self.pos = start_pos;
                self.errors.truncate(error_count);
                None
            }
        }
    }

    fn type_decl(
        &mut self,
        start: TextSize,
        kind: TypeKind,
        attributes: Vec<Attribute>,
        modifiers: Vec<SmolStr>,
    ) -> TypeDecl {
        self.bump();
        if kind == TypeKind::Record && matches!(self.kind(), TokenKind::ClassKw | TokenKind::StructKw)
        {
            self.bump();
        }
        if kind == TypeKind::Delegate {
            self.type_ref();
        }

        let name = self.ident();
        if name.is_none() {
            self.error(format!("expected {} name", kind.display()));
        }
        let type_params = if self.at(TokenKind::Lt) {
            self.type_params()
        } else {
            Vec::new()
        };
        let params = if self.at(TokenKind::LParen) {
            self.params()
        } else {
            Vec::new()
        };

        let mut bases = Vec::new();
        if kind != TypeKind::Delegate && self.eat(TokenKind::Colon) {
            loop {
                let base = self.type_ref();
                // record base with constructor arguments
                if self.at(TokenKind::LParen) {
                    self.skip_balanced();
                }
                if !base.segments.is_empty() {
                    bases.push(base);
                }
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        // `where` clauses
        self.skip_until(&[TokenKind::LBrace, TokenKind::Semi]);

        let mut members = Vec::new();
        let mut body_range = None;
        if kind != TypeKind::Delegate && self.at(TokenKind::LBrace) {
            let body_start = self.current_range().start();
            self.bump();
            members = if kind == TypeKind::Enum {
                self.enum_members()
            } else {
                self.members()
            };
            if !self.eat(TokenKind::RBrace) {
                self.error("expected '}'");
            }
            body_range = Some(TextRange::new(body_start, self.prev_end()));
            self.eat(TokenKind::Semi);
        } else if !self.eat(TokenKind::Semi) {
            self.error("expected '{' or ';'");
        }

        TypeDecl {
            kind,
            name,
            attributes,
            modifiers,
            type_params,
            params,
            bases,
            members,
            body_range,
            range: TextRange::new(start, self.prev_end()),
        }
    }

    fn enum_members(&mut self) -> Vec<Member> {
        let mut members = Vec::new();
        loop {
            self.attributes();
            match self.kind() {
                TokenKind::RBrace | TokenKind::Eof => break,
                TokenKind::Ident => {
                    if let Some(ident) = self.ident() {
                        members.push(Member::Named(MemberDecl {
                            kind: MemberKind::EnumMember,
                            names: vec![ident],
                            type_params: Vec::new(),
                            params: Vec::new(),
                        }));
                    }
                    if self.eat(TokenKind::Eq) {
                        self.skip_until(&[TokenKind::Comma]);
                    }
                    self.eat(TokenKind::Comma);
                }
                _ => {
                    self.error("expected enum member");
                    let before = self.pos;
                    self.skip_until(&[TokenKind::Comma]);
                    if self.pos == before && !self.eat(TokenKind::Comma) {
                        self.bump();
                    }
                }
            }
        }
        members
    }

    // ------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------

    fn members(&mut self) -> Vec<Member> {
        let mut members = Vec::new();
        loop {
            match self.kind() {
                TokenKind::RBrace | TokenKind::Eof => break,
                TokenKind::Semi => {
                    self.bump();
                    continue;
                }
                _ => {}
            }

            let start_pos = self.pos;
            let start = self.current_range().start();
            let attributes = self.attributes();
            let modifiers = self.modifiers();

            if let Some(kind) = self.type_keyword() {
                members.push(Member::Type(self.type_decl(start, kind, attributes, modifiers)));
            } else if let Some(member) = self.member(&modifiers) {
                members.push(Member::Named(member));
            }

            if self.pos == start_pos {
                self.error("unexpected token in type body");
                match self.kind() {
                    TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => {
                        self.skip_balanced()
                    }
                    _ => self.bump(),
                }
            }
        }
        members
    }

    fn member(&mut self, modifiers: &[SmolStr]) -> Option<MemberDecl> {
        let named = |kind, names, type_params, params| MemberDecl {
            kind,
            names,
            type_params,
            params,
        };

        match self.kind() {
            TokenKind::Tilde => {
                self.bump();
                let names: Vec<Ident> = self.ident().into_iter().collect();
                let params = self.params_if_present();
                self.member_tail(&mut Vec::new(), false);
                return Some(named(MemberKind::Destructor, names, Vec::new(), params));
            }
            TokenKind::Ident => {}
            _ => return None,
        }

        // `implicit operator T(...)`: the modifiers were already consumed
        if self.at_word("operator") {
            self.bump();
            self.type_ref();
            let params = self.params_if_present();
            self.member_tail(&mut Vec::new(), false);
            return Some(named(MemberKind::Operator, Vec::new(), Vec::new(), params));
        }

        let ty = self.type_ref();
        match self.kind() {
            TokenKind::LParen => {
                let names: Vec<Ident> = ty.last().cloned().into_iter().collect();
                let params = self.params();
                self.member_tail(&mut Vec::new(), false);
                Some(named(MemberKind::Constructor, names, Vec::new(), params))
            }
            TokenKind::Ident if self.at_word("this") => {
                self.bump();
                let params = if self.at(TokenKind::LBracket) {
                    self.params()
                } else {
                    Vec::new()
                };
                self.member_tail(&mut Vec::new(), false);
                Some(named(MemberKind::Indexer, Vec::new(), Vec::new(), params))
            }
            TokenKind::Ident if self.at_word("operator") => {
                self.bump();
                while !matches!(
                    self.kind(),
                    TokenKind::LParen
                        | TokenKind::LBrace
                        | TokenKind::RBrace
                        | TokenKind::Semi
                        | TokenKind::Eof
                ) {
                    self.bump();
                }
                let params = self.params_if_present();
                self.member_tail(&mut Vec::new(), false);
                Some(named(MemberKind::Operator, Vec::new(), Vec::new(), params))
            }
            TokenKind::Ident => {
                let (name, type_params) = self.member_name();
                let mut names: Vec<Ident> = name.into_iter().collect();
                if self.at(TokenKind::LParen) {
                    let params = self.params();
                    self.member_tail(&mut Vec::new(), false);
                    return Some(named(MemberKind::Method, names, type_params, params));
                }
                let kind = if modifiers.iter().any(|m| m == "event") {
                    MemberKind::Event
                } else if matches!(self.kind(), TokenKind::LBrace | TokenKind::FatArrow) {
                    MemberKind::Property
                } else {
                    MemberKind::Field
                };
                let declarators = matches!(kind, MemberKind::Field | MemberKind::Event);
                self.member_tail(&mut names, declarators);
                Some(named(kind, names, type_params, Vec::new()))
            }
            _ => {
                if ty.segments.is_empty() {
                    return None;
                }
                self.error("expected member name");
                self.skip_until(&[TokenKind::Semi]);
                self.eat(TokenKind::Semi);
                None
            }
        }
    }

    /// Member name, possibly qualified by an explicitly implemented
    /// interface (`IFoo<T>.Bar`). Returns the last segment and its type
    /// parameters.
    fn member_name(&mut self) -> (Option<Ident>, Vec<Ident>) {
        let mut name = None;
        let mut type_params = Vec::new();
        while let Some(ident) = self.ident() {
            name = Some(ident);
            type_params = if self.at(TokenKind::Lt) {
                self.type_params()
            } else {
                Vec::new()
            };
            if self.at(TokenKind::Dot) && self.nth(1) == TokenKind::Ident {
                self.bump();
            } else {
                break;
            }
        }
        (name, type_params)
    }

    fn params_if_present(&mut self) -> Vec<Ident> {
        if self.at(TokenKind::LParen) {
            self.params()
        } else {
            Vec::new()
        }
    }

    /// Parameter list starting at `(` or `[`; returns the parameter names.
    fn params(&mut self) -> Vec<Ident> {
        let close = if self.at(TokenKind::LBracket) {
            TokenKind::RBracket
        } else {
            TokenKind::RParen
        };
        self.bump();

        let mut params = Vec::new();
        loop {
            if self.eat(close) {
                break;
            }
            if matches!(
                self.kind(),
                TokenKind::Eof | TokenKind::LBrace | TokenKind::RBrace | TokenKind::Semi
            ) {
                self.error("unterminated parameter list");
                break;
            }

            let start_pos = self.pos;
            self.attributes();
            while PARAM_MODIFIERS.iter().any(|m| self.at_word(m))
                && matches!(self.nth(1), TokenKind::Ident | TokenKind::LParen)
            {
                self.bump();
            }
            self.type_ref();
            if let Some(ident) = self.ident() {
                params.push(ident);
            }
            if self.eat(TokenKind::Eq) {
                self.skip_until(&[TokenKind::Comma, close]);
            }
            if !self.eat(TokenKind::Comma) && !self.at(close) {
                self.skip_until(&[TokenKind::Comma, close]);
                self.eat(TokenKind::Comma);
            }
            if self.pos == start_pos {
                self.bump();
            }
        }
        params
    }

    /// Skip the rest of a member after its name: parameter lists, bodies,
    /// accessor blocks, initializers and expression bodies. With
    /// `declarators`, additional comma-separated names are collected.
    fn member_tail(&mut self, names: &mut Vec<Ident>, declarators: bool) {
        loop {
            match self.kind() {
                TokenKind::Eof | TokenKind::RBrace => return,
                TokenKind::Semi => {
                    self.bump();
                    return;
                }
                TokenKind::LBrace => {
                    self.skip_balanced();
                    // property initializer: `{ get; } = value;`
                    if !self.at(TokenKind::Eq) {
                        return;
                    }
                }
                TokenKind::FatArrow => {
                    self.bump();
                    self.skip_until(&[TokenKind::Semi]);
                    self.eat(TokenKind::Semi);
                    return;
                }
                TokenKind::LParen | TokenKind::LBracket => self.skip_balanced(),
                TokenKind::Eq => {
                    self.bump();
                    self.skip_until(&[TokenKind::Comma, TokenKind::Semi]);
                }
                TokenKind::Comma => {
                    self.bump();
                    if declarators {
                        if let Some(ident) = self.ident() {
                            names.push(ident);
                        }
                    }
                }
                TokenKind::RParen | TokenKind::RBracket => {
                    self.error("unbalanced closing bracket");
                    self.bump();
                }
                _ => self.bump(),
            }
        }
    }
}
