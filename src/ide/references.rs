//! Find references: every identifier token bound to a type declaration.
//!
//! Candidate tokens are found by text, then bound by name resolution from
//! the scope they appear in, so an unrelated symbol with the same name is
//! never reported. Occurrences that cannot be bound are returned
//! separately instead of being guessed at.

use tracing::warn;

use super::analysis::ParsedFile;
use crate::base::{FileId, LineCol, TextRange, TextSize};
use crate::error::{FixError, FixResult};
use crate::hir::{DeclId, DeclToken, ResolveResult, Resolver, SemanticModel, Symbol};
use crate::syntax::{Token, TokenKind};

/// A token bound to the searched symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    pub file: FileId,
    /// The identifier text, without a verbatim `@`.
    pub range: TextRange,
    pub is_declaration: bool,
}

/// Why an occurrence could not be bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// Lookup found nothing with that name.
    NotFound,
    /// Lookup found several candidates, the searched symbol among them.
    Ambiguous,
    /// Member access on an expression (`Get().Foo`), which needs types.
    ExpressionQualifier,
}

/// An occurrence of the searched name that may refer to the symbol but
/// could not be bound to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub file: FileId,
    pub range: TextRange,
    pub location: LineCol,
    pub reason: UnresolvedReason,
}

/// Result of a reference search.
#[derive(Clone, Debug)]
pub struct ReferenceResult {
    pub symbol: Symbol,
    /// Declaration tokens first within each file, then uses, by position.
    pub references: Vec<Reference>,
    pub unresolved: Vec<UnresolvedReference>,
}

/// Every reference to the type declared by `decl`, across `files`.
pub fn find_references(
    model: &SemanticModel,
    files: &[ParsedFile],
    decl: DeclId,
) -> FixResult<ReferenceResult> {
    if model.tree().get_decl(decl).is_none() {
        return Err(FixError::UnknownDeclaration);
    }
    let symbol = model
        .decl_symbol(decl)
        .ok_or(FixError::MalformedDeclaration)?;

    let oracle = model.oracle();
    let resolver = Resolver::new(&oracle);
    let mut references = Vec::new();
    let mut unresolved = Vec::new();

    for file in files {
        let Some(lowered) = model.file(file.id) else {
            continue;
        };
        let text = &*file.text;
        let tokens = &file.parse.tokens;

        for (i, token) in tokens.iter().enumerate() {
            if token.kind != TokenKind::Ident || token.ident_text(text) != symbol.name.as_str() {
                continue;
            }
            let range = ident_range(token, text);

            match lowered.decl_token(token.range.start()) {
                Some(DeclToken::Type(other)) => {
                    if model.decl_symbol(other).as_ref() == Some(&symbol) {
                        references.push(Reference {
                            file: file.id,
                            range,
                            is_declaration: true,
                        });
                    }
                    continue;
                }
                Some(DeclToken::Other) => continue,
                None => {}
            }

            let reason = match qualified_path(tokens, i, text) {
                None => Some(UnresolvedReason::ExpressionQualifier),
                Some(path) => {
                    let chain = model.chain_at(file.id, token.range.start());
                    match resolver.resolve_path(&chain, &path.segments, path.is_global) {
                        ResolveResult::Found(found) if found == symbol => {
                            references.push(Reference {
                                file: file.id,
                                range,
                                is_declaration: false,
                            });
                            None
                        }
                        ResolveResult::Found(_) => None,
                        ResolveResult::Ambiguous(candidates) if candidates.contains(&symbol) => {
                            Some(UnresolvedReason::Ambiguous)
                        }
                        ResolveResult::Ambiguous(_) => None,
                        ResolveResult::NotFound => Some(UnresolvedReason::NotFound),
                    }
                }
            };

            if let Some(reason) = reason {
                let location = file.line_index.line_col(range.start());
                warn!(
                    file = ?file.id,
                    %location,
                    ?reason,
                    name = %symbol.name,
                    "could not bind reference; leaving it unchanged"
                );
                unresolved.push(UnresolvedReference {
                    file: file.id,
                    range,
                    location,
                    reason,
                });
            }
        }
    }

    Ok(ReferenceResult {
        symbol,
        references,
        unresolved,
    })
}

fn ident_range(token: &Token, text: &str) -> TextRange {
    if token.text(text).starts_with('@') {
        TextRange::new(token.range.start() + TextSize::from(1), token.range.end())
    } else {
        token.range
    }
}

struct QualifiedPath<'t> {
    segments: Vec<&'t str>,
    is_global: bool,
}

/// The dotted name ending at `tokens[index]`, read backwards over `.` and
/// `::` separators and generic argument lists. `None` when the qualifier
/// is an expression rather than a name.
fn qualified_path<'t>(tokens: &[Token], index: usize, text: &'t str) -> Option<QualifiedPath<'t>> {
    let mut segments = vec![tokens[index].ident_text(text)];
    let mut is_global = false;
    let mut pos = index;

    while pos >= 2 && matches!(tokens[pos - 1].kind, TokenKind::Dot | TokenKind::ColonColon) {
        let separator = tokens[pos - 1].kind;
        let mut prev = pos - 2;
        if tokens[prev].kind == TokenKind::Gt {
            prev = matching_lt(tokens, prev)?.checked_sub(1)?;
        }
        let token = &tokens[prev];
        if token.kind != TokenKind::Ident {
            return None;
        }
        let name = token.ident_text(text);
        if separator == TokenKind::ColonColon && name == "global" {
            is_global = true;
            break;
        }
        segments.insert(0, name);
        pos = prev;
    }
    if pos == 1 && matches!(tokens[0].kind, TokenKind::Dot | TokenKind::ColonColon) {
        return None;
    }

    // `this.Foo` and `base.Foo` look the rest up from the enclosing type.
    if segments.len() > 1 && matches!(segments[0], "this" | "base") {
        segments.remove(0);
    }
    Some(QualifiedPath {
        segments,
        is_global,
    })
}

/// Index of the `<` matching the `>` at `close`.
fn matching_lt(tokens: &[Token], close: usize) -> Option<usize> {
    let mut depth = 0usize;
    for pos in (0..=close).rev() {
        match tokens[pos].kind {
            TokenKind::Gt => depth += 1,
            TokenKind::Lt => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            TokenKind::LBrace | TokenKind::RBrace | TokenKind::Semi => return None,
            _ => {}
        }
    }
    None
}
