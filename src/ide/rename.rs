//! Rename a type declaration and every reference bound to it.

use smol_str::SmolStr;

use super::analysis::ParsedFile;
use super::edit::{SourceChange, TextEdit};
use super::references::{UnresolvedReference, find_references};
use crate::error::{FixError, FixResult};
use crate::hir::{DeclId, SemanticModel};
use crate::syntax::is_identifier;

/// Edits for one rename, plus the occurrences left untouched.
#[derive(Clone, Debug)]
pub struct RenameOutcome {
    pub old_name: SmolStr,
    pub new_name: SmolStr,
    pub change: SourceChange,
    /// Non-empty when some occurrence could not be bound; the rename is
    /// then partial.
    pub unresolved: Vec<UnresolvedReference>,
}

impl RenameOutcome {
    pub fn is_partial(&self) -> bool {
        !self.unresolved.is_empty()
    }
}

/// One edit per reference of `decl`, replacing only the identifier text.
pub fn rename(
    model: &SemanticModel,
    files: &[ParsedFile],
    decl: DeclId,
    new_name: &str,
    revision: u64,
) -> FixResult<RenameOutcome> {
    if !is_identifier(new_name) {
        return Err(FixError::InvalidIdentifier(new_name.to_string()));
    }

    let found = find_references(model, files, decl)?;
    let mut change = SourceChange::new(revision);
    for reference in &found.references {
        change.insert(reference.file, TextEdit::replace(reference.range, new_name));
    }

    Ok(RenameOutcome {
        old_name: found.symbol.name.clone(),
        new_name: SmolStr::new(new_name),
        change,
        unresolved: found.unresolved,
    })
}
