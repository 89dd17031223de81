//! Error types for the fix pipeline and workspace loading.
//!
//! Checking never fails: malformed input degrades to "no finding". Only
//! fix requests and file loading produce errors, and a fix error is
//! scoped to the one finding being fixed.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::base::{FileId, TextRange};

/// Errors that can occur while computing or applying a rename fix.
#[derive(Debug, Error)]
pub enum FixError {
    /// The declaration has no identifier token, so there is nothing to rename.
    #[error("declaration has no identifier to rename")]
    MalformedDeclaration,

    /// The suffix search hit its iteration ceiling without finding a free name.
    #[error("no free name found for '{candidate}' after {attempts} suffixes")]
    ResolutionExhausted { candidate: String, attempts: u32 },

    /// The declaration already follows the convention.
    #[error("'{name}' already begins with the interface marker")]
    AlreadyConforming { name: String },

    /// The declaration is not an interface.
    #[error("'{name}' is not an interface declaration")]
    NotAnInterface { name: String },

    /// The finding points at a declaration this snapshot does not know.
    #[error("finding does not target a declaration of this snapshot")]
    UnknownDeclaration,

    /// A change or finding was computed against an older revision.
    #[error("computed against revision {expected}, workspace is at revision {actual}")]
    StaleSnapshot { expected: u64, actual: u64 },

    /// The requested replacement is not a valid identifier.
    #[error("invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    #[error("unknown file {0}")]
    UnknownFile(FileId),

    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Errors raised while validating a set of text edits against a file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("edits overlap at {first:?} and {second:?}")]
    Overlap { first: TextRange, second: TextRange },

    #[error("edit range {range:?} exceeds text length {len}")]
    OutOfBounds { range: TextRange, len: u32 },
}

/// Errors raised while loading a workspace from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("directory not found: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to load {} file(s):\n  {}", .0.len(), render_failures(.0))]
    Partial(Vec<LoadError>),

    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

fn render_failures(errors: &[LoadError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n  ")
}

/// Result type for fix operations.
pub type FixResult<T> = Result<T, FixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_message_names_candidate() {
        let err = FixError::ResolutionExhausted {
            candidate: "IFoo".to_string(),
            attempts: 3,
        };
        assert_eq!(err.to_string(), "no free name found for 'IFoo' after 3 suffixes");
    }

    #[test]
    fn test_edit_error_converts() {
        let range = TextRange::new(0.into(), 2.into());
        let err: FixError = EditError::OutOfBounds { range, len: 1 }.into();
        assert!(matches!(err, FixError::Edit(EditError::OutOfBounds { .. })));
    }

    #[test]
    fn test_partial_load_lists_every_failure() {
        let err = LoadError::Partial(vec![
            LoadError::NotADirectory(PathBuf::from("a")),
            LoadError::NotADirectory(PathBuf::from("b")),
        ]);
        let message = err.to_string();
        assert!(message.starts_with("failed to load 2 file(s)"));
        assert!(message.contains("directory not found: a"));
        assert!(message.contains("directory not found: b"));
    }
}
