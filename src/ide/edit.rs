//! Text edits and multi-file changes.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{FileId, TextRange, TextSize};
use crate::error::EditError;

/// Replace `range` with `replacement`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextEdit {
    pub range: TextRange,
    pub replacement: SmolStr,
}

impl TextEdit {
    pub fn replace(range: TextRange, replacement: impl Into<SmolStr>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }
}

/// Edits across files, computed against one revision of the sources.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceChange {
    pub revision: u64,
    pub edits: IndexMap<FileId, Vec<TextEdit>>,
}

impl SourceChange {
    pub fn new(revision: u64) -> Self {
        Self {
            revision,
            edits: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, file: FileId, edit: TextEdit) {
        self.edits.entry(file).or_default().push(edit);
    }

    pub fn edits_for(&self, file: FileId) -> &[TextEdit] {
        self.edits.get(&file).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.edits.values().all(Vec::is_empty)
    }

    pub fn edit_count(&self) -> usize {
        self.edits.values().map(Vec::len).sum()
    }
}

/// Sort `edits` by position and check them against a text of `len` bytes.
pub fn validate_edits(len: TextSize, edits: &[TextEdit]) -> Result<Vec<&TextEdit>, EditError> {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by_key(|e| (e.range.start(), e.range.end()));

    for edit in &sorted {
        if edit.range.end() > len {
            return Err(EditError::OutOfBounds {
                range: edit.range,
                len: len.into(),
            });
        }
    }
    for pair in sorted.windows(2) {
        if pair[0].range.end() > pair[1].range.start() {
            return Err(EditError::Overlap {
                first: pair[0].range,
                second: pair[1].range,
            });
        }
    }
    Ok(sorted)
}

/// Apply non-overlapping edits to `text`. Nothing outside the edited
/// ranges changes.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> Result<String, EditError> {
    let sorted = validate_edits(TextSize::of(text), edits)?;

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for edit in sorted {
        let start = usize::from(edit.range.start());
        let end = usize::from(edit.range.end());
        let (Some(before), Some(_)) = (text.get(cursor..start), text.get(start..end)) else {
            return Err(EditError::OutOfBounds {
                range: edit.range,
                len: TextSize::of(text).into(),
            });
        };
        out.push_str(before);
        out.push_str(&edit.replacement);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}
