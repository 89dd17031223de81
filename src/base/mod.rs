//! Foundation types shared by every layer:
//! - [`FileId`] - handles for analysed files
//! - [`TextRange`], [`TextSize`] - byte positions
//! - [`LineCol`], [`LineIndex`] - line/column conversion
//!
//! This module has NO dependencies on other namecheck modules.

mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
