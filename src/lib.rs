//! # namecheck-base
//!
//! Checks that C# interface names begin with `I` and computes rename fixes
//! that never collide with another visible symbol.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → AnalysisHost / Analysis: findings, references, rename, fix-all
//!   ↓
//! hir     → Scope arena, symbol oracle, resolver, naming rule, conflict resolver
//!   ↓
//! syntax  → Lexer + declaration-skeleton parser
//!   ↓
//! base    → Primitives (FileId, TextRange, LineIndex)
//! ```
//!
//! `project` loads sources from disk; `error` holds the error enums.

/// Foundation types: FileId, text ranges, line/column conversion
pub mod base;

/// Error types for fixes and loading
pub mod error;

/// High-level IR: scopes, symbols, resolution, naming rule
pub mod hir;

/// Host-facing API: snapshots, findings, references, edits
pub mod ide;

/// Workspace loading from disk
pub mod project;

/// C# declaration-skeleton lexer and parser
pub mod syntax;

pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};
pub use error::{EditError, FixError, FixResult, LoadError};
pub use hir::{ExternalSymbols, Finding, Severity, SymbolKind};
pub use ide::{Analysis, AnalysisConfig, AnalysisHost, FixAllReport, RenameOutcome, SourceChange, TextEdit};
