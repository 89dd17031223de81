//! Diagnostics: findings reported by the naming checker.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::ids::DeclId;
use crate::base::{FileId, LineCol, LineIndex, TextRange};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a finding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Error,
    #[default]
    Warning,
    Info,
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Hint => "hint",
        })
    }
}

/// A rule violation at one identifier.
///
/// Findings belong to the snapshot they were computed from; `revision`
/// records which one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Finding {
    pub file: FileId,
    /// Range of the declaration's identifier token.
    pub range: TextRange,
    /// Start of `range`, 0-indexed.
    pub location: LineCol,
    pub severity: Severity,
    pub code: Arc<str>,
    pub message: Arc<str>,
    pub decl: DeclId,
    pub revision: u64,
}

impl Finding {
    /// 1-based line of the identifier.
    pub fn line(&self) -> u32 {
        self.location.line_one_indexed()
    }

    /// 1-based column of the identifier, counted in UTF-8 bytes.
    pub fn column(&self) -> u32 {
        self.location.col_one_indexed()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({},{}): {} {}: {}",
            self.file,
            self.line(),
            self.column(),
            self.severity,
            self.code,
            self.message
        )
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Rule codes.
pub mod codes {
    /// Interface name does not start with `I`.
    pub const INTERFACE_NAMES_MUST_BEGIN_WITH_I: &str = "SA1302";

    pub const INTERFACE_NAMES_MUST_BEGIN_WITH_I_MESSAGE: &str =
        "Interface names must begin with 'I'";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Accumulates findings for one snapshot.
#[derive(Clone, Debug)]
pub struct DiagnosticCollector {
    findings: Vec<Finding>,
    severity: Severity,
    revision: u64,
}

impl DiagnosticCollector {
    pub fn new(severity: Severity, revision: u64) -> Self {
        Self {
            findings: Vec::new(),
            severity,
            revision,
        }
    }

    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Report an interface whose name lacks the `I` prefix.
    pub fn interface_naming(
        &mut self,
        decl: DeclId,
        file: FileId,
        name_range: TextRange,
        line_index: &LineIndex,
    ) {
        let finding = Finding {
            file,
            range: name_range,
            location: line_index.line_col(name_range.start()),
            severity: self.severity,
            code: Arc::from(codes::INTERFACE_NAMES_MUST_BEGIN_WITH_I),
            message: Arc::from(codes::INTERFACE_NAMES_MUST_BEGIN_WITH_I_MESSAGE),
            decl,
            revision: self.revision,
        };
        trace!(%finding, "finding");
        self.add(finding);
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn findings_for_file(&self, file: FileId) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.file == file).collect()
    }

    /// Findings ordered by file, then position.
    pub fn finish(mut self) -> Vec<Finding> {
        self.findings
            .sort_by_key(|f| (f.file, f.range.start(), f.decl));
        self.findings
    }
}
