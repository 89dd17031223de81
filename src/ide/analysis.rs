//! Analysis host and snapshots.
//!
//! [`AnalysisHost`] owns the mutable state: file contents, external
//! symbols and the revision counter. [`Analysis`] is an immutable snapshot
//! of one revision that answers queries. Fixes are computed on a snapshot
//! and applied back to the host, which refuses changes computed against an
//! older revision.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::{debug, info, warn};

use super::edit::{SourceChange, apply_edits};
use super::references::{ReferenceResult, UnresolvedReference, find_references};
use super::rename::{RenameOutcome, rename};
use crate::base::{FileId, LineCol, LineIndex};
use crate::error::{FixError, FixResult};
use crate::hir::{
    ConflictResolver, ConventionChecker, DEFAULT_MAX_SUFFIX_ATTEMPTS, DeclId, Declaration,
    DiagnosticCollector, ExternalSymbols, FileSet, Finding, SemanticModel, Severity, qualify,
    split_qualified,
};
use crate::syntax::{Parse, parse};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Settings shared by every snapshot of a host.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisConfig {
    /// Ceiling for the numeric suffix search of a replacement name.
    pub max_suffix_attempts: u32,
    /// Run the naming check on the rayon thread pool.
    pub parallel_check: bool,
    /// Severity attached to findings.
    pub severity: Severity,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_suffix_attempts: DEFAULT_MAX_SUFFIX_ATTEMPTS,
            parallel_check: true,
            severity: Severity::Warning,
        }
    }
}

impl AnalysisConfig {
    pub fn with_max_suffix_attempts(mut self, attempts: u32) -> Self {
        self.max_suffix_attempts = attempts;
        self
    }

    pub fn with_parallel_check(mut self, parallel: bool) -> Self {
        self.parallel_check = parallel;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

// ============================================================================
// HOST
// ============================================================================

/// Owner of the sources being analysed.
#[derive(Debug, Default)]
pub struct AnalysisHost {
    files: FileSet,
    external: Arc<ExternalSymbols>,
    config: AnalysisConfig,
    revision: u64,
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Bumped on every change to sources or external symbols.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Add or replace a file.
    pub fn set_file_content(&mut self, path: impl AsRef<Path>, text: impl Into<Arc<str>>) -> FileId {
        let file = self.files.file_id(path.as_ref());
        self.files.set_contents(file, text);
        self.revision += 1;
        file
    }

    pub fn remove_file(&mut self, file: FileId) -> bool {
        let removed = self.files.remove(file);
        if removed {
            self.revision += 1;
        }
        removed
    }

    pub fn file_text(&self, file: FileId) -> Option<Arc<str>> {
        self.files.contents(file)
    }

    pub fn file_path(&self, file: FileId) -> Option<PathBuf> {
        self.files.path(file)
    }

    pub fn file_id(&self, path: impl AsRef<Path>) -> Option<FileId> {
        self.files.lookup(path.as_ref())
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Symbols of referenced assemblies, checked for collisions but never edited.
    pub fn set_external_symbols(&mut self, external: ExternalSymbols) {
        self.external = Arc::new(external);
        self.revision += 1;
    }

    /// Parse and lower every file into a snapshot of the current revision.
    pub fn analysis(&self) -> Analysis {
        let files: Vec<ParsedFile> = self
            .files
            .snapshot()
            .into_par_iter()
            .map(|(id, text)| ParsedFile::new(id, text))
            .collect();
        let parses: Vec<(FileId, &Parse)> = files.iter().map(|f| (f.id, &f.parse)).collect();
        let model = SemanticModel::build(&parses, self.external.clone());

        Analysis {
            revision: self.revision,
            config: self.config.clone(),
            files,
            model,
        }
    }

    /// Apply a change computed on the snapshot of the current revision.
    ///
    /// Every edit is validated before any file is touched, so a rejected
    /// change leaves the host as it was.
    pub fn apply_change(&mut self, change: &SourceChange) -> FixResult<()> {
        if change.revision != self.revision {
            return Err(FixError::StaleSnapshot {
                expected: change.revision,
                actual: self.revision,
            });
        }
        if change.is_empty() {
            return Ok(());
        }

        let mut updated = Vec::with_capacity(change.edits.len());
        for (&file, edits) in &change.edits {
            let text = self.files.contents(file).ok_or(FixError::UnknownFile(file))?;
            updated.push((file, apply_edits(&text, edits)?));
        }
        for (file, text) in updated {
            self.files.set_contents(file, text);
        }

        self.revision += 1;
        debug!(
            revision = self.revision,
            files = change.edits.len(),
            edits = change.edit_count(),
            "applied change"
        );
        Ok(())
    }

    /// Fix every finding, one at a time, re-analysing after each fix.
    ///
    /// Each declaration is fixed at most once per batch. A finding whose
    /// fix fails is recorded and skipped; the remaining findings are still
    /// fixed.
    pub fn fix_all(&mut self) -> FixAllReport {
        let mut report = FixAllReport::default();
        let mut done: FxHashSet<Arc<str>> = FxHashSet::default();

        loop {
            let analysis = self.analysis();
            let next = analysis.naming_findings().into_iter().find_map(|finding| {
                let key = analysis.decl_key(finding.decl);
                (!done.contains(&key)).then_some((finding, key))
            });
            let Some((finding, key)) = next else {
                break;
            };
            let name = analysis
                .declaration(finding.decl)
                .and_then(|d| d.name.clone())
                .unwrap_or_default();

            let result = analysis.fix(&finding).and_then(|outcome| {
                if outcome.change.is_empty() {
                    return Err(FixError::MalformedDeclaration);
                }
                self.apply_change(&outcome.change)?;
                Ok(outcome)
            });

            match result {
                Ok(outcome) => {
                    let (container, _) = split_qualified(&key);
                    done.insert(Arc::from(qualify(container, &outcome.new_name)));
                    done.insert(key);
                    if outcome.is_partial() {
                        warn!(
                            old = %outcome.old_name,
                            new = %outcome.new_name,
                            unresolved = outcome.unresolved.len(),
                            "partial rename"
                        );
                    }
                    report.applied.push(AppliedFix {
                        file: finding.file,
                        old_name: outcome.old_name,
                        new_name: outcome.new_name,
                        unresolved: outcome.unresolved,
                    });
                }
                Err(error) => {
                    warn!(file = ?finding.file, %name, %error, "fix failed");
                    done.insert(key);
                    report.failed.push(FixFailure {
                        file: finding.file,
                        name,
                        location: finding.location,
                        error,
                    });
                }
            }
        }

        info!(
            applied = report.applied.len(),
            failed = report.failed.len(),
            "fix-all finished"
        );
        report
    }
}

/// A fix applied by [`AnalysisHost::fix_all`].
#[derive(Clone, Debug)]
pub struct AppliedFix {
    pub file: FileId,
    pub old_name: SmolStr,
    pub new_name: SmolStr,
    pub unresolved: Vec<UnresolvedReference>,
}

/// A finding [`AnalysisHost::fix_all`] could not fix.
#[derive(Debug)]
pub struct FixFailure {
    pub file: FileId,
    pub name: SmolStr,
    pub location: LineCol,
    pub error: FixError,
}

/// Outcome of [`AnalysisHost::fix_all`]. Findings may remain afterwards:
/// a failed fix leaves its finding, and a fix of a name whose second letter
/// is lowercase (`iFoo` to `IiFoo`) does not make it conform.
#[derive(Debug, Default)]
pub struct FixAllReport {
    pub applied: Vec<AppliedFix>,
    pub failed: Vec<FixFailure>,
}

impl FixAllReport {
    /// No failures and no partial renames.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.applied.iter().all(|a| a.unresolved.is_empty())
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// One parsed source file of a snapshot.
#[derive(Clone, Debug)]
pub struct ParsedFile {
    pub id: FileId,
    pub text: Arc<str>,
    pub parse: Parse,
    pub line_index: LineIndex,
}

impl ParsedFile {
    pub fn new(id: FileId, text: Arc<str>) -> Self {
        let parse = parse(&text);
        let line_index = LineIndex::new(&text);
        Self {
            id,
            text,
            parse,
            line_index,
        }
    }
}

/// Immutable view of one revision.
#[derive(Debug)]
pub struct Analysis {
    revision: u64,
    config: AnalysisConfig,
    files: Vec<ParsedFile>,
    model: SemanticModel,
}

impl Analysis {
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn model(&self) -> &SemanticModel {
        &self.model
    }

    pub fn files(&self) -> &[ParsedFile] {
        &self.files
    }

    pub fn file(&self, file: FileId) -> Option<&ParsedFile> {
        self.files.iter().find(|f| f.id == file)
    }

    /// Interfaces violating the naming rule, ordered by file and position.
    pub fn naming_findings(&self) -> Vec<Finding> {
        let tree = self.model.tree();
        let checker = ConventionChecker::new(tree).parallel(self.config.parallel_check);
        let mut collector = DiagnosticCollector::new(self.config.severity, self.revision);

        for id in checker.check() {
            let decl = tree.decl(id);
            let (Some(range), Some(file)) = (decl.name_range, self.file(decl.file)) else {
                continue;
            };
            collector.interface_naming(id, decl.file, range, &file.line_index);
        }
        collector.finish()
    }

    pub fn declaration(&self, decl: DeclId) -> Option<&Declaration> {
        self.model.tree().get_decl(decl)
    }

    /// The conflict-free name a fix of `decl` would use.
    pub fn resolve_new_name(&self, decl: DeclId) -> FixResult<SmolStr> {
        ConflictResolver::new(&self.model)
            .with_max_attempts(self.config.max_suffix_attempts)
            .resolve(decl)
    }

    pub fn find_references(&self, decl: DeclId) -> FixResult<ReferenceResult> {
        find_references(&self.model, &self.files, decl)
    }

    /// Rename `decl` to `new_name` without any conflict check.
    pub fn rename(&self, decl: DeclId, new_name: &str) -> FixResult<RenameOutcome> {
        rename(&self.model, &self.files, decl, new_name, self.revision)
    }

    /// Resolve a conflict-free name for a finding and compute the edits.
    pub fn fix(&self, finding: &Finding) -> FixResult<RenameOutcome> {
        if finding.revision != self.revision {
            return Err(FixError::StaleSnapshot {
                expected: finding.revision,
                actual: self.revision,
            });
        }
        let decl = self
            .declaration(finding.decl)
            .ok_or(FixError::UnknownDeclaration)?;
        if decl.file != finding.file || decl.name_range != Some(finding.range) {
            return Err(FixError::UnknownDeclaration);
        }

        let new_name = self.resolve_new_name(finding.decl)?;
        self.rename(finding.decl, &new_name)
    }

    /// Qualified name identifying a declaration across snapshots.
    fn decl_key(&self, decl: DeclId) -> Arc<str> {
        self.model
            .tree()
            .decl_qualified_name(decl)
            .cloned()
            .unwrap_or_else(|| Arc::from(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_tracks_changes() {
        let mut host = AnalysisHost::new();
        assert_eq!(host.revision(), 0);

        let file = host.set_file_content("Foo.cs", "interface Foo {}");
        assert_eq!(host.revision(), 1);
        host.set_external_symbols(ExternalSymbols::new());
        assert_eq!(host.revision(), 2);
        assert!(host.remove_file(file));
        assert_eq!(host.revision(), 3);
        assert!(!host.remove_file(file));
        assert_eq!(host.revision(), 3);
    }

    #[test]
    fn test_fix_rejects_stale_finding() {
        let mut host = AnalysisHost::new();
        host.set_file_content("Foo.cs", "interface Foo {}");
        let old = host.analysis();
        let finding = old.naming_findings().remove(0);

        host.set_file_content("Bar.cs", "class Bar {}");
        let current = host.analysis();
        assert!(matches!(
            current.fix(&finding),
            Err(FixError::StaleSnapshot { expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn test_apply_change_rejects_stale_change() {
        let mut host = AnalysisHost::new();
        host.set_file_content("Foo.cs", "interface Foo {}");
        let analysis = host.analysis();
        let finding = analysis.naming_findings().remove(0);
        let outcome = analysis.fix(&finding).unwrap();

        host.apply_change(&outcome.change).unwrap();
        assert!(matches!(
            host.apply_change(&outcome.change),
            Err(FixError::StaleSnapshot { .. })
        ));
        let file = host.file_id("Foo.cs").unwrap();
        assert_eq!(host.file_text(file).as_deref(), Some("interface IFoo {}"));
    }

    #[test]
    fn test_config_builders() {
        let config = AnalysisConfig::default()
            .with_max_suffix_attempts(5)
            .with_parallel_check(false)
            .with_severity(Severity::Error);

        assert_eq!(config.max_suffix_attempts, 5);
        assert!(!config.parallel_check);
        assert_eq!(config.severity, Severity::Error);
        assert_eq!(AnalysisConfig::default().max_suffix_attempts, 10_000);
    }
}
