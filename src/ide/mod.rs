//! Host-facing API: snapshots, reference search, rename edits and fixes.
//!
//! ## Usage
//!
//! ```
//! use namecheck::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! let file = host.set_file_content("Foo.cs", "interface Foo {}\nclass Bar : Foo {}\n");
//!
//! let analysis = host.analysis();
//! let findings = analysis.naming_findings();
//! assert_eq!((findings[0].line(), findings[0].column()), (1, 11));
//!
//! let outcome = analysis.fix(&findings[0]).unwrap();
//! host.apply_change(&outcome.change).unwrap();
//! assert_eq!(
//!     host.file_text(file).as_deref(),
//!     Some("interface IFoo {}\nclass Bar : IFoo {}\n")
//! );
//! ```

mod analysis;
mod edit;
mod references;
mod rename;

pub use analysis::{
    AppliedFix, Analysis, AnalysisConfig, AnalysisHost, FixAllReport, FixFailure, ParsedFile,
};
pub use edit::{SourceChange, TextEdit, apply_edits, validate_edits};
pub use references::{
    Reference, ReferenceResult, UnresolvedReason, UnresolvedReference, find_references,
};
pub use rename::{RenameOutcome, rename};
