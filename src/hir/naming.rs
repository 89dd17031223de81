//! The interface naming convention.
//!
//! An interface name conforms when it is `I` alone, or `I` followed by an
//! uppercase letter. Interfaces imported from native code keep their
//! original names: a `[ComImport]` interface nested anywhere inside a type
//! whose name ends in `NativeMethods` is not reported.

use rayon::prelude::*;
use tracing::debug;

use super::ids::DeclId;
use super::scope::{Declaration, Marker, ScopeTree};

/// Suffix of the containing type names that exempt native imports.
pub const NATIVE_METHODS_SUFFIX: &str = "NativeMethods";

/// Whether `name` follows the `I` prefix convention.
///
/// ```
/// use namecheck::hir::is_conforming;
///
/// assert!(is_conforming("IFoo"));
/// assert!(is_conforming("I"));
/// assert!(!is_conforming("Foo"));
/// assert!(!is_conforming("Item"));
/// ```
pub fn is_conforming(name: &str) -> bool {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some('I'), None) => true,
        (Some('I'), Some(second)) => second.is_uppercase(),
        _ => false,
    }
}

/// Whether a declaration is exempt as a native interop import.
pub fn is_native_import_exempt(tree: &ScopeTree, decl: &Declaration) -> bool {
    decl.has_marker(Marker::NativeInteropImport)
        && tree.ancestors(decl.scope).any(|scope| {
            let data = tree.scope(scope);
            data.is_type() && data.name.ends_with(NATIVE_METHODS_SUFFIX)
        })
}

/// Scans every interface declaration of a [`ScopeTree`].
#[derive(Clone, Copy, Debug)]
pub struct ConventionChecker<'a> {
    tree: &'a ScopeTree,
    parallel: bool,
}

impl<'a> ConventionChecker<'a> {
    pub fn new(tree: &'a ScopeTree) -> Self {
        Self {
            tree,
            parallel: true,
        }
    }

    /// Run on the rayon pool (the default) or on the calling thread.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Whether `decl` should be reported.
    pub fn violates(&self, id: DeclId) -> bool {
        let decl = self.tree.decl(id);
        if !decl.is_interface() {
            return false;
        }
        let Some(name) = &decl.name else {
            debug!(?id, file = ?decl.file, range = ?decl.range, "skipping interface without a name");
            return false;
        };
        !is_conforming(name) && !is_native_import_exempt(self.tree, decl)
    }

    /// Every violating declaration, in id order.
    pub fn check(&self) -> Vec<DeclId> {
        let ids = (0..self.tree.decl_count() as u32).map(DeclId);
        if self.parallel {
            ids.collect::<Vec<_>>()
                .into_par_iter()
                .filter(|&id| self.violates(id))
                .collect()
        } else {
            ids.filter(|&id| self.violates(id)).collect()
        }
    }
}
