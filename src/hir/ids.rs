//! Arena indices for scopes and declarations.
//!
//! Both are only meaningful for the [`ScopeTree`] of the analysis pass that
//! produced them; a new pass assigns fresh ids.
//!
//! [`ScopeTree`]: super::ScopeTree

use std::fmt;

/// Index of a namespace or type scope in a [`ScopeTree`](super::ScopeTree).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// The global namespace. Always the first scope of a tree.
    pub const ROOT: ScopeId = ScopeId(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeId({})", self.0)
    }
}

/// Index of a type declaration in a [`ScopeTree`](super::ScopeTree).
///
/// Each syntactic declaration gets its own id, so the parts of a
/// `partial` type have distinct `DeclId`s but share one body scope.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclId(pub u32);

impl DeclId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId({})", self.0)
    }
}
