//! Loading sources from disk.

mod workspace_loader;

pub use workspace_loader::{SOURCE_EXTENSION, WorkspaceLoader};
