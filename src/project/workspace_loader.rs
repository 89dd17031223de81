use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::LoadError;
use crate::ide::AnalysisHost;

/// Extension of the source files picked up from a directory.
pub const SOURCE_EXTENSION: &str = "cs";

/// Loads C# sources from disk into an [`AnalysisHost`].
pub struct WorkspaceLoader {
    extension: String,
}

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self {
            extension: SOURCE_EXTENSION.to_string(),
        }
    }

    /// Pick up files with another extension instead.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Loads every matching file under `path` into `host`, in path order.
    ///
    /// Files are read in parallel. A file that cannot be read does not stop
    /// the others from loading; all read failures are returned together
    /// once every readable file is in the host.
    pub fn load_directory_into_host<P: Into<PathBuf>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<usize, LoadError> {
        let path = path.into();
        if !path.is_dir() {
            return Err(LoadError::NotADirectory(path));
        }

        let paths = self.collect_file_paths(&path)?;
        let results: Vec<_> = paths
            .par_iter()
            .map(|path| read_file(path).map(|text| (path, text)))
            .collect();

        let mut loaded = 0;
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok((path, text)) => {
                    host.set_file_content(path, text);
                    loaded += 1;
                }
                Err(error) => {
                    warn!(%error, "skipping unreadable file");
                    errors.push(error);
                }
            }
        }
        debug!(dir = %path.display(), loaded, failed = errors.len(), "loaded directory");

        if errors.is_empty() {
            Ok(loaded)
        } else {
            Err(LoadError::Partial(errors))
        }
    }

    /// Loads a single file into `host`.
    pub fn load_file_into_host<P: AsRef<Path>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<(), LoadError> {
        let path = path.as_ref();
        let text = read_file(path)?;
        host.set_file_content(path, text);
        Ok(())
    }

    /// Matching files under `dir`, sorted.
    pub fn collect_file_paths(&self, dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry?;
            if entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext == self.extension.as_str())
            {
                paths.push(entry.into_path());
            }
        }
        paths.sort();
        Ok(paths)
    }
}

impl Default for WorkspaceLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })
}
