//! Source file registry: paths, ids and current contents.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::base::FileId;

/// Assigns stable [`FileId`]s to paths and holds the current text of each
/// file. Ids are never reused, even after a file is removed.
#[derive(Debug, Default)]
pub struct FileSet {
    inner: RwLock<FileSetInner>,
}

#[derive(Debug, Default)]
struct FileSetInner {
    path_to_id: IndexMap<PathBuf, FileId>,
    id_to_path: IndexMap<FileId, PathBuf>,
    contents: IndexMap<FileId, Arc<str>>,
    next_id: u32,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `path`, assigning a fresh one on first sight.
    pub fn file_id(&self, path: &Path) -> FileId {
        {
            let inner = self.inner.read();
            if let Some(&id) = inner.path_to_id.get(path) {
                return id;
            }
        }

        let mut inner = self.inner.write();
        // Another writer may have won the race.
        if let Some(&id) = inner.path_to_id.get(path) {
            return id;
        }

        let id = FileId::new(inner.next_id);
        inner.next_id += 1;
        inner.path_to_id.insert(path.to_owned(), id);
        inner.id_to_path.insert(id, path.to_owned());
        id
    }

    /// Id of `path` if it is registered.
    pub fn lookup(&self, path: &Path) -> Option<FileId> {
        self.inner.read().path_to_id.get(path).copied()
    }

    pub fn path(&self, file: FileId) -> Option<PathBuf> {
        self.inner.read().id_to_path.get(&file).cloned()
    }

    pub fn set_contents(&self, file: FileId, contents: impl Into<Arc<str>>) {
        self.inner.write().contents.insert(file, contents.into());
    }

    pub fn contents(&self, file: FileId) -> Option<Arc<str>> {
        self.inner.read().contents.get(&file).cloned()
    }

    /// Forget a file. Returns whether it was registered.
    pub fn remove(&self, file: FileId) -> bool {
        let mut inner = self.inner.write();
        let removed = inner.id_to_path.shift_remove(&file);
        if let Some(path) = &removed {
            inner.path_to_id.shift_remove(path);
        }
        inner.contents.shift_remove(&file);
        removed.is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.read().path_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered files, in id order.
    pub fn files(&self) -> Vec<FileId> {
        let mut files: Vec<FileId> = self.inner.read().id_to_path.keys().copied().collect();
        files.sort();
        files
    }

    /// Every file that has contents, with its text, in id order.
    pub fn snapshot(&self) -> Vec<(FileId, Arc<str>)> {
        let inner = self.inner.read();
        let mut files: Vec<(FileId, Arc<str>)> = inner
            .contents
            .iter()
            .map(|(&id, text)| (id, text.clone()))
            .collect();
        files.sort_by_key(|(id, _)| *id);
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_set_id_assignment() {
        let files = FileSet::new();

        let a = files.file_id(Path::new("/src/IFoo.cs"));
        let b = files.file_id(Path::new("/src/Bar.cs"));
        let again = files.file_id(Path::new("/src/IFoo.cs"));

        assert_ne!(a, b);
        assert_eq!(a, again);
        assert_eq!(files.lookup(Path::new("/src/Bar.cs")), Some(b));
        assert_eq!(files.lookup(Path::new("/src/Baz.cs")), None);
    }

    #[test]
    fn test_file_set_contents() {
        let files = FileSet::new();
        let id = files.file_id(Path::new("/src/Foo.cs"));

        assert!(files.contents(id).is_none());
        files.set_contents(id, "interface Foo {}");
        assert_eq!(files.contents(id).as_deref(), Some("interface Foo {}"));
        assert_eq!(files.snapshot().len(), 1);
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let files = FileSet::new();
        let first = files.file_id(Path::new("/a.cs"));
        assert!(files.remove(first));
        assert!(!files.remove(first));

        let second = files.file_id(Path::new("/a.cs"));
        assert_ne!(first, second);
        assert_eq!(files.files(), vec![second]);
        assert_eq!(files.path(second).as_deref(), Some(Path::new("/a.cs")));
    }
}
