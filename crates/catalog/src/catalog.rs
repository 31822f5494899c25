use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::Result;

/// Extensions of files that belong to the library.
pub const VALID_SUFFIXES: [&str; 2] = ["h", "cpp"];

/// Directory names that are never part of the library.
pub const IGNORED_DIRS: [&str; 4] = ["__pycache__", ".git", "beta", "tests"];

/// Catalog of library files under a codebook root
pub struct FileCatalog {
    root: PathBuf,
}

impl FileCatalog {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the root and collect every library file as a canonical absolute path.
    ///
    /// Subtrees rooted at an ignored directory name are pruned entirely.
    pub fn scan(&self) -> Result<BTreeSet<PathBuf>> {
        let mut files = BTreeSet::new();

        let walker = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(entry));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if !Self::is_library_file(entry.path()) {
                continue;
            }
            files.insert(entry.path().canonicalize()?);
        }

        log::debug!(
            "catalogued {} files under {}",
            files.len(),
            self.root.display()
        );
        Ok(files)
    }

    /// Re-express a scanned set relative to the root, sorted, for display.
    pub fn relative(&self, files: &BTreeSet<PathBuf>) -> Result<Vec<PathBuf>> {
        let root = self.root.canonicalize()?;
        Ok(files
            .iter()
            .map(|f| f.strip_prefix(&root).unwrap_or(f.as_path()).to_path_buf())
            .collect())
    }

    fn is_ignored(entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| IGNORED_DIRS.contains(&name))
    }

    fn is_library_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| VALID_SUFFIXES.contains(&ext))
    }
}
