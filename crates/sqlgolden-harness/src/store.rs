//! Golden files on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sqlgolden_error::{GoldenError, Result};
use tracing::info;

/// A directory of golden reference files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenStore {
    root: PathBuf,
}

impl GoldenStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the golden file for `name`. Only the file-name component of
    /// `name` is kept, so `a/b/users.golden.sql` and `users.golden.sql`
    /// resolve to the same file.
    #[must_use]
    pub fn resolve(&self, name: impl AsRef<Path>) -> PathBuf {
        let name = name.as_ref();
        match name.file_name() {
            Some(file) => self.root.join(file),
            None => self.root.join(name),
        }
    }

    /// Read the reference for `name`; `None` when it does not exist.
    pub fn load(&self, name: impl AsRef<Path>) -> Result<Option<String>> {
        let path = self.resolve(name);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(GoldenError::io(path, err)),
        }
    }

    /// Write `contents` as the reference for `name`, creating directories.
    pub fn save(&self, name: impl AsRef<Path>, contents: &str) -> Result<PathBuf> {
        let path = self.resolve(name);
        write_creating_dirs(&path, contents)?;
        Ok(path)
    }
}

impl Default for GoldenStore {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TESTDATA_DIR)
    }
}

pub(crate) fn write_creating_dirs(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| GoldenError::io(parent, err))?;
    }
    fs::write(path, contents).map_err(|err| GoldenError::io(path, err))?;
    info!(path = %path.display(), bytes = contents.len(), "golden file written");
    Ok(())
}
