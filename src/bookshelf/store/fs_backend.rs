use super::backend::StorageBackend;
use crate::error::{CatalogError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores the catalog as a single JSON file.
pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(CatalogError::Io)?;
        }
        Ok(())
    }

    fn file_name(&self) -> Result<String> {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                CatalogError::Store(format!(
                    "Store path has no file name: {}",
                    self.path.display()
                ))
            })
    }
}

impl StorageBackend for FsBackend {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CatalogError::Io(e)),
        }
    }

    fn write(&self, contents: &str) -> Result<()> {
        let dir = self.parent_dir();
        self.ensure_dir(&dir)?;

        let tmp_path = dir.join(format!(".{}-{}.tmp", self.file_name()?, Uuid::new_v4()));
        fs::write(&tmp_path, contents).map_err(CatalogError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(CatalogError::Io(e));
        }
        Ok(())
    }

    fn quarantine(&self, suffix: &str) -> Result<PathBuf> {
        let target = self
            .parent_dir()
            .join(format!("{}.corrupt-{}", self.file_name()?, suffix));
        fs::rename(&self.path, &target).map_err(CatalogError::Io)?;
        Ok(target)
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
