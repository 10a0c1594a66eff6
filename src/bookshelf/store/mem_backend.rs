use super::backend::StorageBackend;
use crate::error::{CatalogError, Result};
use std::cell::RefCell;
use std::path::PathBuf;

const MEMORY_LOCATION: &str = "memory://library.json";

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the catalog is single-threaded,
/// which lets the `StorageBackend` trait take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    document: RefCell<Option<Vec<u8>>>,
    quarantined: RefCell<Vec<(PathBuf, Vec<u8>)>>,
    writes: RefCell<usize>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing document, as if a file were already on disk.
    pub fn with_document(contents: impl Into<Vec<u8>>) -> Self {
        let backend = Self::default();
        *backend.document.borrow_mut() = Some(contents.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// The current document, lossily decoded for assertions.
    pub fn document(&self) -> Option<String> {
        self.document
            .borrow()
            .as_deref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }

    pub fn quarantined(&self) -> Vec<(PathBuf, Vec<u8>)> {
        self.quarantined.borrow().clone()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.document.borrow().clone())
    }

    fn write(&self, contents: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(CatalogError::Store("Simulated write error".to_string()));
        }
        *self.document.borrow_mut() = Some(contents.as_bytes().to_vec());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn quarantine(&self, suffix: &str) -> Result<PathBuf> {
        let old = self
            .document
            .borrow_mut()
            .take()
            .ok_or_else(|| CatalogError::Store("Nothing to quarantine".to_string()))?;
        let target = PathBuf::from(format!("{}.corrupt-{}", MEMORY_LOCATION, suffix));
        self.quarantined.borrow_mut().push((target.clone(), old));
        Ok(target)
    }

    fn location(&self) -> PathBuf {
        PathBuf::from(MEMORY_LOCATION)
    }
}
