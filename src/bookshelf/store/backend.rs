use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
///
/// A backend only moves the serialized catalog document around. Parsing,
/// recovery and record handling live in [`Catalog`](super::catalog::Catalog).
pub trait StorageBackend {
    /// Read the whole store document as raw bytes.
    /// Returns Ok(None) if the store does not exist yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    /// Content that is not valid text is the catalog's problem, not the backend's.
    fn read(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the whole store document.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, contents: &str) -> Result<()>;

    /// Move the current document out of the way so a fresh one can be written.
    /// Returns the location the old document was moved to.
    fn quarantine(&self, suffix: &str) -> Result<PathBuf>;

    /// Where the document lives. For FsBackend this is the real path,
    /// for MemBackend a virtual one.
    fn location(&self) -> PathBuf;
}
