/// Part store boundary for persisting individual document parts.
///
/// The document model does not own package/relationship mechanics; it only
/// needs to load and save the blob of one named part. A `PartStore` is that
/// boundary: the numbering registry flushes its XML through one, and an
/// embedding package layer supplies whatever implementation fits its
/// container format.
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Load/save access to one named part of a document package.
///
/// `save` is a synchronous, all-or-nothing flush with no atomicity
/// guarantees: a failed write leaves the backing store at its last
/// successful state and the error propagates unchanged.
pub trait PartStore {
    /// Load the part's current content, or `None` if the part does not
    /// exist yet.
    fn load(&mut self) -> Result<Option<Vec<u8>>>;

    /// Replace the part's content with `blob`.
    fn save(&mut self, blob: &[u8]) -> Result<()>;
}

/// An in-memory part store.
#[derive(Debug, Default)]
pub struct MemoryPartStore {
    blob: Option<Vec<u8>>,
}

impl MemoryPartStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self { blob: None }
    }

    /// Create a store pre-populated with content.
    pub fn with_blob(blob: Vec<u8>) -> Self {
        Self { blob: Some(blob) }
    }

    /// Get the stored content, if any.
    pub fn blob(&self) -> Option<&[u8]> {
        self.blob.as_deref()
    }
}

impl PartStore for MemoryPartStore {
    fn load(&mut self) -> Result<Option<Vec<u8>>> {
        Ok(self.blob.clone())
    }

    fn save(&mut self, blob: &[u8]) -> Result<()> {
        self.blob = Some(blob.to_vec());
        Ok(())
    }
}

/// A part store backed by a single file on disk.
#[derive(Debug)]
pub struct FilePartStore {
    path: PathBuf,
}

impl FilePartStore {
    /// Create a store backed by `path`. The file is created on first save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PartStore for FilePartStore {
    fn load(&mut self) -> Result<Option<Vec<u8>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read(&self.path)?))
    }

    fn save(&mut self, blob: &[u8]) -> Result<()> {
        std::fs::write(&self.path, blob)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryPartStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(b"<w:numbering/>").unwrap();
        assert_eq!(store.load().unwrap().unwrap(), b"<w:numbering/>");
    }

    #[test]
    fn test_file_store_missing_part() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FilePartStore::new(dir.path().join("numbering.xml"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FilePartStore::new(dir.path().join("numbering.xml"));

        store.save(b"<w:numbering/>").unwrap();
        assert_eq!(store.load().unwrap().unwrap(), b"<w:numbering/>");

        // A second save replaces the content wholesale.
        store.save(b"<w:numbering></w:numbering>").unwrap();
        assert_eq!(store.load().unwrap().unwrap(), b"<w:numbering></w:numbering>");
    }
}
