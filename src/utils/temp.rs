use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Holds an uploaded file on disk for the lifetime of one conversion request.
///
/// The backing directory is unique per request, so concurrent uploads that
/// share a filename never collide. The original filename is kept as the leaf
/// of the path because the converter dispatches on the extension.
pub struct TransientFile {
    dir: TempDir,
    path: PathBuf,
}

impl TransientFile {
    /// Writes `bytes` verbatim to `<tempdir>/<name>`.
    pub fn create(name: &str, bytes: &[u8]) -> std::io::Result<Self> {
        let dir = TempDir::new()?;
        let path = dir.path().join(name);
        std::fs::write(&path, bytes)?;
        Ok(Self { dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the persisted file as reported by the filesystem.
    pub fn size_on_disk(&self) -> std::io::Result<u64> {
        Ok(std::fs::metadata(&self.path)?.len())
    }

    /// Removes the file and its directory. Deleting the transient file is
    /// part of the request contract; a failure here aborts the request
    /// instead of leaking the upload. Dropping the guard without calling
    /// this still deletes, but swallows the error.
    pub fn close(self) -> std::io::Result<()> {
        self.dir.close()
    }
}
