//! Lifecycle of one uniquely-named scratch directory.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::harness::error::HarnessError;

/// A uniquely-named temporary directory, recursively deleted when the value
/// goes out of scope.
///
/// The name is a fixed `tempproj-` prefix plus a random suffix, so two
/// instances created concurrently never collide. Explicit [`release`]
/// surfaces deletion failures as [`HarnessError::Cleanup`]; the drop
/// fallback only logs them, so a failure already unwinding out of the
/// scoped block is never masked by cleanup.
///
/// [`release`]: ScratchDir::release
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    inner: Option<TempDir>,
}

impl ScratchDir {
    /// Create a fresh scratch directory under the system temp location.
    pub fn create() -> Result<Self, HarnessError> {
        let inner = tempfile::Builder::new()
            .prefix("tempproj-")
            .tempdir()
            .map_err(HarnessError::DirectoryCreation)?;
        let path = inner.path().to_path_buf();
        debug!(path = %path.display(), "created scratch directory");
        Ok(Self {
            path,
            inner: Some(inner),
        })
    }

    /// Absolute path of the scratch root. After release the path still
    /// identifies where the directory was, but nothing exists there.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Recursively delete the directory and everything under it.
    /// Calling it again after a successful release is a no-op.
    pub fn release(&mut self) -> Result<(), HarnessError> {
        match self.inner.take() {
            Some(dir) => {
                debug!(path = %self.path.display(), "removing scratch directory");
                dir.close().map_err(|source| HarnessError::Cleanup {
                    path: self.path.clone(),
                    source,
                })
            }
            None => Ok(()),
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Some(dir) = self.inner.take() {
            if let Err(err) = dir.close() {
                warn!(path = %self.path.display(), error = %err, "failed to remove scratch directory");
            }
        }
    }
}
