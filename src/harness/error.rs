//! Error taxonomy for the harness.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the harness.
///
/// A nonzero exit code from a launched command is *not* an error here; it is
/// returned in [`CommandResult`](crate::CommandResult) for the caller to
/// inspect.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The scratch root could not be created. Fatal to the session; no files
    /// were written.
    #[error("failed to create scratch directory: {0}")]
    DirectoryCreation(#[source] io::Error),

    /// One spec entry could not be written. Population aborts; the scratch
    /// directory is still removed on drop.
    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A source file or tree could not be copied into the project. The
    /// session stays usable.
    #[error("failed to import {}: {source}", path.display())]
    Import {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The external command could not be started at all (not found, not
    /// executable).
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The scratch directory could not be removed on an explicit release.
    /// During drop the failure is only logged, so it never masks an error
    /// already in flight.
    #[error("failed to remove scratch directory {}: {source}", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
