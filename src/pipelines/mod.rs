//! Workflow pipelines orchestrating sign and verify calls.
//!
//! Each input path produces one `FileOutcome`. Failures tied to a single
//! path stay inside its outcome; only a session-level configuration failure
//! is returned from a workflow as an error.

pub mod session;
pub mod sign;
pub mod verify;

use crate::infra::error::{PathFailure, SigningError};
use std::path::{Path, PathBuf};

pub use session::SigningSession;
pub use sign::{SignOptions, SignWorkflow};
pub use verify::VerifyWorkflow;

/// Result of processing one input path.
#[derive(Debug)]
pub struct FileOutcome<T> {
    /// Absolute path when it could be resolved, otherwise the path as given.
    pub path: PathBuf,
    pub result: Result<T, SigningError>,
}

impl<T> FileOutcome<T> {
    #[must_use]
    pub fn succeeded(path: impl Into<PathBuf>, value: T) -> Self {
        Self {
            path: path.into(),
            result: Ok(value),
        }
    }

    #[must_use]
    pub fn failed(path: impl AsRef<Path>, error: SigningError) -> Self {
        log::warn!("{}: {}", path.as_ref().display(), error);
        Self {
            path: path.as_ref().to_path_buf(),
            result: Err(error),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Convert into a plain result, attaching the path to any error.
    pub fn into_result(self) -> Result<T, PathFailure> {
        let path = self.path;
        self.result.map_err(|error| PathFailure { path, error })
    }
}
