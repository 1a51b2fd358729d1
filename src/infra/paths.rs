//! Input path resolution.

use crate::infra::error::{SigningError, SigningResult};
use std::fmt;
use std::path::{Path, PathBuf};

/// Absolute path to an existing input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPath(PathBuf);

impl InputPath {
    /// Resolve `path` against the current directory and check it names a file
    pub fn resolve(path: impl AsRef<Path>) -> SigningResult<Self> {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            return Err(SigningError::InputError("Path cannot be empty".to_string()));
        }

        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| {
                    SigningError::InputError(format!(
                        "Cannot resolve {} against current directory: {e}",
                        path.display()
                    ))
                })?
                .join(path)
        };

        if !absolute.is_file() {
            return Err(SigningError::InputError(format!(
                "File not found: {}",
                absolute.display()
            )));
        }

        Ok(Self(absolute))
    }

    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for InputPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for InputPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
