//! Error types for the LL layer.
//!
//! Errors at this level describe what happened to a location in the backing
//! store. Semantic errors like "invalid key" or "no interpreter" belong in
//! higher layers.

use std::io;
use std::path::{Path, PathBuf};

/// Errors at the LL (low-level) layer.
#[derive(Debug)]
pub enum LLError {
    /// The location does not exist.
    NotFound { path: PathBuf },

    /// The location exists but is not a directory.
    ///
    /// For example, listing the entries of a regular file.
    NotADirectory { path: PathBuf },

    /// A non-recursive directory removal found entries in the directory.
    NotEmpty { path: PathBuf },

    /// The stored bytes could not be decoded as requested.
    ///
    /// Raised by text reads on content that is not valid UTF-8.
    InvalidData { path: PathBuf, message: String },

    /// Generic I/O failure.
    ///
    /// Use this for permission errors, full disks, broken handles, etc.
    Transport(Box<dyn std::error::Error + Send + Sync>),
}

impl LLError {
    /// Classify an I/O error raised while operating on `path`.
    pub fn from_io(error: io::Error, path: &Path) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => LLError::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::InvalidData => LLError::InvalidData {
                path: path.to_path_buf(),
                message: error.to_string(),
            },
            _ => LLError::Transport(Box::new(error)),
        }
    }

    /// Check if this error reports a missing location.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LLError::NotFound { .. })
    }
}

impl std::fmt::Display for LLError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLError::NotFound { path } => write!(f, "no such location: {}", path.display()),
            LLError::NotADirectory { path } => {
                write!(f, "not a directory: {}", path.display())
            }
            LLError::NotEmpty { path } => {
                write!(f, "directory not empty: {}", path.display())
            }
            LLError::InvalidData { path, message } => {
                write!(f, "invalid data in {}: {}", path.display(), message)
            }
            LLError::Transport(e) => write!(f, "transport error: {}", e),
        }
    }
}

impl std::error::Error for LLError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LLError::Transport(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for LLError {
    fn from(e: io::Error) -> Self {
        LLError::Transport(Box::new(e))
    }
}
