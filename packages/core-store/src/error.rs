//! Error types for the Core layer.

use std::path::PathBuf;

use folderfs_ll_store::LLError;

/// The error an [`Interpreter`](crate::Interpreter) reports from inside its
/// load or save. The registry wraps it into [`Error::Load`] or [`Error::Save`].
pub type InterpretError = Box<dyn std::error::Error + Send + Sync>;

/// Errors at the Core layer.
///
/// Validation and policy failures are raised where they are detected.
/// Failures from inside an interpreter arrive wrapped with the location they
/// concern.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The key contains a parent-directory segment or is otherwise malformed.
    #[error("invalid key '{key}': {message}")]
    InvalidKey { key: String, message: String },

    /// No entry with this key exists.
    #[error("key not found: {key}")]
    NotFound { key: String },

    /// A location the operation needs (a folder root, a parent directory)
    /// does not exist in the store.
    #[error("location not found: {}", location.display())]
    LocationNotFound { location: PathBuf },

    /// Overwrite refused because `allow_override` is not set.
    #[error("{} already exists and can't be overridden (allow_override not set)", location.display())]
    AlreadyExists { location: PathBuf },

    /// Delete refused because `allow_override` is not set.
    #[error("{} can't be deleted (allow_override not set)", location.display())]
    NotPermitted { location: PathBuf },

    /// Non-recursive delete of a directory that still has entries.
    #[error("directory not empty: {}", location.display())]
    DirectoryNotEmpty { location: PathBuf },

    /// No registered interpreter accepts the extension of the location.
    ///
    /// This is the registry's not-found error. [`Error::NotFound`] is kept
    /// for missing folder keys.
    #[error("no interpreter can load {} (extension '{extension}')", location.display())]
    NoInterpreter { location: PathBuf, extension: String },

    /// No registered interpreter accepts the shape of the value.
    #[error("can't save the {kind} value to {}: unknown type", location.display())]
    UnsupportedValue { location: PathBuf, kind: &'static str },

    /// The matching interpreter failed while loading.
    #[error("error loading file \"{}\" ({interpreter}): {source}", location.display())]
    Load {
        location: PathBuf,
        interpreter: String,
        #[source]
        source: InterpretError,
    },

    /// The matching interpreter failed while saving.
    #[error("error saving {value} to \"{}\" ({interpreter}): {source}", location.display())]
    Save {
        location: PathBuf,
        interpreter: String,
        value: String,
        #[source]
        source: InterpretError,
    },

    /// A file was found where a folder was expected.
    #[error("{} is a file, not a folder", location.display())]
    NotAFolder { location: PathBuf },

    /// A folder was found where a file was expected.
    #[error("{} is a folder, not a file", location.display())]
    NotAFile { location: PathBuf },

    /// Any other failure from the backing store.
    #[error("store error: {0}")]
    Store(#[source] LLError),
}

impl Error {
    /// Build an `InvalidKey` error.
    pub fn invalid_key(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidKey {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl From<LLError> for Error {
    fn from(e: LLError) -> Self {
        match e {
            LLError::NotFound { path } => Error::LocationNotFound { location: path },
            LLError::NotEmpty { path } => Error::DirectoryNotEmpty { location: path },
            other => Error::Store(other),
        }
    }
}
