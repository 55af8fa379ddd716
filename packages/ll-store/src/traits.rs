//! Core trait for the LL layer.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;

use crate::LLError;

/// A hierarchical byte store: directories containing named entries, and
/// regular files holding bytes.
///
/// This is the only thing the folder layer knows about storage. Locations are
/// plain `std::path::Path`s; no validation is performed on them here.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Arc<dyn LLStore>`.
pub trait LLStore: Send + Sync {
    /// Check if anything exists at the location.
    fn exists(&self, path: &Path) -> bool;

    /// Check if the location is a directory.
    fn is_container(&self, path: &Path) -> bool;

    /// List the names of the direct children of a directory.
    ///
    /// The order is whatever the store produces natively and must not be
    /// relied upon.
    fn list_entries(&self, path: &Path) -> Result<Vec<String>, LLError>;

    /// Create a directory and every missing ancestor. Existing directories are fine.
    fn create_dir_all(&self, path: &Path) -> Result<(), LLError>;

    /// Remove a regular file.
    fn remove_file(&self, path: &Path) -> Result<(), LLError>;

    /// Remove a directory, failing with [`LLError::NotEmpty`] if it has entries.
    fn remove_dir_empty(&self, path: &Path) -> Result<(), LLError>;

    /// Remove a directory and everything below it.
    ///
    /// A location that is already gone is not an error.
    fn remove_dir_recursive(&self, path: &Path) -> Result<(), LLError>;

    /// Read the whole file.
    fn read_bytes(&self, path: &Path) -> Result<Bytes, LLError>;

    /// Create or truncate the file and write all bytes. The parent must exist.
    fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<(), LLError>;

    /// Read the whole file as UTF-8 text.
    ///
    /// # Returns
    ///
    /// * `Err(LLError::InvalidData)` - The content is not valid UTF-8.
    fn read_text(&self, path: &Path) -> Result<String, LLError>;

    /// Create or truncate the file and write the text as UTF-8.
    fn write_text(&self, path: &Path, text: &str) -> Result<(), LLError>;
}

// Blanket implementations for references and smart pointers

impl<T: LLStore + ?Sized> LLStore for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_container(&self, path: &Path) -> bool {
        (**self).is_container(path)
    }

    fn list_entries(&self, path: &Path) -> Result<Vec<String>, LLError> {
        (**self).list_entries(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), LLError> {
        (**self).create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> Result<(), LLError> {
        (**self).remove_file(path)
    }

    fn remove_dir_empty(&self, path: &Path) -> Result<(), LLError> {
        (**self).remove_dir_empty(path)
    }

    fn remove_dir_recursive(&self, path: &Path) -> Result<(), LLError> {
        (**self).remove_dir_recursive(path)
    }

    fn read_bytes(&self, path: &Path) -> Result<Bytes, LLError> {
        (**self).read_bytes(path)
    }

    fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<(), LLError> {
        (**self).write_bytes(path, data)
    }

    fn read_text(&self, path: &Path) -> Result<String, LLError> {
        (**self).read_text(path)
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<(), LLError> {
        (**self).write_text(path, text)
    }
}

impl<T: LLStore + ?Sized> LLStore for Box<T> {
    fn exists(&self, path: &Path) -> bool {
        self.as_ref().exists(path)
    }

    fn is_container(&self, path: &Path) -> bool {
        self.as_ref().is_container(path)
    }

    fn list_entries(&self, path: &Path) -> Result<Vec<String>, LLError> {
        self.as_ref().list_entries(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), LLError> {
        self.as_ref().create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> Result<(), LLError> {
        self.as_ref().remove_file(path)
    }

    fn remove_dir_empty(&self, path: &Path) -> Result<(), LLError> {
        self.as_ref().remove_dir_empty(path)
    }

    fn remove_dir_recursive(&self, path: &Path) -> Result<(), LLError> {
        self.as_ref().remove_dir_recursive(path)
    }

    fn read_bytes(&self, path: &Path) -> Result<Bytes, LLError> {
        self.as_ref().read_bytes(path)
    }

    fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<(), LLError> {
        self.as_ref().write_bytes(path, data)
    }

    fn read_text(&self, path: &Path) -> Result<String, LLError> {
        self.as_ref().read_text(path)
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<(), LLError> {
        self.as_ref().write_text(path, text)
    }
}

impl<T: LLStore + ?Sized> LLStore for Arc<T> {
    fn exists(&self, path: &Path) -> bool {
        self.as_ref().exists(path)
    }

    fn is_container(&self, path: &Path) -> bool {
        self.as_ref().is_container(path)
    }

    fn list_entries(&self, path: &Path) -> Result<Vec<String>, LLError> {
        self.as_ref().list_entries(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), LLError> {
        self.as_ref().create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> Result<(), LLError> {
        self.as_ref().remove_file(path)
    }

    fn remove_dir_empty(&self, path: &Path) -> Result<(), LLError> {
        self.as_ref().remove_dir_empty(path)
    }

    fn remove_dir_recursive(&self, path: &Path) -> Result<(), LLError> {
        self.as_ref().remove_dir_recursive(path)
    }

    fn read_bytes(&self, path: &Path) -> Result<Bytes, LLError> {
        self.as_ref().read_bytes(path)
    }

    fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<(), LLError> {
        self.as_ref().write_bytes(path, data)
    }

    fn read_text(&self, path: &Path) -> Result<String, LLError> {
        self.as_ref().read_text(path)
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<(), LLError> {
        self.as_ref().write_text(path, text)
    }
}
