//! The local filesystem as a backing store.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use bytes::Bytes;

use crate::{LLError, LLStore};

/// A store backed by `std::fs`.
///
/// Every call opens and closes its own handles; nothing is kept between
/// calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDiskStore;

impl LocalDiskStore {
    pub fn new() -> Self {
        LocalDiskStore
    }
}

impl LLStore for LocalDiskStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_container(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_entries(&self, path: &Path) -> Result<Vec<String>, LLError> {
        let attr = fs::metadata(path).map_err(|e| LLError::from_io(e, path))?;
        if !attr.is_dir() {
            return Err(LLError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| LLError::from_io(e, path))? {
            let entry = entry.map_err(|e| LLError::from_io(e, path))?;
            let name = entry
                .file_name()
                .into_string()
                .map_err(|raw| LLError::InvalidData {
                    path: path.to_path_buf(),
                    message: format!("entry name {:?} is not valid UTF-8", raw),
                })?;
            names.push(name);
        }
        Ok(names)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), LLError> {
        log::debug!("Creating directory {}...", path.display());
        fs::create_dir_all(path).map_err(|e| LLError::from_io(e, path))
    }

    fn remove_file(&self, path: &Path) -> Result<(), LLError> {
        log::debug!("Removing file {}...", path.display());
        fs::remove_file(path).map_err(|e| LLError::from_io(e, path))
    }

    fn remove_dir_empty(&self, path: &Path) -> Result<(), LLError> {
        log::debug!("Removing empty directory {}...", path.display());
        let mut entries = fs::read_dir(path).map_err(|e| LLError::from_io(e, path))?;
        if entries.next().is_some() {
            return Err(LLError::NotEmpty {
                path: path.to_path_buf(),
            });
        }
        fs::remove_dir(path).map_err(|e| LLError::from_io(e, path))
    }

    fn remove_dir_recursive(&self, path: &Path) -> Result<(), LLError> {
        log::debug!("Removing directory tree {}...", path.display());
        match fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("Directory tree {} already gone: {}", path.display(), e);
                Ok(())
            }
            Err(e) => Err(LLError::from_io(e, path)),
        }
    }

    fn read_bytes(&self, path: &Path) -> Result<Bytes, LLError> {
        log::debug!("Reading {}...", path.display());
        fs::read(path)
            .map(Bytes::from)
            .map_err(|e| LLError::from_io(e, path))
    }

    fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<(), LLError> {
        log::debug!("Writing {}...", path.display());
        let mut f = fs::File::create(path).map_err(|e| LLError::from_io(e, path))?;
        f.write_all(data).map_err(|e| LLError::from_io(e, path))
    }

    fn read_text(&self, path: &Path) -> Result<String, LLError> {
        log::debug!("Reading text {}...", path.display());
        fs::read_to_string(path).map_err(|e| LLError::from_io(e, path))
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<(), LLError> {
        self.write_bytes(path, text.as_bytes())
    }
}
