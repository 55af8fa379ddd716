//! In-memory backing store.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use bytes::Bytes;

use crate::{LLError, LLStore};

#[derive(Clone, Debug)]
enum Node {
    Dir,
    File(Bytes),
}

/// A store that keeps the whole tree in memory.
///
/// Locations are normalized (`.` components dropped) and compared component
/// by component. The empty relative path is an implicit directory that always
/// exists, so relative roots behave like paths under a working directory.
/// Listings come back in lexical order.
///
/// # Example
///
/// ```rust
/// use folderfs_ll_store::{LLStore, MemoryStore};
/// use std::path::Path;
///
/// let store = MemoryStore::new();
/// store.create_dir_all(Path::new("data/raw")).unwrap();
/// store.write_bytes(Path::new("data/raw/blob"), b"\x00\x01").unwrap();
///
/// assert!(store.is_container(Path::new("data")));
/// assert_eq!(store.list_entries(Path::new("data")).unwrap(), vec!["raw".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    nodes: Mutex<BTreeMap<PathBuf, Node>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn nodes(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Node>> {
        self.nodes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn normalize(path: &Path) -> PathBuf {
        path.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }

    fn is_dir(nodes: &BTreeMap<PathBuf, Node>, path: &Path) -> bool {
        path.as_os_str().is_empty() || matches!(nodes.get(path), Some(Node::Dir))
    }

    fn children<'a>(
        nodes: &'a BTreeMap<PathBuf, Node>,
        path: &'a Path,
    ) -> impl Iterator<Item = &'a PathBuf> + 'a {
        nodes
            .keys()
            .filter(move |candidate| candidate.parent() == Some(path))
    }

    fn file_bytes(&self, path: &Path) -> Result<Bytes, LLError> {
        let path = Self::normalize(path);
        match self.nodes().get(&path) {
            Some(Node::File(bytes)) => Ok(bytes.clone()),
            Some(Node::Dir) => Err(LLError::Transport(
                format!("{} is a directory", path.display()).into(),
            )),
            None => Err(LLError::NotFound { path }),
        }
    }
}

impl LLStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        let path = Self::normalize(path);
        path.as_os_str().is_empty() || self.nodes().contains_key(&path)
    }

    fn is_container(&self, path: &Path) -> bool {
        let path = Self::normalize(path);
        Self::is_dir(&self.nodes(), &path)
    }

    fn list_entries(&self, path: &Path) -> Result<Vec<String>, LLError> {
        let path = Self::normalize(path);
        let nodes = self.nodes();

        if !Self::is_dir(&nodes, &path) {
            return Err(match nodes.get(&path) {
                Some(_) => LLError::NotADirectory { path },
                None => LLError::NotFound { path },
            });
        }

        Ok(Self::children(&nodes, &path)
            .filter_map(|child| child.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect())
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), LLError> {
        let path = Self::normalize(path);
        let mut nodes = self.nodes();

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            match nodes.get(&current) {
                Some(Node::Dir) => {}
                Some(Node::File(_)) => {
                    return Err(LLError::Transport(
                        format!("{} exists and is a file", current.display()).into(),
                    ));
                }
                None => {
                    nodes.insert(current.clone(), Node::Dir);
                }
            }
        }
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<(), LLError> {
        let path = Self::normalize(path);
        let mut nodes = self.nodes();
        match nodes.get(&path) {
            Some(Node::File(_)) => {
                nodes.remove(&path);
                Ok(())
            }
            Some(Node::Dir) => Err(LLError::Transport(
                format!("{} is a directory", path.display()).into(),
            )),
            None => Err(LLError::NotFound { path }),
        }
    }

    fn remove_dir_empty(&self, path: &Path) -> Result<(), LLError> {
        let path = Self::normalize(path);
        let mut nodes = self.nodes();
        match nodes.get(&path) {
            Some(Node::Dir) => {
                if Self::children(&nodes, &path).next().is_some() {
                    return Err(LLError::NotEmpty { path });
                }
                nodes.remove(&path);
                Ok(())
            }
            Some(Node::File(_)) => Err(LLError::NotADirectory { path }),
            None => Err(LLError::NotFound { path }),
        }
    }

    fn remove_dir_recursive(&self, path: &Path) -> Result<(), LLError> {
        let path = Self::normalize(path);
        self.nodes().retain(|candidate, _| !candidate.starts_with(&path));
        Ok(())
    }

    fn read_bytes(&self, path: &Path) -> Result<Bytes, LLError> {
        self.file_bytes(path)
    }

    fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<(), LLError> {
        let path = Self::normalize(path);
        let mut nodes = self.nodes();

        let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
        if !Self::is_dir(&nodes, &parent) {
            return Err(LLError::NotFound { path: parent });
        }
        if let Some(Node::Dir) = nodes.get(&path) {
            return Err(LLError::Transport(
                format!("{} is a directory", path.display()).into(),
            ));
        }

        nodes.insert(path, Node::File(Bytes::copy_from_slice(data)));
        Ok(())
    }

    fn read_text(&self, path: &Path) -> Result<String, LLError> {
        let bytes = self.file_bytes(path)?;
        String::from_utf8(bytes.to_vec()).map_err(|e| LLError::InvalidData {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<(), LLError> {
        self.write_bytes(path, text.as_bytes())
    }
}
