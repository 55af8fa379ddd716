//! What a key resolves to.

use folderfs_core_store::Value;

use crate::Folder;

/// The content behind a folder key: a decoded file or a nested folder.
#[derive(Debug)]
pub enum Entry {
    /// A regular file, decoded by the interpreter registry.
    File(Value),
    /// A subdirectory, viewed as a folder with the parent's policy and registry.
    Folder(Folder),
}

impl Entry {
    pub fn is_file(&self) -> bool {
        matches!(self, Entry::File(_))
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Entry::Folder(_))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Entry::File(value) => Some(value),
            Entry::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Entry::File(_) => None,
            Entry::Folder(folder) => Some(folder),
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Entry::File(value) => Some(value),
            Entry::Folder(_) => None,
        }
    }

    pub fn into_folder(self) -> Option<Folder> {
        match self {
            Entry::File(_) => None,
            Entry::Folder(folder) => Some(folder),
        }
    }
}

impl From<Value> for Entry {
    fn from(value: Value) -> Self {
        Entry::File(value)
    }
}

impl From<Folder> for Entry {
    fn from(folder: Folder) -> Self {
        Entry::Folder(folder)
    }
}
