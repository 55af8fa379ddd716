//! folderfs: a directory tree as a key-value mapping
//!
//! A [`Folder`] presents one directory as a mapping from names to content.
//! Files are decoded by an ordered registry of interpreters chosen by file
//! extension (JSON, text, then raw bytes); subdirectories come back as
//! nested folders. Keys may be nested (`"x/y/z.txt"`) and intermediate
//! folders are created on the way when `auto_create_folder` is set.
//!
//! The crate sits on two lower layers, re-exported here:
//! - `folderfs-ll-store`: the backing store (`LocalDiskStore`, `MemoryStore`)
//! - `folderfs-core-store`: values, keys and interpreters
//!
//! # Example
//!
//! ```rust
//! use folderfs::{Folder, FolderOptions, Value};
//! use serde_json::json;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let folder = Folder::with_options(
//!     dir.path(),
//!     FolderOptions::default().with_allow_override(true),
//! ).unwrap();
//!
//! folder.set("settings.json", json!({"theme": "dark"})).unwrap();
//! folder.set("logs/today.txt", "started").unwrap();
//!
//! assert_eq!(folder.files().unwrap(), vec!["settings.json"]);
//! assert_eq!(folder.index("today.txt").unwrap(), vec!["logs/today.txt"]);
//!
//! folder.delete("logs/today.txt").unwrap();
//! assert!(folder.get_folder("logs").unwrap().is_empty().unwrap());
//! ```

mod entry;
mod folder;
mod options;

pub use entry::Entry;
pub use folder::{Folder, DEFAULT_INDEX_DEPTH};
pub use options::FolderOptions;

pub use folderfs_core_store::{
    BinaryInterpreter, Error, Extension, InterpretError, Interpreter, Interpreters,
    JsonInterpreter, Key, TextInterpreter, Value,
};
pub use folderfs_ll_store::{Bytes, LLError, LLStore, LocalDiskStore, MemoryStore};
