//! Core folderfs: values, keys and interpreters
//!
//! This layer adds meaning to the names and bytes of the LL layer:
//! - `Value`: what a stored file decodes to (bytes, text or structured data)
//! - `Key`: a validated `/`-separated key relative to a folder
//! - `Extension`: the part of a file name that selects an interpreter
//! - `Interpreter`: one file format, able to load and save values
//! - `Interpreters`: the ordered registry consulted for every load and save
//!
//! # Example
//!
//! ```rust
//! use folderfs_core_store::{Interpreters, Value};
//! use folderfs_ll_store::MemoryStore;
//! use std::path::Path;
//!
//! let store = MemoryStore::new();
//! let interpreters = Interpreters::standard();
//!
//! let config = Value::from(serde_json::json!({"retries": 3}));
//! interpreters.save(&store, Path::new("config.json"), &config).unwrap();
//! assert_eq!(interpreters.load(&store, Path::new("config.json")).unwrap(), config);
//! ```

mod builtin;
mod error;
mod extension;
mod key;
mod registry;
mod traits;
mod value;

pub use builtin::{BinaryInterpreter, JsonInterpreter, TextInterpreter};
pub use error::{Error, InterpretError};
pub use extension::Extension;
pub use key::{Key, SELF_KEY, SEPARATOR};
pub use registry::Interpreters;
pub use traits::Interpreter;
pub use value::Value;

// Re-export LL types for convenience
pub use folderfs_ll_store::{LLError, LLStore, LocalDiskStore, MemoryStore};
