//! folderfs LL layer: backing store traits
//!
//! This is the narrow waist of the folderfs stack. Everything at this level is
//! names and bytes - no key validation, no value semantics, no format
//! interpretation.
//!
//! Implementations:
//! - [`LocalDiskStore`]: the real filesystem through `std::fs`
//! - [`MemoryStore`]: an in-memory tree, for tests and ephemeral folders
//!
//! # Example
//!
//! ```rust
//! use folderfs_ll_store::{LLStore, LLError, LocalDiskStore};
//! use std::path::Path;
//!
//! fn read_config(store: &dyn LLStore, root: &Path) -> Result<String, LLError> {
//!     store.read_text(&root.join("settings.conf"))
//! }
//! ```

pub use bytes::Bytes;

mod error;
mod in_memory;
mod local_disk;
mod traits;

pub use error::LLError;
pub use in_memory::MemoryStore;
pub use local_disk::LocalDiskStore;
pub use traits::LLStore;
