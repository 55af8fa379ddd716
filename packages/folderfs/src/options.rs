//! Folder configuration.

use serde::{Deserialize, Serialize};

/// Policy flags for a [`Folder`](crate::Folder).
///
/// Children spawned from a folder copy these flags; they are never changed
/// after construction. Missing fields take their default when deserialized,
/// so a host application can embed just the flags it cares about:
///
/// ```rust
/// use folderfs::FolderOptions;
///
/// let options: FolderOptions = serde_json::from_str(r#"{"allow_override": true}"#).unwrap();
/// assert!(options.allow_override);
/// assert!(options.auto_create_folder);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderOptions {
    /// Create the root directory (and its ancestors) on construction.
    pub auto_create_folder: bool,

    /// Register the JSON and text interpreters ahead of binary. Ignored when
    /// an explicit registry is supplied.
    pub interpret: bool,

    /// Permit overwriting existing entries and deleting entries.
    pub allow_override: bool,

    /// Permit deleting directories that still have content.
    pub allow_remove_folders_with_content: bool,
}

impl Default for FolderOptions {
    fn default() -> Self {
        Self {
            auto_create_folder: true,
            interpret: true,
            allow_override: false,
            allow_remove_folders_with_content: false,
        }
    }
}

impl FolderOptions {
    #[must_use]
    pub fn with_auto_create_folder(mut self, enabled: bool) -> Self {
        self.auto_create_folder = enabled;
        self
    }

    #[must_use]
    pub fn with_interpret(mut self, enabled: bool) -> Self {
        self.interpret = enabled;
        self
    }

    #[must_use]
    pub fn with_allow_override(mut self, enabled: bool) -> Self {
        self.allow_override = enabled;
        self
    }

    #[must_use]
    pub fn with_allow_remove_folders_with_content(mut self, enabled: bool) -> Self {
        self.allow_remove_folders_with_content = enabled;
        self
    }
}
