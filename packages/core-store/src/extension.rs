//! File extensions as seen by interpreters.

use std::fmt;
use std::path::Path;

/// The extension of a stored file, used to pick a loading interpreter.
///
/// The extension is the text between the first and second `.` of the final
/// path segment, so `archive.tar.gz` has extension `tar` and `.bashrc` has
/// extension `bashrc`. Names without a dot have an empty extension. Files
/// written by earlier versions of the tool were classified the same way, so
/// multi-dot names keep their historical interpretation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Extension(String);

impl Extension {
    /// Derive the extension of a location.
    pub fn of(location: &Path) -> Self {
        let name = location
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        Extension(name.split('.').nth(1).unwrap_or_default().to_string())
    }

    pub fn new(s: impl Into<String>) -> Self {
        Extension(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive suffix check, the match rule of the built-in
    /// interpreters.
    pub fn ends_with_ignore_case(&self, suffix: &str) -> bool {
        self.0.to_lowercase().ends_with(&suffix.to_lowercase())
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Extension {
    fn from(s: &str) -> Self {
        Extension(s.to_string())
    }
}

impl From<String> for Extension {
    fn from(s: String) -> Self {
        Extension(s)
    }
}

impl AsRef<str> for Extension {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
