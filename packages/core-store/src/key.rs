//! Folder keys: validated `/`-separated names relative to a folder root.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Separator between key segments.
pub const SEPARATOR: char = '/';

/// The key that names a folder itself rather than one of its entries.
pub const SELF_KEY: &str = ".";

const PARENT_SEGMENT: &str = "..";

/// A validated folder key.
///
/// A key is either the self key `.` or one or more non-empty segments
/// separated by `/`. The last segment is the leaf; the others name the
/// folders walked through to reach it.
///
/// Keys never escape the folder they are applied to: `..` segments are
/// rejected, as are empty segments and `.` inside a nested key.
///
/// # Examples
///
/// ```rust
/// use folderfs_core_store::Key;
///
/// let key = Key::parse("x/y/z.txt").unwrap();
/// assert_eq!(key.parents(), ["x".to_string(), "y".to_string()]);
/// assert_eq!(key.leaf(), "z.txt");
///
/// assert!(Key::parse(".").unwrap().is_self());
/// assert!(Key::parse("../etc/passwd").is_err());
/// ```
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Key {
    segments: Vec<String>,
}

impl Key {
    /// Parse and validate a key.
    pub fn parse(s: &str) -> Result<Self, Error> {
        if s.is_empty() {
            return Err(Error::invalid_key(s, "empty key"));
        }

        if s == SELF_KEY {
            return Ok(Key {
                segments: vec![SELF_KEY.to_string()],
            });
        }

        let segments: Vec<String> = s.split(SEPARATOR).map(str::to_string).collect();

        for (position, segment) in segments.iter().enumerate() {
            Self::validate_segment(s, segment, position)?;
        }

        Ok(Key { segments })
    }

    fn validate_segment(key: &str, segment: &str, position: usize) -> Result<(), Error> {
        match segment {
            PARENT_SEGMENT => Err(Error::invalid_key(
                key,
                format!("parent-directory segment at position {}", position),
            )),
            "" => Err(Error::invalid_key(
                key,
                format!("empty segment at position {}", position),
            )),
            SELF_KEY => Err(Error::invalid_key(
                key,
                format!("'.' segment at position {} inside a nested key", position),
            )),
            _ => Ok(()),
        }
    }

    /// Check if this is the self key `.`.
    pub fn is_self(&self) -> bool {
        self.segments.len() == 1 && self.segments[0] == SELF_KEY
    }

    /// Check if the key walks through at least one folder.
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// All segments, in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Segments naming the folders between the root and the leaf.
    pub fn parents(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// The final segment.
    pub fn leaf(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::parse(s)
    }
}
