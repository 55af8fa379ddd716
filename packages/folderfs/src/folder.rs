//! A directory viewed as a mapping from names to content.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use folderfs_core_store::{Error, Interpreters, Key, LLError, LLStore, LocalDiskStore, Value};

use crate::{Entry, FolderOptions};

/// Default maximum depth for [`Folder::index`].
pub const DEFAULT_INDEX_DEPTH: usize = 200;

/// One directory of a backing store, exposed as a name → content mapping.
///
/// Files are decoded through the shared [`Interpreters`] registry;
/// subdirectories come back as child folders. Keys may walk into nested
/// folders with `/` (`"x/y/z.txt"`), and the key `.` names the folder itself.
///
/// A child folder is a fresh value on every access. It shares the registry
/// and the store with its parent and copies the parent's options.
///
/// # Example
///
/// ```rust
/// use folderfs::{Folder, Value};
///
/// let dir = tempfile::tempdir().unwrap();
/// let folder = Folder::new(dir.path()).unwrap();
///
/// folder.set("notes/today.txt", "hello").unwrap();
/// assert_eq!(folder.get_value("notes/today.txt").unwrap(), Value::from("hello"));
/// assert!(folder.contains("notes").unwrap());
/// ```
#[derive(Clone)]
pub struct Folder {
    root: PathBuf,
    options: FolderOptions,
    interpreters: Arc<Interpreters>,
    store: Arc<dyn LLStore>,
}

impl Folder {
    /// Open `root` on the local disk with default options.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, Error> {
        Self::with_options(root, FolderOptions::default())
    }

    /// Open `root` on the local disk.
    pub fn with_options(root: impl AsRef<Path>, options: FolderOptions) -> Result<Self, Error> {
        Self::open(root, options, Arc::new(LocalDiskStore::new()), None)
    }

    /// Open `root` on any store.
    ///
    /// Without an explicit registry the folder gets
    /// [`Interpreters::standard`] when `options.interpret` is set and
    /// [`Interpreters::binary_only`] otherwise.
    pub fn open(
        root: impl AsRef<Path>,
        options: FolderOptions,
        store: Arc<dyn LLStore>,
        interpreters: Option<Arc<Interpreters>>,
    ) -> Result<Self, Error> {
        let interpreters = interpreters.unwrap_or_else(|| {
            Arc::new(if options.interpret {
                Interpreters::standard()
            } else {
                Interpreters::binary_only()
            })
        });

        Self::from_parts(root.as_ref().to_path_buf(), options, interpreters, store)
    }

    fn from_parts(
        root: PathBuf,
        options: FolderOptions,
        interpreters: Arc<Interpreters>,
        store: Arc<dyn LLStore>,
    ) -> Result<Self, Error> {
        if options.auto_create_folder {
            store.create_dir_all(&root)?;
        }

        Ok(Self {
            root,
            options,
            interpreters,
            store,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> FolderOptions {
        self.options
    }

    pub fn interpreters(&self) -> &Arc<Interpreters> {
        &self.interpreters
    }

    fn location(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// A folder for the direct child `name`, inheriting everything.
    fn child(&self, name: &str) -> Result<Folder, Error> {
        Self::from_parts(
            self.location(name),
            self.options,
            Arc::clone(&self.interpreters),
            Arc::clone(&self.store),
        )
    }

    /// Walk the parent segments of `key`, returning the folder holding the
    /// leaf.
    fn resolve<'k>(&self, key: &'k Key) -> Result<(Folder, &'k str), Error> {
        let mut parent = self.clone();
        for segment in key.parents() {
            log::trace!("Resolving {} through {}", key, parent.root.display());
            parent = parent.child(segment)?;
        }
        Ok((parent, key.leaf()))
    }

    /// Content of the direct child `name`, which must exist.
    fn entry(&self, name: &str) -> Result<Entry, Error> {
        let location = self.location(name);
        if self.store.is_container(&location) {
            Ok(Entry::Folder(self.child(name)?))
        } else {
            Ok(Entry::File(
                self.interpreters.load(self.store.as_ref(), &location)?,
            ))
        }
    }

    /// Look up `key`.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidKey`] - malformed key or one containing `..`.
    /// * [`Error::NotFound`] - nothing is stored under the key.
    /// * [`Error::Load`] / [`Error::NoInterpreter`] - the file could not be decoded.
    pub fn get(&self, key: &str) -> Result<Entry, Error> {
        let key = Key::parse(key)?;
        if key.is_self() {
            return Ok(Entry::Folder(self.clone()));
        }

        let (parent, leaf) = self.resolve(&key)?;
        if !parent.store.exists(&parent.location(leaf)) {
            return Err(Error::NotFound {
                key: key.to_string(),
            });
        }
        parent.entry(leaf)
    }

    /// Look up a file's decoded value.
    pub fn get_value(&self, key: &str) -> Result<Value, Error> {
        match self.get(key)? {
            Entry::File(value) => Ok(value),
            Entry::Folder(folder) => Err(Error::NotAFile {
                location: folder.root,
            }),
        }
    }

    /// Look up a subfolder.
    pub fn get_folder(&self, key: &str) -> Result<Folder, Error> {
        let key = Key::parse(key)?;
        if key.is_self() {
            return Ok(self.clone());
        }

        let (parent, leaf) = self.resolve(&key)?;
        let location = parent.location(leaf);
        if !parent.store.exists(&location) {
            return Err(Error::NotFound {
                key: key.to_string(),
            });
        }
        if !parent.store.is_container(&location) {
            return Err(Error::NotAFolder { location });
        }
        parent.child(leaf)
    }

    /// Store `value` under `key`, creating intermediate folders when
    /// `auto_create_folder` is set.
    ///
    /// Intermediate folders created before a failure are left in place.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidKey`] - malformed key, `..`, or the self key `.`.
    /// * [`Error::LocationNotFound`] - the leaf's parent folder is missing.
    /// * [`Error::AlreadyExists`] - the key is taken and overriding is off.
    /// * [`Error::UnsupportedValue`] / [`Error::Save`] - no interpreter could
    ///   store the value.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<(), Error> {
        let key = Key::parse(key)?;
        if key.is_self() {
            return Err(Error::invalid_key(
                key.to_string(),
                "can't assign to the folder itself",
            ));
        }

        let (parent, leaf) = self.resolve(&key)?;
        if !parent.store.is_container(&parent.root) {
            return Err(Error::LocationNotFound {
                location: parent.root,
            });
        }

        let location = parent.location(leaf);
        if !self.options.allow_override && parent.contains(leaf)? {
            return Err(Error::AlreadyExists { location });
        }

        self.interpreters
            .save(self.store.as_ref(), &location, &value.into())
    }

    /// Remove `key`. The key `.` removes this folder's own directory.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidKey`] - malformed key or one containing `..`.
    /// * [`Error::NotPermitted`] - overriding is off.
    /// * [`Error::NotFound`] - nothing is stored under the key.
    /// * [`Error::DirectoryNotEmpty`] - the target folder has content and
    ///   `allow_remove_folders_with_content` is off.
    pub fn delete(&self, key: &str) -> Result<(), Error> {
        let key = Key::parse(key)?;
        if !self.options.allow_override {
            let location = if key.is_self() {
                self.root.clone()
            } else {
                self.root.join(key.to_string())
            };
            return Err(Error::NotPermitted { location });
        }

        if key.is_self() {
            return self.remove_self();
        }

        let (parent, leaf) = self.resolve(&key)?;
        let location = parent.location(leaf);
        if !parent.store.exists(&location) {
            return Err(Error::NotFound {
                key: key.to_string(),
            });
        }

        if parent.store.is_container(&location) {
            parent.child(leaf)?.remove_self()
        } else {
            log::debug!("Removing file {}...", location.display());
            Ok(parent.store.remove_file(&location)?)
        }
    }

    fn remove_self(&self) -> Result<(), Error> {
        if self.options.allow_remove_folders_with_content {
            log::debug!("Removing {} and its content...", self.root.display());
            Ok(self.store.remove_dir_recursive(&self.root)?)
        } else {
            log::debug!("Removing empty folder {}...", self.root.display());
            Ok(self.store.remove_dir_empty(&self.root)?)
        }
    }

    /// Names of the direct children, in the store's listing order.
    pub fn keys(&self) -> Result<Vec<String>, Error> {
        self.store.list_entries(&self.root).map_err(|err| match err {
            LLError::NotFound { .. } => Error::LocationNotFound {
                location: self.root.clone(),
            },
            other => other.into(),
        })
    }

    /// Iterate over the direct children's names.
    ///
    /// The listing is taken eagerly when `iter` is called, and taken anew on
    /// every call, so later changes show up in the next iteration.
    pub fn iter(&self) -> Result<impl Iterator<Item = String>, Error> {
        Ok(self.keys()?.into_iter())
    }

    /// Check if `name` is a direct child. Nested keys are not walked.
    pub fn contains(&self, name: &str) -> Result<bool, Error> {
        Ok(self.keys()?.iter().any(|key| key == name))
    }

    pub fn len(&self) -> Result<usize, Error> {
        Ok(self.keys()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.len()? == 0)
    }

    /// Content of every direct child.
    pub fn values(&self) -> Result<Vec<Entry>, Error> {
        self.keys()?.iter().map(|name| self.entry(name)).collect()
    }

    /// Every direct child with its content.
    pub fn items(&self) -> Result<Vec<(String, Entry)>, Error> {
        self.keys()?
            .into_iter()
            .map(|name| {
                let entry = self.entry(&name)?;
                Ok((name, entry))
            })
            .collect()
    }

    /// Names of the direct children that are files.
    pub fn files(&self) -> Result<Vec<String>, Error> {
        Ok(self
            .keys()?
            .into_iter()
            .filter(|name| !self.store.is_container(&self.location(name)))
            .collect())
    }

    /// Names of the direct children that are folders.
    pub fn folders(&self) -> Result<Vec<String>, Error> {
        Ok(self
            .keys()?
            .into_iter()
            .filter(|name| self.store.is_container(&self.location(name)))
            .collect())
    }

    pub fn files_items(&self) -> Result<Vec<(String, Value)>, Error> {
        self.files()?
            .into_iter()
            .map(|name| {
                let value = self
                    .interpreters
                    .load(self.store.as_ref(), &self.location(&name))?;
                Ok((name, value))
            })
            .collect()
    }

    pub fn folders_items(&self) -> Result<Vec<(String, Folder)>, Error> {
        self.folders()?
            .into_iter()
            .map(|name| {
                let folder = self.child(&name)?;
                Ok((name, folder))
            })
            .collect()
    }

    /// Find every entry named `name` at or below this folder, searching
    /// [`DEFAULT_INDEX_DEPTH`] levels deep.
    pub fn index(&self, name: &str) -> Result<Vec<String>, Error> {
        self.index_with_depth(name, DEFAULT_INDEX_DEPTH)
    }

    /// Find every entry named `name` at or below this folder, descending at
    /// most `depth` levels. Returns `/`-separated paths relative to this
    /// folder; files of a level come before its folders. A depth of 0 finds
    /// nothing.
    pub fn index_with_depth(&self, name: &str, depth: usize) -> Result<Vec<String>, Error> {
        let mut found = Vec::new();
        self.collect_index(name, depth, None, &mut found)?;
        Ok(found)
    }

    fn collect_index(
        &self,
        name: &str,
        depth: usize,
        prefix: Option<&str>,
        found: &mut Vec<String>,
    ) -> Result<(), Error> {
        if depth == 0 {
            return Ok(());
        }

        let relative = |entry: &str| match prefix {
            Some(prefix) => format!("{}/{}", prefix, entry),
            None => entry.to_string(),
        };

        if self.files()?.iter().any(|file| file == name) {
            found.push(relative(name));
        }

        for (folder_name, folder) in self.folders_items()? {
            let path = relative(&folder_name);
            if folder_name == name {
                found.push(path.clone());
            }
            folder.collect_index(name, depth - 1, Some(&path), found)?;
        }

        Ok(())
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.len() {
            Ok(n) => write!(f, "{} ({} elements)", self.root.display(), n),
            Err(_) => write!(f, "{} (unavailable)", self.root.display()),
        }
    }
}

impl fmt::Debug for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Folder")
            .field("root", &self.root)
            .field("options", &self.options)
            .field("interpreters", &self.interpreters)
            .finish()
    }
}
