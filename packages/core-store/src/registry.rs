//! The interpreter registry.

use std::fmt;
use std::path::Path;

use folderfs_ll_store::LLStore;

use crate::{
    BinaryInterpreter, Error, Extension, Interpreter, JsonInterpreter, TextInterpreter, Value,
};

/// An ordered list of interpreters.
///
/// Registration order is priority order: loads go to the first interpreter
/// accepting the file's extension, saves to the first accepting the value.
/// Nothing is deduplicated, and an interpreter registered after a catch-all
/// is never consulted for what the catch-all accepts.
///
/// A registry is built once and then shared read-only (behind an `Arc`) by a
/// root folder and every folder spawned from it.
///
/// # Example
///
/// ```rust
/// use folderfs_core_store::{Interpreters, Value};
/// use folderfs_ll_store::MemoryStore;
/// use std::path::Path;
///
/// let store = MemoryStore::new();
/// let interpreters = Interpreters::standard();
///
/// interpreters.save(&store, Path::new("notes.txt"), &Value::from("hello")).unwrap();
/// let value = interpreters.load(&store, Path::new("notes.txt")).unwrap();
/// assert_eq!(value, Value::from("hello"));
/// ```
#[derive(Default)]
pub struct Interpreters {
    interpreters: Vec<Box<dyn Interpreter>>,
}

impl Interpreters {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON, then text, then binary as the catch-all.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(JsonInterpreter);
        registry.register(TextInterpreter::new());
        registry.register(BinaryInterpreter);
        registry
    }

    /// Only the binary interpreter: everything is loaded as bytes and only
    /// bytes can be saved.
    pub fn binary_only() -> Self {
        let mut registry = Self::new();
        registry.register(BinaryInterpreter);
        registry
    }

    /// Append an interpreter at the lowest priority.
    pub fn register(&mut self, interpreter: impl Interpreter + 'static) {
        log::debug!("Registering {} interpreter", interpreter.name());
        self.interpreters.push(Box::new(interpreter));
    }

    pub fn len(&self) -> usize {
        self.interpreters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interpreters.is_empty()
    }

    /// Interpreter names in priority order.
    pub fn names(&self) -> Vec<&str> {
        self.interpreters.iter().map(|i| i.name()).collect()
    }

    /// The interpreter that would load files with this extension.
    pub fn find_loader(&self, extension: &Extension) -> Option<&dyn Interpreter> {
        self.interpreters
            .iter()
            .find(|i| i.can_load(extension))
            .map(|i| i.as_ref())
    }

    /// The interpreter that would save this value.
    pub fn find_saver(&self, value: &Value) -> Option<&dyn Interpreter> {
        self.interpreters
            .iter()
            .find(|i| i.can_save(value))
            .map(|i| i.as_ref())
    }

    /// Load the file at `location` with the first interpreter accepting its
    /// extension.
    ///
    /// # Errors
    ///
    /// * [`Error::NoInterpreter`] - nothing accepts the extension.
    /// * [`Error::Load`] - the chosen interpreter failed; carries its message.
    pub fn load(&self, store: &dyn LLStore, location: &Path) -> Result<Value, Error> {
        let extension = Extension::of(location);
        let interpreter = self
            .find_loader(&extension)
            .ok_or_else(|| Error::NoInterpreter {
                location: location.to_path_buf(),
                extension: extension.to_string(),
            })?;

        log::debug!(
            "Loading {} with {} interpreter...",
            location.display(),
            interpreter.name()
        );

        interpreter
            .load(store, location)
            .map_err(|source| Error::Load {
                location: location.to_path_buf(),
                interpreter: interpreter.name().to_string(),
                source,
            })
    }

    /// Save `value` to `location` with the first interpreter accepting it.
    ///
    /// # Errors
    ///
    /// * [`Error::UnsupportedValue`] - nothing accepts the value.
    /// * [`Error::Save`] - the chosen interpreter failed; carries its message.
    pub fn save(&self, store: &dyn LLStore, location: &Path, value: &Value) -> Result<(), Error> {
        let interpreter = self
            .find_saver(value)
            .ok_or_else(|| Error::UnsupportedValue {
                location: location.to_path_buf(),
                kind: value.kind(),
            })?;

        log::debug!(
            "Saving {} to {} with {} interpreter...",
            value.describe(),
            location.display(),
            interpreter.name()
        );

        interpreter
            .save(store, location, value)
            .map_err(|source| Error::Save {
                location: location.to_path_buf(),
                interpreter: interpreter.name().to_string(),
                value: value.describe(),
                source,
            })
    }
}

impl fmt::Debug for Interpreters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InterpretError;
    use folderfs_ll_store::{LocalDiskStore, MemoryStore};
    use serde_json::json;

    /// Accepts everything, fails every call.
    struct FailingInterpreter;

    impl Interpreter for FailingInterpreter {
        fn name(&self) -> &str {
            "failing"
        }

        fn can_load(&self, _extension: &Extension) -> bool {
            true
        }

        fn can_save(&self, _value: &Value) -> bool {
            true
        }

        fn load(&self, _store: &dyn LLStore, _location: &Path) -> Result<Value, InterpretError> {
            Err("load exploded".into())
        }

        fn save(
            &self,
            _store: &dyn LLStore,
            _location: &Path,
            _value: &Value,
        ) -> Result<(), InterpretError> {
            Err("save exploded".into())
        }
    }

    #[test]
    fn standard_order() {
        assert_eq!(Interpreters::standard().names(), vec!["json", "text", "binary"]);
        assert_eq!(Interpreters::binary_only().names(), vec!["binary"]);
        assert!(Interpreters::new().is_empty());
    }

    #[test]
    fn interpreters_inference() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDiskStore::new();
        let mut interpreters = Interpreters::new();
        interpreters.register(TextInterpreter::new());
        interpreters.register(JsonInterpreter);
        interpreters.register(BinaryInterpreter);

        store
            .write_bytes(&dir.path().join("example"), b"content!")
            .unwrap();
        store
            .write_text(&dir.path().join("example.txt"), "content!")
            .unwrap();
        store
            .write_text(
                &dir.path().join("example.json"),
                r#"{"content": "content!"}"#,
            )
            .unwrap();

        assert_eq!(
            interpreters
                .load(&store, &dir.path().join("example"))
                .unwrap(),
            Value::from(b"content!")
        );
        assert_eq!(
            interpreters
                .load(&store, &dir.path().join("example.txt"))
                .unwrap(),
            Value::from("content!")
        );
        assert_eq!(
            interpreters
                .load(&store, &dir.path().join("example.json"))
                .unwrap(),
            Value::from(json!({"content": "content!"}))
        );

        // Same with save
        interpreters
            .save(&store, &dir.path().join("example2"), &Value::from(b"content!"))
            .unwrap();
        assert_eq!(
            &store.read_bytes(&dir.path().join("example2")).unwrap()[..],
            b"content!"
        );

        interpreters
            .save(
                &store,
                &dir.path().join("example2.txt"),
                &Value::from("content!"),
            )
            .unwrap();
        assert_eq!(
            store.read_text(&dir.path().join("example2.txt")).unwrap(),
            "content!"
        );

        interpreters
            .save(
                &store,
                &dir.path().join("example2.json"),
                &Value::from(json!({"content": "content!"})),
            )
            .unwrap();
        let saved: serde_json::Value = serde_json::from_str(
            &store.read_text(&dir.path().join("example2.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(saved, json!({"content": "content!"}));
    }

    #[test]
    fn unsupported_value_is_rejected() {
        let store = MemoryStore::new();
        let err = Interpreters::standard()
            .save(&store, Path::new("example2.txt"), &Value::from(55i64))
            .unwrap_err();

        assert!(matches!(err, Error::UnsupportedValue { kind: "integer", .. }));
        assert!(!store.exists(Path::new("example2.txt")));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let store = MemoryStore::new();
        let err = Interpreters::standard()
            .load(&store, Path::new("unknown"))
            .unwrap_err();

        match err {
            Error::Load {
                location,
                interpreter,
                ..
            } => {
                assert_eq!(location, Path::new("unknown"));
                assert_eq!(interpreter, "binary");
            }
            other => panic!("expected load error, got {:?}", other),
        }
    }

    #[test]
    fn no_loader_without_fallback() {
        let store = MemoryStore::new();
        let mut interpreters = Interpreters::new();
        interpreters.register(JsonInterpreter);

        let err = interpreters
            .load(&store, Path::new("notes.txt"))
            .unwrap_err();
        assert!(matches!(err, Error::NoInterpreter { ref extension, .. } if extension == "txt"));
    }

    #[test]
    fn first_match_wins() {
        let mut interpreters = Interpreters::standard();
        interpreters.register(FailingInterpreter);

        // The catch-all binary interpreter shadows anything registered later.
        let store = MemoryStore::new();
        interpreters
            .save(&store, Path::new("blob"), &Value::from(b"x"))
            .unwrap();
        assert_eq!(
            interpreters.load(&store, Path::new("blob")).unwrap(),
            Value::from(b"x")
        );
        assert_eq!(
            interpreters
                .find_loader(&Extension::from("zip"))
                .map(|i| i.name()),
            Some("binary")
        );
    }

    #[test]
    fn interpreter_failures_are_wrapped() {
        let store = MemoryStore::new();
        let mut interpreters = Interpreters::new();
        interpreters.register(FailingInterpreter);

        let err = interpreters
            .save(&store, Path::new("out"), &Value::from("text"))
            .unwrap_err();
        assert!(matches!(err, Error::Save { .. }));
        assert!(err.to_string().contains("save exploded"));
        assert!(err.to_string().contains("text (4 chars)"));

        let err = interpreters.load(&store, Path::new("out")).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
        assert!(err.to_string().contains("load exploded"));
    }

    #[test]
    fn multi_dot_names_use_first_suffix() {
        let store = MemoryStore::new();
        store
            .write_text(Path::new("report.json.txt"), r#"{"a": 1}"#)
            .unwrap();

        // Classified by "json", not "txt".
        assert_eq!(
            Interpreters::standard()
                .load(&store, Path::new("report.json.txt"))
                .unwrap(),
            Value::from(json!({"a": 1}))
        );
    }
}
