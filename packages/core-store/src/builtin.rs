//! Built-in interpreters: binary, JSON and text.

use std::path::Path;

use folderfs_ll_store::LLStore;
use serde::Serialize;

use crate::{Extension, InterpretError, Interpreter, Value};

/// Raw bytes in, raw bytes out.
///
/// Loads any extension and saves only [`Value::Bytes`], which makes it the
/// universal fallback at the end of a registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryInterpreter;

impl Interpreter for BinaryInterpreter {
    fn name(&self) -> &str {
        "binary"
    }

    fn can_load(&self, _extension: &Extension) -> bool {
        true
    }

    fn can_save(&self, value: &Value) -> bool {
        value.is_bytes()
    }

    fn load(&self, store: &dyn LLStore, location: &Path) -> Result<Value, InterpretError> {
        Ok(Value::Bytes(store.read_bytes(location)?.to_vec()))
    }

    fn save(
        &self,
        store: &dyn LLStore,
        location: &Path,
        value: &Value,
    ) -> Result<(), InterpretError> {
        match value {
            Value::Bytes(bytes) => Ok(store.write_bytes(location, bytes)?),
            other => Err(format!("binary interpreter can't save {}", other.kind()).into()),
        }
    }
}

/// Structured data as JSON.
///
/// Loads extensions ending in `json` (any case) and saves maps and arrays,
/// pretty-printed with four-space indentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonInterpreter;

impl JsonInterpreter {
    const INDENT: &'static [u8] = b"    ";

    fn to_pretty_bytes(json: &serde_json::Value) -> Result<Vec<u8>, serde_json::Error> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(Self::INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        json.serialize(&mut serializer)?;
        Ok(out)
    }
}

impl Interpreter for JsonInterpreter {
    fn name(&self) -> &str {
        "json"
    }

    fn can_load(&self, extension: &Extension) -> bool {
        extension.ends_with_ignore_case("json")
    }

    fn can_save(&self, value: &Value) -> bool {
        value.is_structured()
    }

    fn load(&self, store: &dyn LLStore, location: &Path) -> Result<Value, InterpretError> {
        let bytes = store.read_bytes(location)?;
        let json: serde_json::Value = serde_json::from_slice(&bytes)?;
        Ok(Value::from_json(json))
    }

    fn save(
        &self,
        store: &dyn LLStore,
        location: &Path,
        value: &Value,
    ) -> Result<(), InterpretError> {
        let json = value.to_json()?;
        let bytes = Self::to_pretty_bytes(&json)?;
        Ok(store.write_bytes(location, &bytes)?)
    }
}

/// Plain UTF-8 text.
///
/// Loads extensions ending in one of its suffixes (any case) and saves
/// [`Value::String`].
#[derive(Debug, Clone)]
pub struct TextInterpreter {
    extensions: Vec<String>,
}

impl TextInterpreter {
    /// Suffixes recognized by [`TextInterpreter::new`].
    pub const DEFAULT_EXTENSIONS: [&'static str; 4] = ["txt", "csv", "conf", "ini"];

    pub fn new() -> Self {
        Self::with_extensions(Self::DEFAULT_EXTENSIONS)
    }

    /// A text interpreter recognizing a custom set of suffixes.
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

impl Default for TextInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter for TextInterpreter {
    fn name(&self) -> &str {
        "text"
    }

    fn can_load(&self, extension: &Extension) -> bool {
        self.extensions
            .iter()
            .any(|suffix| extension.ends_with_ignore_case(suffix))
    }

    fn can_save(&self, value: &Value) -> bool {
        value.is_text()
    }

    fn load(&self, store: &dyn LLStore, location: &Path) -> Result<Value, InterpretError> {
        Ok(Value::String(store.read_text(location)?))
    }

    fn save(
        &self,
        store: &dyn LLStore,
        location: &Path,
        value: &Value,
    ) -> Result<(), InterpretError> {
        match value {
            Value::String(text) => Ok(store.write_text(location, text)?),
            other => Err(format!("text interpreter can't save {}", other.kind()).into()),
        }
    }
}
