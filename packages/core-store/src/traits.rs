//! The Interpreter trait: one file format strategy.

use std::path::Path;
use std::sync::Arc;

use folderfs_ll_store::LLStore;

use crate::{Extension, InterpretError, Value};

/// Converts between the bytes of a stored file and a [`Value`].
///
/// An interpreter declares what it can handle through two predicates, and the
/// [`Interpreters`](crate::Interpreters) registry asks them in registration
/// order. Interpreters hold no per-call state.
///
/// # Implementing Custom Interpreters
///
/// ```rust
/// use folderfs_core_store::{Extension, InterpretError, Interpreter, Value};
/// use folderfs_ll_store::LLStore;
/// use std::path::Path;
///
/// /// Stores integers as decimal text in `.num` files.
/// struct NumberInterpreter;
///
/// impl Interpreter for NumberInterpreter {
///     fn name(&self) -> &str {
///         "number"
///     }
///
///     fn can_load(&self, extension: &Extension) -> bool {
///         extension.ends_with_ignore_case("num")
///     }
///
///     fn can_save(&self, value: &Value) -> bool {
///         matches!(value, Value::Integer(_))
///     }
///
///     fn load(&self, store: &dyn LLStore, location: &Path) -> Result<Value, InterpretError> {
///         let text = store.read_text(location)?;
///         Ok(Value::Integer(text.trim().parse()?))
///     }
///
///     fn save(&self, store: &dyn LLStore, location: &Path, value: &Value) -> Result<(), InterpretError> {
///         match value {
///             Value::Integer(i) => Ok(store.write_text(location, &i.to_string())?),
///             other => Err(format!("can't save {} as a number", other.kind()).into()),
///         }
///     }
/// }
/// ```
pub trait Interpreter: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Check if files with this extension can be loaded.
    fn can_load(&self, extension: &Extension) -> bool;

    /// Check if this value can be saved.
    fn can_save(&self, value: &Value) -> bool;

    /// Load the file at `location`.
    fn load(&self, store: &dyn LLStore, location: &Path) -> Result<Value, InterpretError>;

    /// Save `value` to the file at `location`, replacing any previous content.
    fn save(&self, store: &dyn LLStore, location: &Path, value: &Value)
        -> Result<(), InterpretError>;
}

impl<T: Interpreter + ?Sized> Interpreter for Box<T> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn can_load(&self, extension: &Extension) -> bool {
        self.as_ref().can_load(extension)
    }

    fn can_save(&self, value: &Value) -> bool {
        self.as_ref().can_save(value)
    }

    fn load(&self, store: &dyn LLStore, location: &Path) -> Result<Value, InterpretError> {
        self.as_ref().load(store, location)
    }

    fn save(
        &self,
        store: &dyn LLStore,
        location: &Path,
        value: &Value,
    ) -> Result<(), InterpretError> {
        self.as_ref().save(store, location, value)
    }
}

impl<T: Interpreter + ?Sized> Interpreter for Arc<T> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn can_load(&self, extension: &Extension) -> bool {
        self.as_ref().can_load(extension)
    }

    fn can_save(&self, value: &Value) -> bool {
        self.as_ref().can_save(value)
    }

    fn load(&self, store: &dyn LLStore, location: &Path) -> Result<Value, InterpretError> {
        self.as_ref().load(store, location)
    }

    fn save(
        &self,
        store: &dyn LLStore,
        location: &Path,
        value: &Value,
    ) -> Result<(), InterpretError> {
        self.as_ref().save(store, location, value)
    }
}
