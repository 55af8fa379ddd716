use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use folderfs::{
    Bytes, Error, Folder, FolderOptions, Interpreters, LLError, LLStore, LocalDiskStore,
    TextInterpreter, Value,
};
use serde_json::json;

/// Records every store call, then forwards to the local disk.
#[derive(Default)]
struct RecordingStore {
    calls: Mutex<Vec<String>>,
    inner: LocalDiskStore,
}

impl RecordingStore {
    fn record(&self, op: &str, path: &Path) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {}", op, path.display()));
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl LLStore for RecordingStore {
    fn exists(&self, path: &Path) -> bool {
        self.record("exists", path);
        self.inner.exists(path)
    }

    fn is_container(&self, path: &Path) -> bool {
        self.record("is_container", path);
        self.inner.is_container(path)
    }

    fn list_entries(&self, path: &Path) -> Result<Vec<String>, LLError> {
        self.record("list_entries", path);
        self.inner.list_entries(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), LLError> {
        self.record("create_dir_all", path);
        self.inner.create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> Result<(), LLError> {
        self.record("remove_file", path);
        self.inner.remove_file(path)
    }

    fn remove_dir_empty(&self, path: &Path) -> Result<(), LLError> {
        self.record("remove_dir_empty", path);
        self.inner.remove_dir_empty(path)
    }

    fn remove_dir_recursive(&self, path: &Path) -> Result<(), LLError> {
        self.record("remove_dir_recursive", path);
        self.inner.remove_dir_recursive(path)
    }

    fn read_bytes(&self, path: &Path) -> Result<Bytes, LLError> {
        self.record("read_bytes", path);
        self.inner.read_bytes(path)
    }

    fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<(), LLError> {
        self.record("write_bytes", path);
        self.inner.write_bytes(path, data)
    }

    fn read_text(&self, path: &Path) -> Result<String, LLError> {
        self.record("read_text", path);
        self.inner.read_text(path)
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<(), LLError> {
        self.record("write_text", path);
        self.inner.write_text(path, text)
    }
}

fn permissive() -> FolderOptions {
    FolderOptions::default()
        .with_allow_override(true)
        .with_allow_remove_folders_with_content(true)
}

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

#[test]
fn test_create_folders() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("example");

    Folder::new(&root).unwrap();
    assert!(root.is_dir());

    let nested = dir.path().join("a/b/c");
    Folder::new(&nested).unwrap();
    assert!(nested.is_dir());

    let untouched = dir.path().join("untouched");
    Folder::with_options(
        &untouched,
        FolderOptions::default().with_auto_create_folder(false),
    )
    .unwrap();
    assert!(!untouched.exists());
}

#[test]
fn test_create_and_retrieve_elements() {
    let dir = tempfile::tempdir().unwrap();
    let folder = Folder::new(dir.path()).unwrap();

    folder.set("binary", b"raw bytes").unwrap();
    folder.set("text.txt", "plain text").unwrap();
    folder.set("data.json", json!({"list": [1, 2.5, "three"]})).unwrap();
    folder.set("list.json", json!([true, null])).unwrap();

    assert_eq!(folder.get_value("binary").unwrap(), Value::from(b"raw bytes"));
    assert_eq!(folder.get_value("text.txt").unwrap(), Value::from("plain text"));
    assert_eq!(
        folder.get_value("data.json").unwrap(),
        Value::from(json!({"list": [1, 2.5, "three"]}))
    );
    assert_eq!(
        folder.get_value("list.json").unwrap(),
        Value::from(json!([true, null]))
    );

    // Reads are repeatable.
    assert_eq!(
        folder.get_value("text.txt").unwrap(),
        folder.get_value("text.txt").unwrap()
    );

    // The files on disk are plain files.
    assert_eq!(
        std::fs::read_to_string(dir.path().join("text.txt")).unwrap(),
        "plain text"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("data.json")).unwrap(),
        "{\n    \"list\": [\n        1,\n        2.5,\n        \"three\"\n    ]\n}"
    );
}

#[test]
fn test_text_with_unknown_extension_is_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let folder = Folder::new(dir.path()).unwrap();

    std::fs::write(dir.path().join("page.html"), "<p>hi</p>").unwrap();
    assert_eq!(folder.get_value("page.html").unwrap(), Value::from(b"<p>hi</p>"));

    // Saves are chosen by value, loads by extension.
    folder.set("other.html", "<p>yo</p>").unwrap();
    assert_eq!(folder.get_value("other.html").unwrap(), Value::from(b"<p>yo</p>"));
}

#[test]
fn test_delete_elements() {
    let dir = tempfile::tempdir().unwrap();

    let locked = Folder::new(dir.path()).unwrap();
    locked.set("file", b"x").unwrap();
    assert!(matches!(
        locked.delete("file").unwrap_err(),
        Error::NotPermitted { .. }
    ));
    assert!(dir.path().join("file").exists());

    let folder = Folder::with_options(dir.path(), FolderOptions::default().with_allow_override(true))
        .unwrap();
    folder.delete("file").unwrap();
    assert!(!dir.path().join("file").exists());

    folder.set("sub/file", b"x").unwrap();
    assert!(matches!(
        folder.delete("sub").unwrap_err(),
        Error::DirectoryNotEmpty { .. }
    ));
    folder.delete("sub/file").unwrap();
    folder.delete("sub").unwrap();
    assert!(!dir.path().join("sub").exists());
}

#[test]
fn test_delete_self() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");

    let folder = Folder::with_options(&root, FolderOptions::default().with_allow_override(true))
        .unwrap();
    folder.set("a/b.txt", "content").unwrap();
    assert!(matches!(
        folder.delete(".").unwrap_err(),
        Error::DirectoryNotEmpty { .. }
    ));
    assert!(root.exists());

    let folder = Folder::with_options(&root, permissive()).unwrap();
    folder.delete(".").unwrap();
    assert!(!root.exists());
}

#[test]
fn test_delete_subfolder_with_content() {
    let dir = tempfile::tempdir().unwrap();
    let folder = Folder::with_options(dir.path(), permissive()).unwrap();

    folder.set("deep/er/still.txt", "x").unwrap();
    folder.delete("deep/er").unwrap();
    assert!(dir.path().join("deep").is_dir());
    assert!(!dir.path().join("deep/er").exists());
}

#[test]
fn test_edit_elements() {
    let dir = tempfile::tempdir().unwrap();
    let folder = Folder::new(dir.path()).unwrap();

    folder.set("note.txt", "first").unwrap();
    assert!(matches!(
        folder.set("note.txt", "second").unwrap_err(),
        Error::AlreadyExists { .. }
    ));
    assert_eq!(folder.get_value("note.txt").unwrap(), Value::from("first"));

    let folder = Folder::with_options(dir.path(), FolderOptions::default().with_allow_override(true))
        .unwrap();
    folder.set("note.txt", "second").unwrap();
    assert_eq!(folder.get_value("note.txt").unwrap(), Value::from("second"));
}

#[test]
fn test_contains_and_enumeration() {
    let dir = tempfile::tempdir().unwrap();
    let folder = Folder::new(dir.path()).unwrap();

    folder.set("a", b"1").unwrap();
    folder.set("b", b"2").unwrap();
    folder.set("c/d", b"3").unwrap();

    assert!(folder.contains("a").unwrap());
    assert!(folder.contains("c").unwrap());
    assert!(!folder.contains("d").unwrap());
    // Direct children only: nested keys are not walked.
    assert!(!folder.contains("c/d").unwrap());

    assert_eq!(folder.len().unwrap(), 3);
    assert_eq!(sorted(folder.keys().unwrap()), vec!["a", "b", "c"]);
    assert_eq!(folder.folders().unwrap(), vec!["c"]);
    assert_eq!(sorted(folder.files().unwrap()), vec!["a", "b"]);

    let iterated: HashSet<String> = folder.iter().unwrap().collect();
    assert_eq!(iterated.len(), 3);

    // Iteration lists anew each time.
    folder.set("e", b"4").unwrap();
    assert_eq!(folder.iter().unwrap().count(), 4);
}

#[test]
fn test_values_and_items() {
    let dir = tempfile::tempdir().unwrap();
    let folder = Folder::new(dir.path()).unwrap();

    folder.set("text.txt", "t").unwrap();
    folder.set("sub/inner", b"i").unwrap();

    let values = folder.values().unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values.iter().filter(|v| v.is_folder()).count(), 1);

    for (name, entry) in folder.items().unwrap() {
        match name.as_str() {
            "text.txt" => assert_eq!(entry.into_value(), Some(Value::from("t"))),
            "sub" => {
                let sub = entry.into_folder().unwrap();
                assert_eq!(sub.get_value("inner").unwrap(), Value::from(b"i"));
            }
            other => panic!("unexpected entry {}", other),
        }
    }

    assert_eq!(
        folder.files_items().unwrap(),
        vec![("text.txt".to_string(), Value::from("t"))]
    );
    let folders = folder.folders_items().unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].1.root(), dir.path().join("sub"));
}

#[test]
fn test_nested_path_auto_creation() {
    let dir = tempfile::tempdir().unwrap();
    let folder = Folder::new(dir.path()).unwrap();

    folder.set("x/y/z.txt", "hello").unwrap();

    assert!(dir.path().join("x").is_dir());
    assert!(dir.path().join("x/y").is_dir());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("x/y/z.txt")).unwrap(),
        "hello"
    );
    assert_eq!(folder.get_value("x/y/z.txt").unwrap(), Value::from("hello"));

    let y = folder.get("x/y").unwrap().into_folder().unwrap();
    assert_eq!(y.keys().unwrap(), vec!["z.txt"]);
}

#[test]
fn test_nested_set_without_auto_creation() {
    let dir = tempfile::tempdir().unwrap();
    let folder = Folder::with_options(
        dir.path(),
        FolderOptions::default().with_auto_create_folder(false),
    )
    .unwrap();

    assert!(matches!(
        folder.set("x/y/z.txt", "hello").unwrap_err(),
        Error::LocationNotFound { .. }
    ));
    assert!(!dir.path().join("x").exists());

    std::fs::create_dir_all(dir.path().join("x/y")).unwrap();
    folder.set("x/y/z.txt", "hello").unwrap();
    assert_eq!(folder.get_value("x/y/z.txt").unwrap(), Value::from("hello"));
}

#[test]
fn test_index() {
    let dir = tempfile::tempdir().unwrap();
    let folder = Folder::new(dir.path()).unwrap();

    folder.set("foo", b"").unwrap();
    folder.set("foo2", b"").unwrap();
    folder.set("foo3/foo", b"").unwrap();

    let found: HashSet<String> = folder.index("foo").unwrap().into_iter().collect();
    let expected: HashSet<String> = ["foo", "foo3/foo"].iter().map(|s| s.to_string()).collect();
    assert_eq!(found, expected);

    assert!(folder.index_with_depth("foo", 0).unwrap().is_empty());
    assert_eq!(folder.index_with_depth("foo", 1).unwrap(), vec!["foo"]);
    assert!(folder.index("bar").unwrap().is_empty());

    // Paths are relative to the folder searched.
    let sub = folder.get_folder("foo3").unwrap();
    assert_eq!(sub.index("foo").unwrap(), vec!["foo"]);
}

#[test]
fn test_unsupported_value() {
    let dir = tempfile::tempdir().unwrap();
    let folder = Folder::new(dir.path()).unwrap();

    assert!(matches!(
        folder.set("number.txt", 55i64).unwrap_err(),
        Error::UnsupportedValue { kind: "integer", .. }
    ));
    assert!(!dir.path().join("number.txt").exists());
}

#[test]
fn test_json_values_are_never_silently_changed() {
    let dir = tempfile::tempdir().unwrap();
    let folder = Folder::with_options(dir.path(), FolderOptions::default().with_allow_override(true))
        .unwrap();

    let err = folder
        .set("a.json", Value::Array(vec![Value::Float(f64::INFINITY)]))
        .unwrap_err();
    assert!(matches!(err, Error::Save { ref interpreter, .. } if interpreter == "json"));
    assert!(!dir.path().join("a.json").exists());

    std::fs::write(dir.path().join("ids.json"), "[18446744073709551615]").unwrap();
    let ids = folder.get_value("ids.json").unwrap();
    folder.set("ids.json", ids.clone()).unwrap();

    assert!(std::fs::read_to_string(dir.path().join("ids.json"))
        .unwrap()
        .contains("18446744073709551615"));
    assert_eq!(folder.get_value("ids.json").unwrap(), ids);
}

#[test]
fn test_load_failures_are_wrapped() {
    let dir = tempfile::tempdir().unwrap();
    let folder = Folder::new(dir.path()).unwrap();

    std::fs::write(dir.path().join("broken.json"), "{nope").unwrap();
    let err = folder.get("broken.json").unwrap_err();
    match err {
        Error::Load {
            location,
            interpreter,
            ..
        } => {
            assert_eq!(location, dir.path().join("broken.json"));
            assert_eq!(interpreter, "json");
        }
        other => panic!("expected load error, got {:?}", other),
    }
}

#[test]
fn test_invalid_keys_never_touch_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(RecordingStore::default());
    let folder = Folder::open(dir.path(), permissive(), store.clone(), None).unwrap();
    let before = store.calls();

    for key in ["..", "../etc/passwd", "a/../b", "a/..", "", "a//b", "/a", "a/", "a/./b"] {
        assert!(
            matches!(folder.get(key), Err(Error::InvalidKey { .. })),
            "get {:?}",
            key
        );
        assert!(
            matches!(folder.set(key, "x"), Err(Error::InvalidKey { .. })),
            "set {:?}",
            key
        );
        assert!(
            matches!(folder.delete(key), Err(Error::InvalidKey { .. })),
            "delete {:?}",
            key
        );
    }

    assert_eq!(store.calls(), before);
}

#[test]
fn test_custom_registry_is_shared_with_children() {
    let dir = tempfile::tempdir().unwrap();
    let mut interpreters = Interpreters::new();
    interpreters.register(TextInterpreter::with_extensions(["md"]));
    let interpreters = Arc::new(interpreters);

    let folder = Folder::open(
        dir.path(),
        FolderOptions::default(),
        Arc::new(LocalDiskStore::new()),
        Some(interpreters.clone()),
    )
    .unwrap();

    folder.set("docs/readme.md", "# hi").unwrap();
    let docs = folder.get_folder("docs").unwrap();
    assert!(Arc::ptr_eq(docs.interpreters(), &interpreters));
    assert_eq!(docs.get_value("readme.md").unwrap(), Value::from("# hi"));

    // Without a binary fallback, unknown extensions can't be loaded.
    std::fs::write(dir.path().join("blob.bin"), b"x").unwrap();
    assert!(matches!(
        folder.get("blob.bin").unwrap_err(),
        Error::NoInterpreter { .. }
    ));
}

#[test]
fn test_options_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let options: FolderOptions =
        serde_json::from_value(json!({"allow_override": true, "interpret": false})).unwrap();

    let folder = Folder::with_options(dir.path(), options).unwrap();
    assert_eq!(folder.interpreters().names(), vec!["binary"]);

    folder.set("data.json", b"{}").unwrap();
    folder.set("data.json", b"[]").unwrap();
    assert_eq!(folder.get_value("data.json").unwrap(), Value::from(b"[]"));
}

#[test]
fn test_display() {
    let dir = tempfile::tempdir().unwrap();
    let root: PathBuf = dir.path().join("shown");
    let folder = Folder::new(&root).unwrap();
    folder.set("a", b"1").unwrap();
    folder.set("b", b"2").unwrap();

    assert_eq!(
        folder.to_string(),
        format!("{} (2 elements)", root.display())
    );
}
