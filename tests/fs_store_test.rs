use drillbox::commands::{catalog, history, links};
use drillbox::model::{Catalog, HistoryLog, LinkTable};
use drillbox::store::fs::FileStore;
use drillbox::store::DocumentStore;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FileStore) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("data"));
    (dir, store)
}

#[test]
fn load_or_init_creates_default_file_once() {
    let (_dir, mut store) = setup();
    let path = store.document_path("books");
    assert!(!path.exists());

    let first: Catalog = store.load_or_init("books", Catalog::default()).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    let modified = fs::metadata(&path).unwrap().modified().unwrap();

    let second: Catalog = store.load_or_init("books", Catalog::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&path).unwrap(), written);
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), modified);

    let on_disk: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(on_disk, serde_json::json!({ "books": [] }));
}

#[test]
fn documents_use_expected_file_names_and_shapes() {
    let (_dir, mut store) = setup();
    let _: Catalog = store.open().unwrap();
    let _: LinkTable = store.open().unwrap();
    let _: HistoryLog = store.open().unwrap();

    let read = |name: &str| -> serde_json::Value {
        let raw = fs::read_to_string(store.root().join(name)).unwrap();
        serde_json::from_str(&raw).unwrap()
    };
    assert_eq!(read("books.json"), serde_json::json!({ "books": [] }));
    assert_eq!(read("urls.json"), serde_json::json!({ "map": {} }));
    assert_eq!(read("calc_history.json"), serde_json::json!({ "history": [] }));
}

#[test]
fn writes_leave_no_temporary_files() {
    let (_dir, mut store) = setup();
    catalog::add(&mut store, "Dune", "Frank Herbert", 2).unwrap();
    history::record(&mut store, "1+1", 2.0).unwrap();

    for entry in fs::read_dir(store.root()).unwrap() {
        let name = entry.unwrap().file_name().into_string().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn state_survives_a_new_store_instance() {
    let (dir, mut store) = setup();
    let book = catalog::add(&mut store, "Dune", "Frank Herbert", 1).unwrap();
    catalog::borrow(&mut store, &book.id).unwrap();
    let link = links::shorten(&mut store, &links::CodeGenerator::default(), "https://x.y").unwrap();

    let mut reopened = FileStore::new(dir.path().join("data"));
    assert_eq!(catalog::search(&mut reopened, &book.id).unwrap()[0].borrowed, 1);
    assert_eq!(
        links::redirect(&mut reopened, &link.code).unwrap().as_deref(),
        Some("https://x.y")
    );
}

#[test]
fn reads_documents_written_by_hand() {
    let (_dir, mut store) = setup();
    fs::create_dir_all(store.root()).unwrap();
    fs::write(
        store.document_path("books"),
        r#"{
  "books": [
    {"id": "a9993e36", "title": "ab", "author": "c", "copies": 2, "borrowed": 1}
  ]
}"#,
    )
    .unwrap();

    let found = catalog::search(&mut store, "A9993E36").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].borrowed, 1);
}

#[test]
fn corrupt_document_is_reported() {
    let (_dir, mut store) = setup();
    fs::create_dir_all(store.root()).unwrap();
    fs::write(store.document_path("urls"), "not json").unwrap();

    assert!(links::redirect(&mut store, "abc123").is_err());
    assert_eq!(fs::read_to_string(store.document_path("urls")).unwrap(), "not json");
}

#[cfg(unix)]
#[test]
fn unwritable_directory_fails_without_partial_state() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, mut store) = setup();
    catalog::add(&mut store, "Dune", "Frank Herbert", 1).unwrap();
    let before = fs::read_to_string(store.document_path("books")).unwrap();

    fs::set_permissions(store.root(), fs::Permissions::from_mode(0o555)).unwrap();
    let result = catalog::add(&mut store, "Emma", "Jane Austen", 1);
    fs::set_permissions(store.root(), fs::Permissions::from_mode(0o755)).unwrap();

    // Running as root ignores directory permissions
    if result.is_err() {
        assert_eq!(fs::read_to_string(store.document_path("books")).unwrap(), before);
    }
}
