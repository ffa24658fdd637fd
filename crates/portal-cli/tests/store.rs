//! File-backed session store.

use portal_catalog::{
    CatalogEngine, KEY_LAST_SYNCED, KEY_LOGGED_IN, KEY_USER_EMAIL, SessionContext, SessionStore,
};
use portal_cli::store::FileSessionStore;

#[test]
fn values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let mut store = FileSessionStore::open(&path);
    store.set(KEY_LOGGED_IN, "true").unwrap();
    store.set(KEY_USER_EMAIL, "asha.rao@example.in").unwrap();
    assert!(path.exists());

    let reopened = FileSessionStore::open(&path);
    let session = SessionContext::load(&reopened);
    assert!(session.logged_in);
    assert_eq!(session.display_name().as_deref(), Some("Asha"));
}

#[test]
fn writes_replace_the_file_without_leftovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{\"stale\":\"value\"}").unwrap();

    let mut store = FileSessionStore::open(&path);
    store.set(KEY_LOGGED_IN, "true").unwrap();
    store.set(KEY_USER_EMAIL, "a@b.in").unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["session.json"]);

    let saved: std::collections::BTreeMap<String, String> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved.len(), 3);
    assert_eq!(saved[KEY_USER_EMAIL], "a@b.in");
}

#[test]
fn clear_removes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut store = FileSessionStore::open(&path);
    store
        .set(KEY_LAST_SYNCED, "2026-10-14T09:30:00+05:30")
        .unwrap();
    store.clear().unwrap();
    assert!(!path.exists());
    // Clearing twice is fine.
    store.clear().unwrap();
}

#[test]
fn corrupt_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = FileSessionStore::open(&path);
    assert_eq!(store.get(KEY_LOGGED_IN).unwrap(), None);
}

#[test]
fn engine_logout_clears_persisted_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    {
        let mut store = FileSessionStore::open(&path);
        store.set(KEY_LOGGED_IN, "true").unwrap();
        store.set(KEY_USER_EMAIL, "a@b.in").unwrap();
    }

    let mut engine = CatalogEngine::new(FileSessionStore::open(&path));
    assert!(engine.session().logged_in);
    engine.logout();

    let session = SessionContext::load(&FileSessionStore::open(&path));
    assert!(!session.logged_in);
    assert_eq!(session.user_email, None);
}
