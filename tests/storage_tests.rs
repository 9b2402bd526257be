mod common;

use common::{admin, create_token, login_response};
use creditos_console::{
    FileStorage, MemoryStorage, SessionStore,
    storage::{SessionStorage, StorageState, TOKEN_KEY, USER_KEY},
};
use std::{fs, sync::Arc};

#[test]
fn test_file_storage_starts_empty_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(dir.path().join("session.json"));

    assert!(storage.get_item(TOKEN_KEY).is_none());
    assert!(!storage.path().exists());
}

#[test]
fn test_file_storage_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let first = FileStorage::open(&path);
    first.set_item(TOKEN_KEY, "abc").unwrap();
    first.set_item(USER_KEY, "{}").unwrap();

    let second = FileStorage::open(&path);
    assert_eq!(second.get_item(TOKEN_KEY).as_deref(), Some("abc"));
    assert_eq!(second.get_item(USER_KEY).as_deref(), Some("{}"));
}

#[test]
fn test_file_storage_remove_is_durable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let storage = FileStorage::open(&path);
    storage.set_item(TOKEN_KEY, "abc").unwrap();
    storage.remove_item(TOKEN_KEY).unwrap();
    // Removing an absent key is fine.
    storage.remove_item(TOKEN_KEY).unwrap();

    assert!(FileStorage::open(&path).get_item(TOKEN_KEY).is_none());
}

#[test]
fn test_file_storage_treats_corrupt_file_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    fs::write(&path, "definitely not json").unwrap();

    let storage = FileStorage::open(&path);

    assert!(storage.get_item(TOKEN_KEY).is_none());
    // The next write replaces the corrupt content.
    storage.set_item(TOKEN_KEY, "fresh").unwrap();
    assert_eq!(
        FileStorage::open(&path).get_item(TOKEN_KEY).as_deref(),
        Some("fresh")
    );
}

#[test]
fn test_session_survives_restart_through_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let token = create_token(3600);

    {
        let storage = Arc::new(FileStorage::open(&path)) as StorageState;
        let mut store = SessionStore::hydrate(storage);
        store.set_auth(&login_response(&token, admin())).unwrap();
    }

    let storage = Arc::new(FileStorage::open(&path)) as StorageState;
    let store = SessionStore::hydrate(storage);

    assert_eq!(store.token(), Some(token.as_str()));
    assert_eq!(store.user(), Some(&admin()));
    assert!(!store.is_token_expired());
}

#[test]
fn test_logout_survives_restart_through_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let storage = Arc::new(FileStorage::open(&path)) as StorageState;
        let mut store = SessionStore::hydrate(storage);
        store.set_auth(&login_response("t", admin())).unwrap();
        store.logout();
    }

    let store = SessionStore::hydrate(Arc::new(FileStorage::open(&path)) as StorageState);
    assert!(!store.is_authenticated());
}

#[test]
fn test_memory_storage_failure_mode() {
    let storage = MemoryStorage::new_failing();

    assert!(storage.set_item(TOKEN_KEY, "t").is_err());
    assert!(storage.remove_item(TOKEN_KEY).is_err());
    assert!(storage.get_item(TOKEN_KEY).is_none());
}
