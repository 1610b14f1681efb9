use super::*;
use crate::test_support::{driver, rider, temp_path};

fn session(user: User) -> Session {
    Session { user, token: "tok".to_owned() }
}

#[test]
fn new_store_is_empty() {
    let store = SessionStore::new();
    assert!(!store.is_logged_in());
    assert_eq!(store.user(), None);
    assert_eq!(store.token(), None);
    assert_eq!(store.role(), None);
    assert!(store.file().is_none());
}

#[test]
fn set_then_read() {
    let store = SessionStore::new();
    store.set(session(driver()));
    assert!(store.is_logged_in());
    assert_eq!(store.role(), Some(Role::Driver));
    assert_eq!(store.token().as_deref(), Some("tok"));
    assert_eq!(store.user().map(|u| u.username), Some("bob".to_owned()));
}

#[test]
fn clones_share_state() {
    let store = SessionStore::new();
    let handle = store.clone();
    store.set(session(rider()));
    assert!(handle.is_logged_in());
    handle.clear();
    assert!(!store.is_logged_in());
}

#[test]
fn persistent_store_round_trips_through_file() {
    let path = temp_path("session");
    {
        let store = SessionStore::persistent(&path);
        assert!(!store.is_logged_in());
        store.set(session(rider()));
    }
    let restored = SessionStore::persistent(&path);
    assert_eq!(restored.session(), Some(session(rider())));
    assert_eq!(restored.file(), Some(path.as_path()));

    restored.clear();
    assert!(!path.exists());
    assert!(!SessionStore::persistent(&path).is_logged_in());
}

#[test]
fn corrupt_session_file_yields_empty_store() {
    let path = temp_path("corrupt");
    std::fs::write(&path, "{not json").unwrap();
    let store = SessionStore::persistent(&path);
    assert!(!store.is_logged_in());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn clearing_without_file_on_disk_is_fine() {
    let path = temp_path("missing");
    let store = SessionStore::persistent(&path);
    store.clear();
    assert!(!store.is_logged_in());
}

#[cfg(unix)]
#[test]
fn session_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let path = temp_path("mode");
    std::fs::write(&path, "{}").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    let store = SessionStore::persistent(&path);
    store.set(session(rider()));

    let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
    store.clear();
}

#[test]
fn session_file_parent_directories_are_created() {
    let dir = temp_path("dir");
    let path = dir.join("nested").join("session.json");

    SessionStore::persistent(&path).set(session(driver()));

    assert_eq!(SessionStore::persistent(&path).role(), Some(Role::Driver));
    std::fs::remove_dir_all(&dir).unwrap();
}
