use super::*;

struct UnavailableStorage;

impl CredentialStorage for UnavailableStorage {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), String> {
        Err("SecurityError: storage disabled".to_owned())
    }

    fn remove_item(&self, _key: &str) -> Result<(), String> {
        Err("SecurityError: storage disabled".to_owned())
    }
}

// =============================================================
// CredentialStore lifecycle
// =============================================================

#[test]
fn new_store_is_unauthenticated() {
    let store = CredentialStore::in_memory();
    assert_eq!(store.get(), None);
    assert!(!store.is_authenticated());
}

#[test]
fn set_then_get_returns_token() {
    let store = CredentialStore::in_memory();
    store.set("k");
    assert_eq!(store.get(), Some("k".to_owned()));
    assert!(store.is_authenticated());
}

#[test]
fn set_replaces_previous_token() {
    let store = CredentialStore::in_memory();
    store.set("first");
    store.set("second");
    assert_eq!(store.get(), Some("second".to_owned()));
}

#[test]
fn clear_then_get_returns_none() {
    let store = CredentialStore::in_memory();
    store.set("k");
    store.clear();
    assert_eq!(store.get(), None);
}

#[test]
fn token_is_stored_under_namespaced_key() {
    let storage = Arc::new(MemoryStorage::new());
    let store = CredentialStore::new(storage.clone());
    store.set("local-dev-key");
    assert_eq!(storage.get_item("bayesianqc_api_key"), Some("local-dev-key".to_owned()));
    assert_eq!(storage.get_item("bayesqc_api_key"), None);
    assert_eq!(CREDENTIAL_STORAGE_KEY, "bayesianqc_api_key");
}

#[test]
fn token_written_by_earlier_sessions_is_read_back() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item("bayesianqc_api_key", "persisted").unwrap();
    let store = CredentialStore::new(storage);
    assert_eq!(store.get(), Some("persisted".to_owned()));
}

#[test]
fn clones_share_the_same_slot() {
    let store = CredentialStore::in_memory();
    let other = store.clone();
    store.set("shared");
    assert_eq!(other.get(), Some("shared".to_owned()));
}

#[test]
fn empty_stored_value_counts_as_absent() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item(CREDENTIAL_STORAGE_KEY, "").unwrap();
    let store = CredentialStore::new(storage);
    assert_eq!(store.get(), None);
}

// =============================================================
// Storage failures
// =============================================================

#[test]
fn unavailable_storage_degrades_to_unauthenticated() {
    let store = CredentialStore::new(Arc::new(UnavailableStorage));
    store.set("ignored");
    store.clear();
    assert_eq!(store.get(), None);
}

#[cfg(not(feature = "csr"))]
#[test]
fn local_storage_outside_browser_reads_none() {
    let store = CredentialStore::new(Arc::new(LocalStorage));
    store.set("k");
    assert_eq!(store.get(), None);
}
