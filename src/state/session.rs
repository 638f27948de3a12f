// Session persistence
// Saves and restores the slot selection; storage failures never escape
use super::models::{PersistedSession, SelectionState};
use super::storage::KeyValueStore;

/// Persists the selection as id references under one storage key
///
/// Every operation absorbs storage and parse failures: they are logged and
/// reported as `false` / `None`, never as errors.
pub struct SessionStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        SessionStore {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Write the selection; returns whether it was persisted
    pub fn save(&self, selection: &SelectionState) -> bool {
        let session = PersistedSession::capture(selection);

        let json = match serde_json::to_string(&session) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize session state: {}", e);
                return false;
            }
        };

        match self.store.set(&self.key, &json) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to save session state: {}", e);
                false
            }
        }
    }

    /// Read the stored session, if there is a usable one
    ///
    /// Missing, unreadable, or malformed documents all yield `None`.
    pub fn load(&self) -> Option<PersistedSession> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to load session state: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<PersistedSession>(&raw) {
            Ok(session) if session.tempo > 0 => Some(session),
            Ok(_) => {
                log::warn!("Ignoring saved session with zero tempo");
                None
            }
            Err(e) => {
                log::warn!("Ignoring malformed session state: {}", e);
                None
            }
        }
    }

    /// Remove the stored session; returns whether storage accepted it
    pub fn clear(&self) -> bool {
        match self.store.remove(&self.key) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to clear session state: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Category};
    use crate::state::db::open_in_memory;
    use crate::state::storage::{MemoryStore, SqliteStore, StorageError, StorageResult};

    const KEY: &str = "beatgrid_session_state";

    /// Storage that rejects every operation, like a disabled localStorage
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn remove(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }
    }

    fn full_selection(catalog: &Catalog) -> SelectionState {
        let mut selection = SelectionState::new(174);
        for category in Category::ALL {
            selection.assign(catalog.list(category)[1].clone());
        }
        selection
    }

    #[test]
    fn test_save_load_round_trip() {
        let catalog = Catalog::builtin();
        let sessions = SessionStore::new(MemoryStore::new(), KEY);
        let selection = full_selection(&catalog);

        assert!(sessions.save(&selection));
        let loaded = sessions.load().unwrap();

        assert_eq!(loaded.tempo, 174);
        assert_eq!(loaded.selected_ids, selection.selected_ids());
        assert_eq!(SelectionState::from_persisted(&loaded, &catalog), selection);
    }

    #[test]
    fn test_round_trip_through_sqlite() {
        let catalog = Catalog::builtin();
        let sessions = SessionStore::new(SqliteStore::new(open_in_memory().unwrap()), KEY);
        let mut selection = SelectionState::new(166);
        selection.assign(catalog.list(Category::Lead)[0].clone());

        assert!(sessions.save(&selection));
        let loaded = sessions.load().unwrap();
        assert_eq!(loaded.tempo, 166);
        assert_eq!(loaded.selected_ids.drum, None);
        assert_eq!(loaded.selected_ids.lead, Some(catalog.list(Category::Lead)[0].id.clone()));
    }

    #[test]
    fn test_load_without_save_is_none() {
        let sessions = SessionStore::new(MemoryStore::new(), KEY);
        assert!(sessions.load().is_none());
    }

    #[test]
    fn test_load_after_clear_is_none() {
        let catalog = Catalog::builtin();
        let sessions = SessionStore::new(MemoryStore::new(), KEY);
        assert!(sessions.save(&full_selection(&catalog)));
        assert!(sessions.clear());
        assert!(sessions.load().is_none());
    }

    #[test]
    fn test_malformed_document_is_none() {
        let store = MemoryStore::new();
        store.set(KEY, "{\"tempo\": \"fast\"").unwrap();
        let sessions = SessionStore::new(store, KEY);
        assert!(sessions.load().is_none());
    }

    #[test]
    fn test_partial_document_is_none() {
        let store = MemoryStore::new();
        store.set(KEY, r#"{"tempo": 170}"#).unwrap();
        let sessions = SessionStore::new(store, KEY);
        assert!(sessions.load().is_none());
    }

    #[test]
    fn test_zero_tempo_is_none() {
        let store = MemoryStore::new();
        store
            .set(
                KEY,
                r#"{"tempo":0,"selectedIds":{"drum":null,"bass":null,"lead":null},"timestamp":"2025-01-01T00:00:00Z"}"#,
            )
            .unwrap();
        let sessions = SessionStore::new(store, KEY);
        assert!(sessions.load().is_none());
    }

    #[test]
    fn test_reads_documents_written_by_other_clients() {
        let store = MemoryStore::new();
        store
            .set(
                KEY,
                r#"{"tempo":168,"selectedIds":{"drum":"drum-two-step","bass":null,"lead":"lead-glass-arp"},"timestamp":"2025-03-14T09:26:53.589Z"}"#,
            )
            .unwrap();
        let sessions = SessionStore::new(store, KEY);

        let loaded = sessions.load().unwrap();
        assert_eq!(loaded.tempo, 168);
        assert_eq!(loaded.selected_ids.get(Category::Drum), Some("drum-two-step"));
        assert_eq!(loaded.selected_ids.get(Category::Bass), None);
    }

    #[test]
    fn test_storage_failures_are_absorbed() {
        let catalog = Catalog::builtin();
        let sessions = SessionStore::new(FailingStore, KEY);
        assert!(!sessions.save(&full_selection(&catalog)));
        assert!(sessions.load().is_none());
        assert!(!sessions.clear());
    }
}
