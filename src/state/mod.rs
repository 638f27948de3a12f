// State management module
// Selection state, SQLite-backed key-value storage, session persistence

pub mod db;
pub mod models;
pub mod session;
pub mod storage;

pub use db::{init_db, open_in_memory, DbConnection, DbError};
pub use models::{PersistedSession, SelectedIds, SelectionState};
pub use session::SessionStore;
pub use storage::{
    get_app_data_dir, get_config_path, get_db_path, KeyValueStore, MemoryStore, SqliteStore,
    StorageError, StorageResult,
};
