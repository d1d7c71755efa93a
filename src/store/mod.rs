//! Persistence layer — the key-value settings store behind the session gate.

pub mod libsql_backend;
pub mod memory;
pub mod traits;

pub use libsql_backend::LibSqlStore;
pub use memory::MemoryStore;
pub use traits::{SettingsStore, StorageCapability};
