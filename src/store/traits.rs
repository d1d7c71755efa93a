//! `SettingsStore` trait — async interface for persisted session settings.
//!
//! The Rust counterpart of the browser's persistent key-value storage: a
//! handful of string-valued settings under fixed key names.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StorageError;

/// Backend-agnostic settings store.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read a setting. `None` if the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a setting, replacing any prior value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Whether the execution environment provides persistent key-value storage.
///
/// Resolved once at startup and handed to the session gate. In an
/// environment without storage the gate degrades to a no-op instead of
/// probing its surroundings at evaluation time.
#[derive(Clone)]
pub enum StorageCapability {
    Available(Arc<dyn SettingsStore>),
    Unavailable,
}

impl StorageCapability {
    /// The underlying store, if the environment has one.
    pub fn store(&self) -> Option<&Arc<dyn SettingsStore>> {
        match self {
            Self::Available(store) => Some(store),
            Self::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}
