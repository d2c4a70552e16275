use std::fmt::Display;

use crate::error::AppResult;

/// Namespace shared by every key this crate persists
pub const KEY_NAMESPACE: &str = "movie-explorer";

/// Keys of the durable slots owned by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Favorites,
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::Favorites => write!(f, "{}-favorites", KEY_NAMESPACE),
        }
    }
}

/// Durable string slot addressed by a fixed key
///
/// Backends only move opaque strings; (de)serialization is left to the owner of
/// the key so a corrupt value can be recovered from at the right layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait KeyValueSlot: Send + Sync {
    /// Read the value stored under `key`, `None` if nothing was ever written
    async fn get(&self, key: &StorageKey) -> AppResult<Option<String>>;

    /// Replace the value stored under `key`
    ///
    /// Returns once the value is durable for this backend.
    async fn set(&self, key: &StorageKey, value: String) -> AppResult<()>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
