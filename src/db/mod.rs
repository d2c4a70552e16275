pub mod file;
pub mod memory;
pub mod redis;
pub mod slot;

use std::sync::Arc;

pub use file::FileSlot;
pub use memory::MemorySlot;
pub use self::redis::{create_redis_client, RedisSlot};
pub use slot::{KeyValueSlot, StorageKey, KEY_NAMESPACE};

#[cfg(test)]
pub use slot::MockKeyValueSlot;

use crate::config::{Config, StorageBackend};
use crate::error::AppResult;

/// Opens the favorites slot selected by the configuration
pub fn open_slot(config: &Config) -> AppResult<Arc<dyn KeyValueSlot>> {
    let slot: Arc<dyn KeyValueSlot> = match config.storage_backend {
        StorageBackend::File => Arc::new(FileSlot::new(config.data_dir.clone())),
        StorageBackend::Memory => Arc::new(MemorySlot::new()),
        StorageBackend::Redis => Arc::new(RedisSlot::new(create_redis_client(&config.redis_url)?)),
    };

    tracing::info!(backend = slot.name(), "Favorites slot opened");
    Ok(slot)
}
