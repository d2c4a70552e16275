use std::collections::HashMap;

use tokio::sync::Mutex;

use super::{KeyValueSlot, StorageKey};
use crate::error::AppResult;

/// Slot kept in process memory; values are lost when the process exits
#[derive(Default)]
pub struct MemorySlot {
    values: Mutex<HashMap<StorageKey, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-populated with one value, handy for simulating earlier sessions
    pub fn with_value(key: StorageKey, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key, value.into());
        Self {
            values: Mutex::new(values),
        }
    }
}

#[async_trait::async_trait]
impl KeyValueSlot for MemorySlot {
    async fn get(&self, key: &StorageKey) -> AppResult<Option<String>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &StorageKey, value: String) -> AppResult<()> {
        self.values.lock().await.insert(*key, value);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
