use redis::AsyncCommands;
use redis::Client;

use crate::db::{KeyValueSlot, StorageKey};
use crate::error::AppResult;

/// Creates a Redis client for the favorites slot
///
/// The client is lazy: no connection is attempted until the first command.
pub fn create_redis_client(redis_url: &str) -> AppResult<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Slot stored as a plain Redis string, without expiry
#[derive(Clone)]
pub struct RedisSlot {
    redis_client: Client,
}

impl RedisSlot {
    pub fn new(redis_client: Client) -> Self {
        Self { redis_client }
    }
}

#[async_trait::async_trait]
impl KeyValueSlot for RedisSlot {
    async fn get(&self, key: &StorageKey) -> AppResult<Option<String>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(format!("{}", key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &StorageKey, value: String) -> AppResult<()> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(format!("{}", key), value).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
