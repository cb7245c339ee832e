pub mod redis;
pub mod store;

pub use self::redis::create_redis_client;
pub use self::redis::RedisListStore;
pub use store::{InMemoryListStore, ListStore, StoreKey};
