//! # Cache Provider Facade
//!
//! Lets code written against a generic cache-provider contract store its
//! entries in a bin-partitioned key/value store.
//!
//! ## Translation
//!
//! - **Keys**: every id is prefixed with `doctrine:` before it reaches the store
//! - **Lifetimes**: `None` becomes a permanent entry, a positive number of
//!   seconds becomes an absolute Unix timestamp, zero follows the configured
//!   [`ZeroLifetimePolicy`]
//! - **Delete**: an exact-key clear in the configured table
//! - **Flush**: a wildcard `*` clear scoped to the configured table
//!
//! ## Example
//!
//! ```rust
//! use bincache::cache::{CacheAdapter, CacheProvider};
//! use bincache::store::MemoryStore;
//! use serde_json::json;
//!
//! # fn example() -> bincache::Result<()> {
//! let mut cache = CacheAdapter::new(MemoryStore::new());
//! cache.set_table("cache_test");
//!
//! cache.save("query:123", json!("cached response"), Some(3600))?;
//!
//! if let Some(value) = cache.fetch("query:123")? {
//!     println!("Cache hit: {}", value);
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod adapter;
pub mod config;
pub mod entry;
pub mod provider;
pub mod types;

pub use adapter::{CacheAdapter, CACHE_PREFIX};
pub use config::{AdapterConfig, AdapterConfigBuilder, PresenceCheck, ZeroLifetimePolicy};
pub use entry::StoredEntry;
pub use provider::CacheProvider;
pub use types::{is_truthy, CacheKey, CacheStats, CacheValue, ClearMode, Expiry};
