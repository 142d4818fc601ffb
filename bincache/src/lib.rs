//! # bincache
//!
//! A generic cache-provider facade over a bin-partitioned key/value store.
//!
//! ## Features
//!
//! - [`CacheProvider`]: the caller-facing contract (`fetch`, `contains`,
//!   `save`, `delete`, `flush_all`, `get_stats`)
//! - [`CacheAdapter`]: translates each provider call into exactly one
//!   [`BinStore`] request
//! - [`MemoryStore`]: an in-memory bin store honouring expiry markers and
//!   general sweeps
//! - [`RecordingStore`]: a decorator that records store calls for tests
//! - Configurable zero-lifetime and presence semantics, loadable from the
//!   environment
//!
//! ## Usage
//!
//! ```rust
//! use bincache::{AdapterConfig, CacheAdapter, CacheProvider, MemoryStore};
//! use serde_json::json;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = AdapterConfig::builder().table("cache_page").build();
//!     let cache = CacheAdapter::with_config(MemoryStore::new(), config);
//!
//!     cache.save("front", json!({"html": "<p>hi</p>"}), None)?;
//!     assert!(cache.contains("front")?);
//!
//!     cache.flush_all()?;
//!     assert_eq!(cache.fetch("front")?, None);
//!     Ok(())
//! }
//! ```
//!
//! ## Sharing a store
//!
//! [`BinStore`] is implemented for `&S` and `Arc<S>`, so several adapters
//! (one per table) can sit on top of the same store:
//!
//! ```rust
//! use bincache::{CacheAdapter, CacheProvider, MemoryStore};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # fn main() -> bincache::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let mut pages = CacheAdapter::new(Arc::clone(&store));
//! pages.set_table("cache_page");
//! let forms = CacheAdapter::new(Arc::clone(&store));
//!
//! pages.save("home", json!("<html/>"), None)?;
//! forms.flush_all()?;
//! assert!(pages.contains("home")?);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod store;

// Re-export main types for convenience
pub use cache::{
    AdapterConfig, AdapterConfigBuilder, CacheAdapter, CacheKey, CacheProvider, CacheStats,
    CacheValue, ClearMode, Expiry, PresenceCheck, StoredEntry, ZeroLifetimePolicy, CACHE_PREFIX,
};
pub use error::{CacheError, Result};
pub use store::{BinStore, MemoryStore, RecordingStore, StoreCall};
