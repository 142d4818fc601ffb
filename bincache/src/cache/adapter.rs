//! Cache provider backed by a bin store
//!
//! Every operation turns into exactly one store request:
//!
//! | provider call      | store call                                  |
//! |--------------------|---------------------------------------------|
//! | `fetch(id)`        | `get("doctrine:" + id, table)`              |
//! | `contains(id)`     | `get("doctrine:" + id, table)`              |
//! | `save(id, v, l)`   | `set("doctrine:" + id, v, table, expiry(l))`|
//! | `delete(id)`       | `clear("doctrine:" + id, table, Exact)`     |
//! | `flush_all()`      | `clear("*", table, Wildcard)`               |

use crate::cache::config::{AdapterConfig, PresenceCheck, ZeroLifetimePolicy};
use crate::cache::provider::CacheProvider;
use crate::cache::types::{is_truthy, CacheKey, CacheStats, CacheValue, ClearMode, Expiry};
use crate::error::Result;
use crate::store::{BinStore, WILDCARD_ALL};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Prefix put in front of every id before it reaches the store
pub const CACHE_PREFIX: &str = "doctrine:";

/// Cache provider that forwards to a [`BinStore`]
///
/// The adapter holds no entries of its own. An entry whose payload is
/// missing or `null` is served as a miss. Errors raised by the store come
/// back unmodified; `delete` and `flush_all` cannot tell whether the store
/// actually removed anything and always report success once the request
/// returns.
pub struct CacheAdapter<S> {
    store: S,
    config: AdapterConfig,
}

impl<S: BinStore> CacheAdapter<S> {
    /// Create an adapter with the default configuration (table `cache`)
    pub fn new(store: S) -> Self {
        Self::with_config(store, AdapterConfig::default())
    }

    /// Create an adapter with an explicit configuration
    pub fn with_config(store: S, config: AdapterConfig) -> Self {
        info!("Initializing cache adapter with config: {:?}", config);
        Self { store, config }
    }

    /// Set the table (bin) used by all subsequent operations
    ///
    /// Entries already written stay in the table they were written to.
    pub fn set_table(&mut self, table: impl Into<String>) {
        let table = table.into();
        info!("Switching cache table from {} to {}", self.config.table, table);
        self.config.table = table;
    }

    /// The table (bin) currently in use
    pub fn table(&self) -> &str {
        &self.config.table
    }

    /// The active configuration
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// The wrapped store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store key for a caller-supplied id
    pub fn cache_id(id: &str) -> CacheKey {
        format!("{}{}", CACHE_PREFIX, id)
    }

    /// Convert a provider lifetime (seconds, `None` for forever) into an expiry
    pub fn expiry_for(&self, lifetime: Option<i64>) -> Expiry {
        match lifetime {
            None => Expiry::Permanent,
            Some(secs) if secs <= 0 => match self.config.zero_lifetime {
                ZeroLifetimePolicy::Permanent => Expiry::Permanent,
                ZeroLifetimePolicy::Temporary => Expiry::Temporary,
            },
            Some(secs) => Expiry::At(Utc::now().timestamp().saturating_add(secs)),
        }
    }
}

impl<S: BinStore> CacheProvider for CacheAdapter<S> {
    fn fetch(&self, id: &str) -> Result<Option<CacheValue>> {
        let key = Self::cache_id(id);
        let entry = self.store.get(&key, &self.config.table)?;

        // A null payload is no payload
        let data = entry
            .and_then(|entry| entry.data)
            .filter(|data| !data.is_null());
        debug!(
            "Fetch {} from {}: {}",
            key,
            self.config.table,
            if data.is_some() { "hit" } else { "miss" }
        );
        Ok(data)
    }

    fn contains(&self, id: &str) -> Result<bool> {
        let data = self.fetch(id)?;
        Ok(match self.config.presence {
            PresenceCheck::Truthy => data.as_ref().is_some_and(is_truthy),
            PresenceCheck::Present => data.is_some(),
        })
    }

    fn save(&self, id: &str, data: CacheValue, lifetime: Option<i64>) -> Result<bool> {
        let key = Self::cache_id(id);
        let expire = self.expiry_for(lifetime);

        debug!("Save {} to {} ({})", key, self.config.table, expire);
        let saved = self.store.set(&key, data, &self.config.table, expire)?;
        if !saved {
            warn!("Store refused to save {} in {}", key, self.config.table);
        }
        Ok(saved)
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let key = Self::cache_id(id);

        debug!("Delete {} from {}", key, self.config.table);
        self.store.clear(&key, &self.config.table, ClearMode::Exact)?;
        Ok(true)
    }

    fn flush_all(&self) -> Result<bool> {
        // Entries may linger in a real host store until its next sweep
        debug!("Flush all entries from {}", self.config.table);
        self.store.clear(WILDCARD_ALL, &self.config.table, ClearMode::Wildcard)?;
        Ok(true)
    }

    fn get_stats(&self) -> Option<CacheStats> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::entry::StoredEntry;
    use crate::error::CacheError;
    use crate::store::{MemoryStore, RecordingStore, StoreCall};
    use serde_json::json;

    /// Store that fails every request
    struct BrokenStore;

    impl BinStore for BrokenStore {
        fn get(&self, _key: &str, _bin: &str) -> Result<Option<StoredEntry>> {
            Err(CacheError::Store("get failed".to_string()))
        }

        fn set(&self, _key: &str, _data: CacheValue, _bin: &str, _expire: Expiry) -> Result<bool> {
            Err(CacheError::Store("set failed".to_string()))
        }

        fn clear(&self, _key: &str, _bin: &str, _mode: ClearMode) -> Result<()> {
            Err(CacheError::Store("clear failed".to_string()))
        }
    }

    /// Store whose entries never carry a payload
    struct HollowStore;

    impl BinStore for HollowStore {
        fn get(&self, key: &str, _bin: &str) -> Result<Option<StoredEntry>> {
            Ok(Some(StoredEntry::without_data(key, Expiry::Permanent)))
        }

        fn set(&self, _key: &str, _data: CacheValue, _bin: &str, _expire: Expiry) -> Result<bool> {
            Ok(true)
        }

        fn clear(&self, _key: &str, _bin: &str, _mode: ClearMode) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_cache_id_prefix() {
        assert_eq!(CacheAdapter::<MemoryStore>::cache_id("key"), "doctrine:key");
        assert_eq!(CacheAdapter::<MemoryStore>::cache_id(""), "doctrine:");
    }

    #[test]
    fn test_default_table() {
        let cache = CacheAdapter::new(MemoryStore::new());
        assert_eq!(cache.table(), "cache");
    }

    #[test]
    fn test_set_table() {
        let mut cache = CacheAdapter::new(MemoryStore::new());
        cache.set_table("cache_test");
        assert_eq!(cache.table(), "cache_test");
        assert_eq!(cache.config().table, "cache_test");
    }

    #[test]
    fn test_expiry_for_default_policy() {
        let cache = CacheAdapter::new(MemoryStore::new());

        assert_eq!(cache.expiry_for(None), Expiry::Permanent);
        assert_eq!(cache.expiry_for(Some(0)), Expiry::Permanent);
        assert_eq!(cache.expiry_for(Some(-5)), Expiry::Permanent);
    }

    #[test]
    fn test_expiry_for_temporary_policy() {
        let config = AdapterConfig::builder()
            .zero_lifetime(ZeroLifetimePolicy::Temporary)
            .build();
        let cache = CacheAdapter::with_config(MemoryStore::new(), config);

        assert_eq!(cache.expiry_for(None), Expiry::Permanent);
        assert_eq!(cache.expiry_for(Some(0)), Expiry::Temporary);
        assert_eq!(cache.expiry_for(Some(-1)), Expiry::Temporary);
    }

    #[test]
    fn test_expiry_for_positive_lifetime() {
        let cache = CacheAdapter::new(MemoryStore::new());

        let before = Utc::now().timestamp();
        let expiry = cache.expiry_for(Some(60));
        let after = Utc::now().timestamp();

        match expiry {
            Expiry::At(ts) => assert!(ts >= before + 60 && ts <= after + 60),
            other => panic!("expected a timestamp, got {:?}", other),
        }
    }

    #[test]
    fn test_expiry_for_huge_lifetime_saturates() {
        let cache = CacheAdapter::new(MemoryStore::new());
        assert_eq!(cache.expiry_for(Some(i64::MAX)), Expiry::At(i64::MAX));
    }

    #[test]
    fn test_entry_without_payload_is_absent() {
        let cache = CacheAdapter::new(HollowStore);
        assert_eq!(cache.fetch("key").unwrap(), None);
        assert!(!cache.contains("key").unwrap());
    }

    #[test]
    fn test_store_errors_propagate() {
        let cache = CacheAdapter::new(BrokenStore);

        assert!(matches!(cache.fetch("key"), Err(CacheError::Store(_))));
        assert!(matches!(cache.contains("key"), Err(CacheError::Store(_))));
        assert!(matches!(cache.save("key", json!(1), None), Err(CacheError::Store(_))));
        assert!(matches!(cache.delete("key"), Err(CacheError::Store(_))));
        assert!(matches!(cache.flush_all(), Err(CacheError::Store(_))));
    }

    #[test]
    fn test_refused_save_reports_false() {
        let store = RecordingStore::new(MemoryStore::new());
        store.fail_sets(true);
        let cache = CacheAdapter::new(&store);

        assert!(!cache.save("key", json!("value"), None).unwrap());
        assert_eq!(cache.fetch("key").unwrap(), None);
    }

    #[test]
    fn test_store_accessor_exposes_wrapped_store() {
        let cache = CacheAdapter::new(MemoryStore::new());
        cache.save("key", json!("value"), None).unwrap();

        assert_eq!(cache.store().len("cache"), 1);
        let raw = cache.store().get("doctrine:key", "cache").unwrap().unwrap();
        assert_eq!(raw.data, Some(json!("value")));
    }

    #[test]
    fn test_null_payload_is_absent() {
        for presence in [PresenceCheck::Truthy, PresenceCheck::Present] {
            let config = AdapterConfig::builder().presence(presence).build();
            let cache = CacheAdapter::with_config(MemoryStore::new(), config);

            cache.save("key", json!(null), None).unwrap();

            assert_eq!(cache.fetch("key").unwrap(), None, "{}", presence);
            assert!(!cache.contains("key").unwrap(), "{}", presence);
            assert_eq!(cache.store().len("cache"), 1);
        }
    }

    #[test]
    fn test_get_stats_is_unavailable() {
        let cache = CacheAdapter::new(MemoryStore::new());
        cache.save("key", json!("value"), None).unwrap();
        assert!(cache.get_stats().is_none());
    }

    #[test]
    fn test_multiple_operations() {
        let store = RecordingStore::new(MemoryStore::new());
        let cache = CacheAdapter::new(&store);

        let saved = cache
            .save_multiple(
                vec![("a".to_string(), json!(1)), ("b".to_string(), json!(2))],
                None,
            )
            .unwrap();
        assert!(saved);

        let found = cache.fetch_multiple(&["a", "b", "c"]).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found["a"], json!(1));

        assert!(cache.delete_multiple(&["a", "b"]).unwrap());
        assert!(cache.fetch_multiple(&["a", "b"]).unwrap().is_empty());
        assert_eq!(
            store.count(|call| matches!(call, StoreCall::Clear { mode: ClearMode::Exact, .. })),
            2
        );
    }
}
