//! Call-recording decorator for bin stores
//!
//! Wraps any [`BinStore`] and logs every request before forwarding it, so
//! tests can assert exactly which store calls an operation produced.

use crate::cache::entry::StoredEntry;
use crate::cache::types::{CacheKey, CacheValue, ClearMode, Expiry};
use crate::error::Result;
use crate::store::BinStore;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// One request received by a [`RecordingStore`]
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    /// A `get` request
    Get { key: CacheKey, bin: String },

    /// A `set` request
    Set {
        key: CacheKey,
        data: CacheValue,
        bin: String,
        expire: Expiry,
    },

    /// A `clear` request
    Clear {
        key: CacheKey,
        bin: String,
        mode: ClearMode,
    },
}

impl StoreCall {
    /// Build a `Get` record
    pub fn get(key: impl Into<CacheKey>, bin: impl Into<String>) -> Self {
        StoreCall::Get {
            key: key.into(),
            bin: bin.into(),
        }
    }

    /// Build a `Set` record
    pub fn set(
        key: impl Into<CacheKey>,
        data: CacheValue,
        bin: impl Into<String>,
        expire: Expiry,
    ) -> Self {
        StoreCall::Set {
            key: key.into(),
            data,
            bin: bin.into(),
            expire,
        }
    }

    /// Build a `Clear` record
    pub fn clear(key: impl Into<CacheKey>, bin: impl Into<String>, mode: ClearMode) -> Self {
        StoreCall::Clear {
            key: key.into(),
            bin: bin.into(),
            mode,
        }
    }

    /// The key the call targeted
    pub fn key(&self) -> &str {
        match self {
            StoreCall::Get { key, .. }
            | StoreCall::Set { key, .. }
            | StoreCall::Clear { key, .. } => key,
        }
    }

    /// The bin the call targeted
    pub fn bin(&self) -> &str {
        match self {
            StoreCall::Get { bin, .. }
            | StoreCall::Set { bin, .. }
            | StoreCall::Clear { bin, .. } => bin,
        }
    }
}

impl fmt::Display for StoreCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreCall::Get { key, bin } => write!(f, "get:{},{}", key, bin),
            StoreCall::Set {
                key,
                data,
                bin,
                expire,
            } => write!(f, "set:{},{},{},{}", key, data, bin, expire),
            StoreCall::Clear { key, bin, mode } => write!(f, "clear:{},{},{}", key, bin, mode),
        }
    }
}

/// Bin store decorator that records every call
pub struct RecordingStore<S> {
    inner: S,
    calls: Mutex<Vec<StoreCall>>,
    fail_sets: AtomicBool,
}

impl<S: BinStore> RecordingStore<S> {
    /// Wrap `inner`, starting with an empty call log
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
            fail_sets: AtomicBool::new(false),
        }
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Snapshot of every call so far, oldest first
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    /// Number of recorded calls satisfying `predicate`
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&StoreCall) -> bool,
    {
        self.calls.lock().iter().filter(|call| predicate(call)).count()
    }

    /// Number of recorded calls equal to `expected`
    pub fn count_matching(&self, expected: &StoreCall) -> usize {
        self.count(|call| call == expected)
    }

    /// Forget every recorded call
    pub fn reset(&self) {
        self.calls.lock().clear();
    }

    /// When enabled, `set` reports failure without reaching the wrapped store
    pub fn fail_sets(&self, fail: bool) {
        self.fail_sets.store(fail, Ordering::SeqCst);
    }

    fn record(&self, call: StoreCall) {
        debug!("Store call: {}", call);
        self.calls.lock().push(call);
    }
}

impl<S: BinStore> BinStore for RecordingStore<S> {
    fn get(&self, key: &str, bin: &str) -> Result<Option<StoredEntry>> {
        self.record(StoreCall::get(key, bin));
        self.inner.get(key, bin)
    }

    fn set(&self, key: &str, data: CacheValue, bin: &str, expire: Expiry) -> Result<bool> {
        self.record(StoreCall::set(key, data.clone(), bin, expire));
        if self.fail_sets.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.inner.set(key, data, bin, expire)
    }

    fn clear(&self, key: &str, bin: &str, mode: ClearMode) -> Result<()> {
        self.record(StoreCall::clear(key, bin, mode));
        self.inner.clear(key, bin, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_records_and_forwards() {
        let store = RecordingStore::new(MemoryStore::new());

        store.set("k", json!("v"), "cache", Expiry::Permanent).unwrap();
        let entry = store.get("k", "cache").unwrap();
        store.clear("k", "cache", ClearMode::Exact).unwrap();

        assert_eq!(entry.and_then(|e| e.data), Some(json!("v")));
        assert_eq!(
            store.calls(),
            vec![
                StoreCall::set("k", json!("v"), "cache", Expiry::Permanent),
                StoreCall::get("k", "cache"),
                StoreCall::clear("k", "cache", ClearMode::Exact),
            ]
        );
        assert!(store.inner().is_empty("cache"));
    }

    #[test]
    fn test_count_and_reset() {
        let store = RecordingStore::new(MemoryStore::new());
        store.get("a", "cache").unwrap();
        store.get("a", "cache").unwrap();
        store.get("b", "cache_page").unwrap();

        assert_eq!(store.count_matching(&StoreCall::get("a", "cache")), 2);
        assert_eq!(store.count(|call| call.bin() == "cache_page"), 1);

        store.reset();
        assert!(store.calls().is_empty());
    }

    #[test]
    fn test_fail_sets() {
        let store = RecordingStore::new(MemoryStore::new());
        store.fail_sets(true);

        assert!(!store.set("k", json!(1), "cache", Expiry::Permanent).unwrap());
        assert_eq!(store.calls().len(), 1);
        assert!(store.inner().is_empty("cache"));
    }

    #[test]
    fn test_call_display() {
        let call = StoreCall::set("doctrine:key", json!("value"), "cache", Expiry::Permanent);
        assert_eq!(call.to_string(), "set:doctrine:key,\"value\",cache,permanent");

        let call = StoreCall::clear("*", "cache", ClearMode::Wildcard);
        assert_eq!(call.to_string(), "clear:*,cache,wildcard");
        assert_eq!(call.key(), "*");
    }
}
