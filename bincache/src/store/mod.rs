//! Bin-partitioned key/value stores
//!
//! [`BinStore`] is the capability the adapter consumes. Keys live inside
//! bins (tables); expiry is expressed as an [`Expiry`] marker and removal
//! either targets one key or every key sharing a prefix.

pub mod memory;
pub mod recording;

pub use memory::MemoryStore;
pub use recording::{RecordingStore, StoreCall};

use crate::cache::entry::StoredEntry;
use crate::cache::types::{CacheValue, ClearMode, Expiry};
use crate::error::Result;
use std::sync::Arc;

/// Key used with [`ClearMode::Wildcard`] to empty a whole bin
pub const WILDCARD_ALL: &str = "*";

/// Host key/value store organised into bins
pub trait BinStore {
    /// Fetch the entry stored under `key` in `bin`
    ///
    /// `Ok(None)` means the store has nothing to serve.
    fn get(&self, key: &str, bin: &str) -> Result<Option<StoredEntry>>;

    /// Store `data` under `key` in `bin`
    ///
    /// Returns `Ok(false)` when the store declined the write.
    fn set(&self, key: &str, data: CacheValue, bin: &str, expire: Expiry) -> Result<bool>;

    /// Remove `key` from `bin`, or every key starting with it in wildcard mode
    fn clear(&self, key: &str, bin: &str, mode: ClearMode) -> Result<()>;
}

impl<S: BinStore + ?Sized> BinStore for &S {
    fn get(&self, key: &str, bin: &str) -> Result<Option<StoredEntry>> {
        (**self).get(key, bin)
    }

    fn set(&self, key: &str, data: CacheValue, bin: &str, expire: Expiry) -> Result<bool> {
        (**self).set(key, data, bin, expire)
    }

    fn clear(&self, key: &str, bin: &str, mode: ClearMode) -> Result<()> {
        (**self).clear(key, bin, mode)
    }
}

impl<S: BinStore + ?Sized> BinStore for Arc<S> {
    fn get(&self, key: &str, bin: &str) -> Result<Option<StoredEntry>> {
        (**self).get(key, bin)
    }

    fn set(&self, key: &str, data: CacheValue, bin: &str, expire: Expiry) -> Result<bool> {
        (**self).set(key, data, bin, expire)
    }

    fn clear(&self, key: &str, bin: &str, mode: ClearMode) -> Result<()> {
        (**self).clear(key, bin, mode)
    }
}
