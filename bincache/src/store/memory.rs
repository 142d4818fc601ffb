//! In-memory bin store with expiry and general sweeps

use crate::cache::entry::StoredEntry;
use crate::cache::types::{CacheKey, CacheStats, CacheValue, ClearMode, Expiry};
use crate::error::Result;
use crate::store::{BinStore, WILDCARD_ALL};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, info};

/// Bin store that keeps every bin in process memory
///
/// This implementation provides:
/// - Thread-safe access via RwLock
/// - Lazily created bins
/// - Expired timestamp entries served as misses
/// - General sweeps that drop temporary and expired entries
pub struct MemoryStore {
    /// Internal storage
    inner: RwLock<BinTables>,

    /// When the store was created, for uptime reporting
    started_at: DateTime<Utc>,
}

/// Internal bin storage
#[derive(Default)]
struct BinTables {
    /// bin -> key -> entry
    bins: HashMap<String, HashMap<CacheKey, StoredEntry>>,

    /// Lookups that found a live entry
    hits: u64,

    /// Lookups that found nothing (or something expired)
    misses: u64,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BinTables::default()),
            started_at: Utc::now(),
        }
    }

    /// Number of entries held in `bin`, expired ones included until swept
    pub fn len(&self, bin: &str) -> usize {
        self.inner.read().bins.get(bin).map(HashMap::len).unwrap_or(0)
    }

    /// Whether `bin` holds no entries
    pub fn is_empty(&self, bin: &str) -> bool {
        self.len(bin) == 0
    }

    /// Names of every bin that has been written to, sorted
    pub fn bins(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.read().bins.keys().cloned().collect();
        names.sort();
        names
    }

    /// Run a general cache wipe across every bin
    ///
    /// Temporary entries and entries past their timestamp are removed;
    /// permanent entries survive. Returns how many entries were dropped.
    pub fn sweep(&self) -> usize {
        let now = Utc::now().timestamp();
        let mut inner = self.inner.write();
        let mut removed = 0;

        for (bin, entries) in inner.bins.iter_mut() {
            let before = entries.len();
            entries.retain(|_, entry| !entry.expire.is_sweepable_at(now));
            let dropped = before - entries.len();
            if dropped > 0 {
                debug!("Swept {} entries from bin {}", dropped, bin);
            }
            removed += dropped;
        }

        info!("General sweep removed {} entries", removed);
        removed
    }

    /// Get store statistics
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.read();
        let entries = inner.bins.values().map(HashMap::len).sum();
        let memory_usage = inner
            .bins
            .values()
            .flat_map(HashMap::values)
            .map(StoredEntry::calculate_size)
            .sum();
        let uptime_secs = (Utc::now() - self.started_at).num_seconds().max(0) as u64;

        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            entries,
            uptime_secs,
            memory_usage,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BinStore for MemoryStore {
    fn get(&self, key: &str, bin: &str) -> Result<Option<StoredEntry>> {
        let mut inner = self.inner.write();

        let found = inner.bins.get(bin).and_then(|entries| entries.get(key)).cloned();
        match found {
            Some(entry) if entry.is_expired() => {
                debug!("Entry expired: {} in {}", key, bin);
                if let Some(entries) = inner.bins.get_mut(bin) {
                    entries.remove(key);
                }
                inner.misses += 1;
                Ok(None)
            }
            Some(entry) => {
                inner.hits += 1;
                Ok(Some(entry))
            }
            None => {
                inner.misses += 1;
                Ok(None)
            }
        }
    }

    fn set(&self, key: &str, data: CacheValue, bin: &str, expire: Expiry) -> Result<bool> {
        let entry = StoredEntry::new(key, data, expire);
        let mut inner = self.inner.write();

        inner
            .bins
            .entry(bin.to_string())
            .or_default()
            .insert(key.to_string(), entry);

        debug!("Stored {} in {} ({})", key, bin, expire);
        Ok(true)
    }

    fn clear(&self, key: &str, bin: &str, mode: ClearMode) -> Result<()> {
        let mut inner = self.inner.write();
        let Some(entries) = inner.bins.get_mut(bin) else {
            return Ok(());
        };

        let before = entries.len();
        match mode {
            ClearMode::Exact => {
                entries.remove(key);
            }
            ClearMode::Wildcard if key == WILDCARD_ALL => entries.clear(),
            ClearMode::Wildcard => entries.retain(|stored, _| !stored.starts_with(key)),
        }

        debug!(
            "Cleared {} entries from {} ({} {})",
            before - entries.len(),
            bin,
            mode,
            key
        );
        Ok(())
    }
}
