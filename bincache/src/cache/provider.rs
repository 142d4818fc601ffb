//! The caller-facing cache provider contract

use crate::cache::types::{CacheKey, CacheStats, CacheValue};
use crate::error::Result;
use std::collections::HashMap;

/// Generic cache provider
///
/// Lifetimes are in seconds: `None` means the entry never expires, a
/// positive value counts from now. What zero or a negative value means is
/// left to the implementation.
pub trait CacheProvider {
    /// Fetch the payload stored for `id`, `None` when there is none
    fn fetch(&self, id: &str) -> Result<Option<CacheValue>>;

    /// Whether an entry exists for `id`
    fn contains(&self, id: &str) -> Result<bool>;

    /// Store `data` under `id`; `Ok(false)` when the backend refused it
    fn save(&self, id: &str, data: CacheValue, lifetime: Option<i64>) -> Result<bool>;

    /// Remove the entry for `id`
    fn delete(&self, id: &str) -> Result<bool>;

    /// Remove every entry this provider manages
    fn flush_all(&self) -> Result<bool>;

    /// Backend statistics, `None` when unavailable
    fn get_stats(&self) -> Option<CacheStats>;

    /// Fetch several ids at once; ids without a payload are left out
    fn fetch_multiple(&self, ids: &[&str]) -> Result<HashMap<CacheKey, CacheValue>> {
        let mut found = HashMap::with_capacity(ids.len());
        for id in ids {
            if let Some(value) = self.fetch(id)? {
                found.insert((*id).to_string(), value);
            }
        }
        Ok(found)
    }

    /// Save several entries with one shared lifetime; true iff every save succeeded
    fn save_multiple(
        &self,
        entries: Vec<(CacheKey, CacheValue)>,
        lifetime: Option<i64>,
    ) -> Result<bool> {
        let mut all_saved = true;
        for (id, data) in entries {
            all_saved &= self.save(&id, data, lifetime)?;
        }
        Ok(all_saved)
    }

    /// Delete several ids; true iff every delete succeeded
    fn delete_multiple(&self, ids: &[&str]) -> Result<bool> {
        let mut all_deleted = true;
        for id in ids {
            all_deleted &= self.delete(id)?;
        }
        Ok(all_deleted)
    }
}
