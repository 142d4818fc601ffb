//! Entries as a bin store hands them back

use crate::cache::types::{CacheKey, CacheValue, Expiry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored entry with its expiry marker
///
/// `data` is optional because a store may return a row whose payload column
/// is missing; the adapter treats that the same as a miss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    /// The namespaced store key
    pub key: CacheKey,

    /// The cached payload, if the store has one
    pub data: Option<CacheValue>,

    /// When the entry stops being served
    pub expire: Expiry,

    /// When the entry was written
    pub created_at: DateTime<Utc>,
}

impl StoredEntry {
    /// Create an entry holding `data`
    pub fn new(key: impl Into<CacheKey>, data: CacheValue, expire: Expiry) -> Self {
        Self {
            key: key.into(),
            data: Some(data),
            expire,
            created_at: Utc::now(),
        }
    }

    /// Create an entry with no payload
    pub fn without_data(key: impl Into<CacheKey>, expire: Expiry) -> Self {
        Self {
            key: key.into(),
            data: None,
            expire,
            created_at: Utc::now(),
        }
    }

    /// Check if the entry has expired
    pub fn is_expired(&self) -> bool {
        self.expire.is_expired_at(Utc::now().timestamp())
    }

    /// Approximate payload size in bytes
    pub fn calculate_size(&self) -> usize {
        let payload = self
            .data
            .as_ref()
            .map(|data| data.to_string().len())
            .unwrap_or(0);
        self.key.len() + payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_creation() {
        let entry = StoredEntry::new("doctrine:key", json!("value"), Expiry::Permanent);

        assert_eq!(entry.key, "doctrine:key");
        assert_eq!(entry.data, Some(json!("value")));
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_without_data() {
        let entry = StoredEntry::without_data("doctrine:key", Expiry::Temporary);
        assert!(entry.data.is_none());
        assert_eq!(entry.calculate_size(), "doctrine:key".len());
    }

    #[test]
    fn test_entry_expiration() {
        let past = Utc::now().timestamp() - 10;
        let entry = StoredEntry::new("k", json!(1), Expiry::At(past));
        assert!(entry.is_expired());

        let future = Utc::now().timestamp() + 3600;
        let entry = StoredEntry::new("k", json!(1), Expiry::At(future));
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_calculate_size() {
        let entry = StoredEntry::new("key", json!("value"), Expiry::Permanent);
        // "value" serializes with its quotes
        assert_eq!(entry.calculate_size(), "key".len() + "\"value\"".len());
    }
}
