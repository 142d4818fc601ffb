//! Core type definitions for the cache system

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Cache key type - the caller-supplied id or its namespaced store key
pub type CacheKey = String;

/// Cache value type - any payload the caller can express, stored verbatim
pub type CacheValue = Value;

/// Expiry marker attached to every stored entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expiry {
    /// Never removed except by explicit delete or a full flush
    Permanent,

    /// Removed at the next general sweep of the store
    Temporary,

    /// Kept at least until the given Unix timestamp (seconds)
    At(i64),
}

impl Expiry {
    /// Whether an entry with this marker is past its expiry at `now`
    ///
    /// Temporary entries only disappear on a sweep, so they never count as
    /// expired here.
    pub fn is_expired_at(&self, now: i64) -> bool {
        match self {
            Expiry::At(timestamp) => *timestamp < now,
            Expiry::Permanent | Expiry::Temporary => false,
        }
    }

    /// Whether a general sweep at `now` removes an entry with this marker
    pub fn is_sweepable_at(&self, now: i64) -> bool {
        matches!(self, Expiry::Temporary) || self.is_expired_at(now)
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expiry::Permanent => write!(f, "permanent"),
            Expiry::Temporary => write!(f, "temporary"),
            Expiry::At(timestamp) => write!(f, "at:{}", timestamp),
        }
    }
}

/// How a clear request matches keys inside a bin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearMode {
    /// Remove the single entry with exactly this key
    Exact,

    /// Remove every entry whose key starts with the given key; `*` empties the bin
    Wildcard,
}

impl fmt::Display for ClearMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClearMode::Exact => write!(f, "exact"),
            ClearMode::Wildcard => write!(f, "wildcard"),
        }
    }
}

/// Loose truthiness of a payload
///
/// `null`, `false`, zero, `""`, `"0"` and empty arrays/objects are falsy,
/// everything else is truthy.
pub fn is_truthy(value: &CacheValue) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Statistics a cache backend may report
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CacheStats {
    /// Total number of cache hits
    pub hits: u64,

    /// Total number of cache misses
    pub misses: u64,

    /// Number of entries currently stored
    pub entries: usize,

    /// Seconds since the backend started
    pub uptime_secs: u64,

    /// Approximate bytes used by stored payloads
    pub memory_usage: usize,
}

impl CacheStats {
    /// Calculate cache hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }

    /// Calculate miss rate as a percentage
    pub fn miss_rate(&self) -> f64 {
        100.0 - self.hit_rate()
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CacheStats {{ hits: {}, misses: {}, hit_rate: {:.2}%, entries: {}, memory: {} bytes, uptime: {}s }}",
            self.hits,
            self.misses,
            self.hit_rate(),
            self.entries,
            self.memory_usage,
            self.uptime_secs
        )
    }
}
