//! Demonstrates the cache adapter on top of the in-memory bin store
//!
//! This example shows how to:
//! - Load adapter configuration from the environment (or a `.env` file)
//! - Save entries with permanent, timed and zero lifetimes
//! - Scope flushes to one table
//! - Run a general sweep of the store
//!
//! Run with `RUST_LOG=bincache=debug` to see every forwarded store call.

use bincache::{AdapterConfig, CacheAdapter, CacheProvider, MemoryStore};
use serde_json::json;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let store = Arc::new(MemoryStore::new());
    let config = AdapterConfig::from_env()?;
    println!("Using table '{}' ({} zero lifetimes)", config.table, config.zero_lifetime);

    let mut cache = CacheAdapter::with_config(Arc::clone(&store), config);

    // 1. Save entries
    println!("1. Saving entries...");
    cache.save("settings", json!({"theme": "dark"}), None)?;
    cache.save("session", json!("abc123"), Some(3600))?;
    cache.save("scratch", json!("temporary?"), Some(0))?;
    println!("   contains(settings) = {}", cache.contains("settings")?);

    // 2. Falsy payloads are stored but do not count as contained
    cache.save("counter", json!(0), None)?;
    println!(
        "2. fetch(counter) = {:?}, contains(counter) = {}",
        cache.fetch("counter")?,
        cache.contains("counter")?
    );

    // 3. A second table on the same store
    let home = cache.table().to_string();
    cache.set_table("cache_page");
    cache.save("front", json!("<html/>"), None)?;
    cache.flush_all()?;
    println!("3. Flushed cache_page, bins now: {:?}", store.bins());
    cache.set_table(home);

    // 4. General sweep
    let removed = store.sweep();
    println!("4. Sweep removed {} entries", removed);
    println!("   fetch(scratch) = {:?}", cache.fetch("scratch")?);

    println!("\n{}", store.stats());
    Ok(())
}
