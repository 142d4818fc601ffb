//! Configuration for the cache adapter

use crate::error::{CacheError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bin used when none is configured
pub const DEFAULT_TABLE: &str = "cache";

/// Environment variable naming the bin
pub const ENV_TABLE: &str = "BINCACHE_TABLE";

/// Environment variable selecting the [`ZeroLifetimePolicy`]
pub const ENV_ZERO_LIFETIME: &str = "BINCACHE_ZERO_LIFETIME";

/// Environment variable selecting the [`PresenceCheck`]
pub const ENV_PRESENCE: &str = "BINCACHE_PRESENCE";

/// What a save with a lifetime of zero (or below) stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroLifetimePolicy {
    /// Treat it like "no lifetime": the entry never expires
    #[default]
    Permanent,

    /// The entry goes away at the next general sweep of the store
    Temporary,
}

impl FromStr for ZeroLifetimePolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permanent" => Ok(ZeroLifetimePolicy::Permanent),
            "temporary" => Ok(ZeroLifetimePolicy::Temporary),
            other => Err(CacheError::Config(format!(
                "unknown zero-lifetime policy '{}', expected 'permanent' or 'temporary'",
                other
            ))),
        }
    }
}

impl fmt::Display for ZeroLifetimePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZeroLifetimePolicy::Permanent => write!(f, "permanent"),
            ZeroLifetimePolicy::Temporary => write!(f, "temporary"),
        }
    }
}

/// How `contains` decides that an entry is there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceCheck {
    /// Present and truthy: falsy payloads (`""`, `0`, `false`, ...) count as absent
    #[default]
    Truthy,

    /// Any payload the store returns counts
    Present,
}

impl FromStr for PresenceCheck {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truthy" => Ok(PresenceCheck::Truthy),
            "present" => Ok(PresenceCheck::Present),
            other => Err(CacheError::Config(format!(
                "unknown presence check '{}', expected 'truthy' or 'present'",
                other
            ))),
        }
    }
}

impl fmt::Display for PresenceCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresenceCheck::Truthy => write!(f, "truthy"),
            PresenceCheck::Present => write!(f, "present"),
        }
    }
}

/// Configuration for the cache adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Bin (table) every operation is scoped to
    pub table: String,

    /// Meaning of a lifetime of zero or below
    pub zero_lifetime: ZeroLifetimePolicy,

    /// How `contains` treats falsy payloads
    pub presence: PresenceCheck,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            zero_lifetime: ZeroLifetimePolicy::default(),
            presence: PresenceCheck::default(),
        }
    }
}

impl AdapterConfig {
    /// Create a new builder for adapter configuration
    pub fn builder() -> AdapterConfigBuilder {
        AdapterConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.table.is_empty() {
            return Err(CacheError::Config("table must not be empty".to_string()));
        }

        if self.table.chars().any(char::is_whitespace) {
            return Err(CacheError::Config(format!(
                "table '{}' must not contain whitespace",
                self.table
            )));
        }

        Ok(())
    }

    /// Load configuration from the process environment
    ///
    /// A `.env` file in the working directory is read first when present.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(table) = lookup(ENV_TABLE) {
            builder = builder.table(table.trim());
        }
        if let Some(policy) = lookup(ENV_ZERO_LIFETIME) {
            builder = builder.zero_lifetime(policy.parse()?);
        }
        if let Some(presence) = lookup(ENV_PRESENCE) {
            builder = builder.presence(presence.parse()?);
        }

        let config = builder.build();
        config.validate()?;
        Ok(config)
    }
}

/// Builder for adapter configuration
#[derive(Debug, Default)]
pub struct AdapterConfigBuilder {
    table: Option<String>,
    zero_lifetime: Option<ZeroLifetimePolicy>,
    presence: Option<PresenceCheck>,
}

impl AdapterConfigBuilder {
    /// Set the bin name
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Set the zero-lifetime policy
    pub fn zero_lifetime(mut self, policy: ZeroLifetimePolicy) -> Self {
        self.zero_lifetime = Some(policy);
        self
    }

    /// Set the presence check used by `contains`
    pub fn presence(mut self, presence: PresenceCheck) -> Self {
        self.presence = Some(presence);
        self
    }

    /// Build the adapter configuration
    pub fn build(self) -> AdapterConfig {
        let defaults = AdapterConfig::default();

        AdapterConfig {
            table: self.table.unwrap_or(defaults.table),
            zero_lifetime: self.zero_lifetime.unwrap_or(defaults.zero_lifetime),
            presence: self.presence.unwrap_or(defaults.presence),
        }
    }
}
