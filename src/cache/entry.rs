//! Cache Entry Module
//!
//! Defines the structure for individual in-memory cache entries with TTL support.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

// == Entry Value ==
/// Typed payload of an entry, mirroring the Redis value kinds the harness uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValue {
    Str(String),
    Hash(HashMap<String, String>),
    List(VecDeque<String>),
}

// == Cache Entry ==
/// Represents a single cache entry with value and expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: EntryValue,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry with optional TTL.
    ///
    /// A TTL too large to represent as an `Instant` never expires.
    pub fn new(value: EntryValue, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.and_then(|ttl| Instant::now().checked_add(ttl)),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches the expiration time.
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires| Instant::now() >= expires)
    }

    // == Time To Live ==
    /// Remaining TTL, or None if no expiration is set. Zero once expired.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }

    /// Kind name used in type-mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self.value {
            EntryValue::Str(_) => "string",
            EntryValue::Hash(_) => "hash",
            EntryValue::List(_) => "list",
        }
    }
}
