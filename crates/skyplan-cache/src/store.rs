//! The query store interface

use std::time::Instant;

use serde_json::Value;
use skyplan_core::QueryKey;

/// A value held by the store
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub value: Value,
    pub fetched_at: Instant,
    /// Set by [`QueryStore::invalidate`]; the next read through a resource
    /// query refetches
    pub stale: bool,
}

impl CacheEntry {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
            stale: false,
        }
    }
}

/// Shared cache of server data keyed by [`QueryKey`]
pub trait QueryStore: Send + Sync {
    /// The entry under `key`, fresh or not
    fn entry(&self, key: &QueryKey) -> Option<CacheEntry>;

    /// The value under `key` if it is neither stale nor expired
    fn get_fresh(&self, key: &QueryKey) -> Option<Value>;

    /// Write `value` under `key` as a fresh entry
    fn set(&self, key: &QueryKey, value: Value);

    /// Mark `key` and every key underneath it as stale
    fn invalidate(&self, key: &QueryKey);

    /// Drop the entry under `key`, returning its value
    fn remove(&self, key: &QueryKey) -> Option<Value>;

    /// Put `entry` back under `key` as it was, keeping its fetch time and
    /// stale flag
    fn restore(&self, key: &QueryKey, entry: CacheEntry);

    fn get(&self, key: &QueryKey) -> Option<Value> {
        self.entry(key).map(|entry| entry.value)
    }
}

/// The entry of one key before a mutation touched it
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub key: QueryKey,
    pub previous: Option<CacheEntry>,
}

impl Snapshot {
    pub fn take(store: &dyn QueryStore, key: &QueryKey) -> Self {
        Self {
            key: key.clone(),
            previous: store.entry(key),
        }
    }

    /// The snapshotted value, if the key was present
    pub fn value(&self) -> Option<&Value> {
        self.previous.as_ref().map(|entry| &entry.value)
    }

    /// Put the snapshotted entry back, removing the key if it was absent
    pub fn restore(&self, store: &dyn QueryStore) {
        match &self.previous {
            Some(entry) => store.restore(&self.key, entry.clone()),
            None => {
                store.remove(&self.key);
            }
        }
    }
}
