//! In-memory query store

use parking_lot::RwLock;
use serde_json::Value;
use skyplan_core::QueryKey;
use std::collections::HashMap;
use std::time::Duration;

use crate::store::{CacheEntry, QueryStore};

/// Default freshness window for cached entries
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// [`QueryStore`] backed by a map behind a read-write lock
pub struct MemoryStore {
    entries: RwLock<HashMap<QueryKey, CacheEntry>>,

    /// Entries older than this are treated as stale
    ttl: Duration,
}

impl MemoryStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Keys currently held, sorted
    pub fn keys(&self) -> Vec<QueryKey> {
        let mut keys: Vec<QueryKey> = self.entries.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn clear(&self) {
        self.entries.write().clear();
        tracing::debug!("query store cleared");
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl QueryStore for MemoryStore {
    fn entry(&self, key: &QueryKey) -> Option<CacheEntry> {
        self.entries.read().get(key).cloned()
    }

    fn get_fresh(&self, key: &QueryKey) -> Option<Value> {
        let entries = self.entries.read();
        match entries.get(key) {
            Some(entry) if !entry.stale && entry.fetched_at.elapsed() < self.ttl => {
                tracing::debug!(key = %key, "cache hit");
                Some(entry.value.clone())
            }
            Some(_) => {
                tracing::debug!(key = %key, "cache stale");
                None
            }
            None => {
                tracing::debug!(key = %key, "cache miss");
                None
            }
        }
    }

    fn set(&self, key: &QueryKey, value: Value) {
        tracing::trace!(key = %key, "cache set");
        self.entries.write().insert(key.clone(), CacheEntry::new(value));
    }

    fn invalidate(&self, key: &QueryKey) {
        let mut entries = self.entries.write();
        let mut count = 0;
        for (_, entry) in entries.iter_mut().filter(|(k, _)| k.starts_with(key)) {
            entry.stale = true;
            count += 1;
        }
        tracing::debug!(key = %key, count, "cache invalidated");
    }

    fn remove(&self, key: &QueryKey) -> Option<Value> {
        tracing::trace!(key = %key, "cache remove");
        self.entries.write().remove(key).map(|entry| entry.value)
    }

    fn restore(&self, key: &QueryKey, entry: CacheEntry) {
        tracing::trace!(key = %key, stale = entry.stale, "cache restore");
        self.entries.write().insert(key.clone(), entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(root: &str) -> QueryKey {
        QueryKey::new(root)
    }

    #[test]
    fn test_set_and_get_fresh() {
        let store = MemoryStore::default();
        assert!(store.get_fresh(&key("flights")).is_none());

        store.set(&key("flights"), json!([{"id": 1}]));
        assert_eq!(store.get_fresh(&key("flights")), Some(json!([{"id": 1}])));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_invalidate_marks_prefix_stale() {
        let store = MemoryStore::default();
        let list = key("flights");
        let entity = key("flights").with(7);
        let calc = key("flights").with(7).with("weight-balance");
        let other = key("aircraft");
        for k in [&list, &entity, &calc, &other] {
            store.set(k, json!({}));
        }

        store.invalidate(&entity);

        assert!(store.get_fresh(&list).is_some());
        assert!(store.get_fresh(&entity).is_none());
        assert!(store.get_fresh(&calc).is_none());
        assert!(store.get_fresh(&other).is_some());
        // Stale entries stay readable
        assert_eq!(store.get(&calc), Some(json!({})));
        assert!(store.entry(&calc).unwrap().stale);
    }

    #[test]
    fn test_set_clears_stale_flag() {
        let store = MemoryStore::default();
        store.set(&key("users"), json!([]));
        store.invalidate(&key("users"));
        store.set(&key("users"), json!([{"id": 2}]));
        assert!(!store.entry(&key("users")).unwrap().stale);
    }

    #[test]
    fn test_expired_entries_are_not_fresh() {
        let store = MemoryStore::new(Duration::ZERO);
        store.set(&key("waypoints"), json!([]));
        assert!(store.get_fresh(&key("waypoints")).is_none());
        assert_eq!(store.get(&key("waypoints")), Some(json!([])));
    }

    #[test]
    fn test_remove_and_clear() {
        let store = MemoryStore::default();
        store.set(&key("a"), json!(1));
        store.set(&key("b"), json!(2));
        assert_eq!(store.keys(), vec![key("a"), key("b")]);

        assert_eq!(store.remove(&key("a")), Some(json!(1)));
        assert_eq!(store.remove(&key("a")), None);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_restore_keeps_stale_flag() {
        let store = MemoryStore::default();
        store.set(&key("flights"), json!([{"id": 1}]));
        store.invalidate(&key("flights"));
        let entry = store.entry(&key("flights")).unwrap();

        store.set(&key("flights"), json!([]));
        store.restore(&key("flights"), entry.clone());

        assert_eq!(store.entry(&key("flights")), Some(entry));
        assert!(store.get_fresh(&key("flights")).is_none());
    }
}
