//! Explicit query cache keyed by resource + parameters.
//!
//! Readers derive a [`QueryKey`] from a resource name and its query
//! parameters, serve cache hits, and commit fetched values. Mutations
//! invalidate every key sharing the affected resource prefix so the next
//! page render re-fetches. A per-key generation counter ensures that only
//! the most recently initiated fetch commits: a result that arrives after a
//! newer fetch began, or after an invalidation, is discarded.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::RwLock;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Cache key: an ordered list of segments, e.g. `["clients", "2", "10"]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Key for one page of the clients list.
    pub fn clients(page: usize, per_page: usize) -> Self {
        Self::new(["clients".to_string(), page.to_string(), per_page.to_string()])
    }

    /// Prefix covering every cached clients page.
    pub fn clients_prefix() -> Self {
        Self::new(["clients"])
    }

    /// Key for the asset catalog.
    pub fn assets() -> Self {
        Self::new(["assets"])
    }

    /// Key for one page of a client's allocations.
    pub fn allocations(client_id: i32, page: usize, per_page: usize) -> Self {
        Self::new([
            "allocations".to_string(),
            client_id.to_string(),
            page.to_string(),
            per_page.to_string(),
        ])
    }

    /// Prefix covering every cached allocations page of one client.
    pub fn allocations_prefix(client_id: i32) -> Self {
        Self::new(["allocations".to_string(), client_id.to_string()])
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }
}

impl Display for QueryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(":"))
    }
}

#[derive(Default)]
struct Slot {
    generation: u64,
    value: Option<serde_json::Value>,
}

/// Shared key-value store for query results.
#[derive(Default)]
pub struct QueryCache {
    slots: RwLock<HashMap<QueryKey, Slot>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, if present and deserializable.
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        let value = slots.get(key)?.value.clone()?;
        serde_json::from_value(value).ok()
    }

    /// Marks the start of a fetch for `key` and returns its token. A newer
    /// `begin` (or an invalidation) supersedes all earlier tokens.
    pub fn begin(&self, key: &QueryKey) -> u64 {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        let slot = slots.entry(key.clone()).or_default();
        slot.generation += 1;
        slot.generation
    }

    /// Commits a fetched value if `token` is still the current one for `key`.
    /// Returns whether the value was stored.
    pub fn complete<T: Serialize>(&self, key: &QueryKey, token: u64, value: &T) -> bool {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        match slots.get_mut(key) {
            Some(slot) if slot.generation == token => match serde_json::to_value(value) {
                Ok(value) => {
                    slot.value = Some(value);
                    true
                }
                Err(e) => {
                    log::error!("Failed to serialize cache entry {key}: {e}");
                    false
                }
            },
            _ => {
                log::debug!("Discarding superseded fetch for {key}");
                false
            }
        }
    }

    /// Drops every value whose key starts with `prefix` and supersedes any
    /// fetch for those keys that is still in flight.
    pub fn invalidate_prefix(&self, prefix: &QueryKey) {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        for (key, slot) in slots.iter_mut() {
            if key.starts_with(prefix) {
                slot.generation += 1;
                slot.value = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_after_commit() {
        let cache = QueryCache::new();
        let key = QueryKey::clients(1, 10);

        assert_eq!(cache.get::<Vec<i32>>(&key), None);

        let token = cache.begin(&key);
        assert!(cache.complete(&key, token, &vec![1, 2, 3]));
        assert_eq!(cache.get::<Vec<i32>>(&key), Some(vec![1, 2, 3]));
    }

    #[test]
    fn most_recently_initiated_fetch_wins() {
        let cache = QueryCache::new();
        let key = QueryKey::clients(1, 10);

        let first = cache.begin(&key);
        let second = cache.begin(&key);

        // The older fetch resolves last but must not clobber the newer one.
        assert!(cache.complete(&key, second, &"new"));
        assert!(!cache.complete(&key, first, &"old"));
        assert_eq!(cache.get::<String>(&key), Some("new".to_string()));
    }

    #[test]
    fn invalidation_supersedes_in_flight_fetch() {
        let cache = QueryCache::new();
        let key = QueryKey::allocations(42, 1, 10);

        let token = cache.begin(&key);
        cache.invalidate_prefix(&QueryKey::allocations_prefix(42));

        assert!(!cache.complete(&key, token, &"stale"));
        assert_eq!(cache.get::<String>(&key), None);
    }

    #[test]
    fn prefix_invalidation_is_scoped() {
        let cache = QueryCache::new();
        let ours = QueryKey::allocations(42, 1, 10);
        let theirs = QueryKey::allocations(43, 1, 10);
        let clients = QueryKey::clients(1, 10);

        for key in [&ours, &theirs, &clients] {
            let token = cache.begin(key);
            cache.complete(key, token, &"cached");
        }

        cache.invalidate_prefix(&QueryKey::allocations_prefix(42));

        assert_eq!(cache.get::<String>(&ours), None);
        assert_eq!(cache.get::<String>(&theirs), Some("cached".to_string()));
        assert_eq!(cache.get::<String>(&clients), Some("cached".to_string()));
    }

    #[test]
    fn clients_prefix_covers_all_pages() {
        let cache = QueryCache::new();
        let page1 = QueryKey::clients(1, 10);
        let page2 = QueryKey::clients(2, 10);

        for key in [&page1, &page2] {
            let token = cache.begin(key);
            cache.complete(key, token, &"cached");
        }

        cache.invalidate_prefix(&QueryKey::clients_prefix());

        assert_eq!(cache.get::<String>(&page1), None);
        assert_eq!(cache.get::<String>(&page2), None);
    }
}
