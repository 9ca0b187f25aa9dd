//! Bounded response cache keyed by request endpoint.
//!
//! Keys are the rendered endpoint path (`/api/info?id=5`). Eviction is
//! insertion order: once `capacity` entries are held, inserting a new key
//! drops the oldest one. Re-inserting an existing key replaces the value in
//! place without changing its position.

use std::collections::VecDeque;

use kaiten_api::types::AnimeData;
use kaiten_api::Endpoint;

/// Detail records keyed by their `/api/info` endpoint.
pub type DetailCache = EndpointCache<AnimeData>;

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug)]
pub struct EndpointCache<V> {
    entries: VecDeque<(String, V)>,
    capacity: usize,
    stats: CacheStats,
}

impl<V: Clone> EndpointCache<V> {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            stats: CacheStats::default(),
        }
    }

    /// Look up a cached response, counting the hit or miss.
    pub fn lookup(&mut self, endpoint: &Endpoint) -> Option<V> {
        let key = endpoint.to_string();
        match self.entries.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => {
                self.stats.hits += 1;
                tracing::debug!(endpoint = %key, "Served from cache");
                Some(value.clone())
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Store a response, evicting the oldest entry if full.
    pub fn insert(&mut self, endpoint: &Endpoint, value: V) {
        let key = endpoint.to_string();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((key, value));
    }

    pub fn contains(&self, endpoint: &Endpoint) -> bool {
        let key = endpoint.to_string();
        self.entries.iter().any(|(k, _)| *k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str) -> Endpoint {
        Endpoint::info(id)
    }

    #[test]
    fn test_miss_then_hit() {
        let mut cache: EndpointCache<u32> = EndpointCache::new(4);
        assert_eq!(cache.lookup(&info("5")), None);
        cache.insert(&info("5"), 26);
        assert_eq!(cache.lookup(&info("5")), Some(26));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn test_single_entry_behaves_like_previous_endpoint() {
        let mut cache: EndpointCache<u32> = EndpointCache::new(1);
        cache.insert(&info("1"), 1);
        cache.insert(&info("2"), 2);
        assert!(!cache.contains(&info("1")));
        assert_eq!(cache.lookup(&info("2")), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_eviction_is_insertion_order() {
        let mut cache: EndpointCache<u32> = EndpointCache::new(2);
        cache.insert(&info("1"), 1);
        cache.insert(&info("2"), 2);
        // Replacing keeps position; "1" is still the oldest.
        cache.insert(&info("1"), 10);
        cache.insert(&info("3"), 3);
        assert!(!cache.contains(&info("1")));
        assert_eq!(cache.lookup(&info("2")), Some(2));
        assert_eq!(cache.lookup(&info("3")), Some(3));
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut cache: EndpointCache<u32> = EndpointCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.insert(&info("1"), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_key_is_endpoint_string() {
        let mut cache: EndpointCache<u32> = EndpointCache::new(4);
        cache.insert(&info("5"), 5);
        assert!(!cache.contains(&info("50")));
        assert!(!cache.is_empty());
    }
}
