use super::{CacheEntry, CacheKey, CacheMetrics};
use dashmap::DashMap;
use rootwalk_domain::config::CacheConfig;
use rootwalk_domain::ResourceRecord;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

const INITIAL_CAPACITY: usize = 1024;

/// Concurrent TTL cache of record sets keyed by `(name, type)`.
///
/// Expired entries are never returned. A lookup that finds one removes it;
/// `purge_expired` removes the rest in bulk.
pub struct DnsCache {
    entries: DashMap<CacheKey, CacheEntry, FxBuildHasher>,
    metrics: Arc<CacheMetrics>,
}

impl DnsCache {
    pub fn new(shard_amount: usize) -> Self {
        info!(shard_amount = shard_amount, "Initializing DNS cache");

        Self {
            entries: DashMap::with_capacity_and_hasher_and_shard_amount(
                INITIAL_CAPACITY,
                FxBuildHasher,
                shard_amount,
            ),
            metrics: Arc::new(CacheMetrics::default()),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.get_at(key, Instant::now())
    }

    /// Lookup as of `now`. An entry whose expiry is at or before `now` is a
    /// miss and is evicted on the spot.
    pub fn get_at(&self, key: &CacheKey, now: Instant) -> Option<CacheEntry> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                self.metrics.hits.fetch_add(1, AtomicOrdering::Relaxed);
                return Some(entry.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            // a concurrent `set` may already have replaced it with a fresh entry
            if self
                .entries
                .remove_if(key, |_, entry| entry.is_expired_at(now))
                .is_some()
            {
                self.metrics.lazy_evictions.fetch_add(1, AtomicOrdering::Relaxed);
                debug!(key = %key, "Evicted expired cache entry");
            }
        }

        self.metrics.misses.fetch_add(1, AtomicOrdering::Relaxed);
        None
    }

    /// Insert or replace; a previous entry under the same key is discarded.
    pub fn set(&self, key: CacheKey, entry: CacheEntry) {
        self.entries.insert(key, entry);
        self.metrics.insertions.fetch_add(1, AtomicOrdering::Relaxed);
    }

    /// Caches `resources` until their smallest TTL runs out. Empty sets and
    /// sets with a zero TTL are not worth storing and are skipped.
    pub fn insert_resources(&self, key: CacheKey, resources: Vec<ResourceRecord>) -> bool {
        self.insert_resources_at(key, resources, Instant::now())
    }

    pub fn insert_resources_at(
        &self,
        key: CacheKey,
        resources: Vec<ResourceRecord>,
        now: Instant,
    ) -> bool {
        match CacheEntry::from_resources(resources, now) {
            Some(entry) if !entry.is_expired_at(now) => {
                debug!(key = %key, ttl = entry.remaining_ttl(now), "Caching record set");
                self.set(key, entry);
                true
            }
            _ => false,
        }
    }

    /// Drops every entry expired as of `now`, returning how many went.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before.saturating_sub(self.entries.len());

        if removed > 0 {
            self.metrics
                .swept
                .fetch_add(removed as u64, AtomicOrdering::Relaxed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn clear(&self) {
        self.entries.clear();
        self.metrics.reset();

        info!("Cache cleared");
    }
}

impl Default for DnsCache {
    fn default() -> Self {
        Self::new(CacheConfig::default().shard_amount)
    }
}
