use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

// align(64) keeps the hot counters on their own cache line.
#[derive(Default)]
#[repr(align(64))]
pub struct CacheMetrics {
    // Hot counters, touched on every lookup.
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    _hot_pad: [u64; 6],

    pub insertions: AtomicU64,
    pub lazy_evictions: AtomicU64,
    pub swept: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub lazy_evictions: u64,
    pub swept: u64,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(AtomicOrdering::Relaxed) as f64;
        let total = hits + self.misses.load(AtomicOrdering::Relaxed) as f64;

        if total > 0.0 {
            (hits / total) * 100.0
        } else {
            0.0
        }
    }

    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(AtomicOrdering::Relaxed),
            misses: self.misses.load(AtomicOrdering::Relaxed),
            insertions: self.insertions.load(AtomicOrdering::Relaxed),
            lazy_evictions: self.lazy_evictions.load(AtomicOrdering::Relaxed),
            swept: self.swept.load(AtomicOrdering::Relaxed),
        }
    }

    pub(super) fn reset(&self) {
        self.hits.store(0, AtomicOrdering::Relaxed);
        self.misses.store(0, AtomicOrdering::Relaxed);
        self.insertions.store(0, AtomicOrdering::Relaxed);
        self.lazy_evictions.store(0, AtomicOrdering::Relaxed);
        self.swept.store(0, AtomicOrdering::Relaxed);
    }
}
