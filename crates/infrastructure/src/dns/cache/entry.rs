use rootwalk_domain::{min_ttl, ResourceRecord};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A cached record set with a single absolute expiry.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub resources: Arc<Vec<ResourceRecord>>,
    pub expires_at: Instant,
}

impl CacheEntry {
    pub fn new(resources: Vec<ResourceRecord>, expires_at: Instant) -> Self {
        Self {
            resources: Arc::new(resources),
            expires_at,
        }
    }

    /// Expiry is `now` plus the smallest TTL in the set, so no record is
    /// served past its own lifetime. `None` for an empty set.
    pub fn from_resources(resources: Vec<ResourceRecord>, now: Instant) -> Option<Self> {
        let ttl = min_ttl(&resources)?;
        Some(Self::new(
            resources,
            now + Duration::from_secs(u64::from(ttl)),
        ))
    }

    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn remaining_ttl(&self, now: Instant) -> u32 {
        let remaining = self.expires_at.saturating_duration_since(now).as_secs();
        u32::try_from(remaining).unwrap_or(u32::MAX)
    }

    /// The records with TTLs counted down to what is left of the entry.
    pub fn records_at(&self, now: Instant) -> Vec<ResourceRecord> {
        let remaining = self.remaining_ttl(now);
        self.resources
            .iter()
            .map(|record| {
                let mut record = record.clone();
                record.ttl = record.ttl.min(remaining);
                record
            })
            .collect()
    }
}
