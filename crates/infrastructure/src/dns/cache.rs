pub mod entry;
pub mod key;
pub mod metrics;
pub mod storage;
pub mod sweeper;

pub use entry::CacheEntry;
pub use key::CacheKey;
pub use metrics::{CacheMetrics, CacheStats};
pub use storage::DnsCache;
pub use sweeper::spawn_sweeper;
