use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_shard_amount")]
    pub shard_amount: usize,

    /// Seconds between background sweeps of expired entries; 0 disables the
    /// sweeper and leaves eviction purely to reads.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            shard_amount: default_shard_amount(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sweep_interval_secs() -> u64 {
    300
}

fn default_shard_amount() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    (cpus * 4).next_power_of_two().clamp(8, 256)
}
