use super::DnsCache;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Periodically purges expired entries until `shutdown` fires.
///
/// Reads already refuse expired entries; this only bounds the memory held by
/// names nobody asks for again.
pub fn spawn_sweeper(
    cache: Arc<DnsCache>,
    interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    info!(interval_secs = interval.as_secs(), "Starting cache sweeper");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Cache sweeper: shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    let removed = cache.purge_expired(Instant::now());
                    if removed > 0 {
                        debug!(
                            entries_removed = removed,
                            cache_size = cache.len(),
                            "Cache sweep completed"
                        );
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sweeper_stops_on_shutdown() {
        let cache = Arc::new(DnsCache::new(4));
        let shutdown = CancellationToken::new();

        let handle = spawn_sweeper(cache, Duration::from_millis(10), shutdown.clone());
        shutdown.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper did not stop")
            .unwrap();
    }
}
