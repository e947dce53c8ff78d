use rootwalk_application::ports::DnsResolver;
use rootwalk_application::use_cases::HandleDnsQueryUseCase;
use rootwalk_domain::{Config, ResolverMode};
use rootwalk_infrastructure::dns::cache::{spawn_sweeper, DnsCache};
use rootwalk_infrastructure::dns::{
    DnsServerHandler, IterativeResolver, LocalRecordStore, UdpTransport,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct DnsServices {
    pub cache: Option<Arc<DnsCache>>,
    pub handler: Arc<DnsServerHandler>,
}

impl DnsServices {
    pub fn new(config: &Config, shutdown: &CancellationToken) -> anyhow::Result<Self> {
        info!(mode = config.resolver.mode.as_str(), "Initializing DNS services");

        let cache = Self::build_cache(config, shutdown);

        let resolver: Arc<dyn DnsResolver> = match config.resolver.mode {
            ResolverMode::Recursive => {
                let mut resolver =
                    IterativeResolver::new(&config.resolver, Arc::new(UdpTransport::new()))?
                        .with_shutdown(shutdown.clone());
                if let Some(cache) = &cache {
                    resolver = resolver.with_cache(Arc::clone(cache));
                }
                Arc::new(resolver)
            }
            ResolverMode::Static => {
                Arc::new(LocalRecordStore::from_config(&config.local_records)?)
            }
        };

        let use_case = Arc::new(HandleDnsQueryUseCase::new(resolver));
        let handler = Arc::new(DnsServerHandler::new(use_case));

        Ok(Self { cache, handler })
    }

    fn build_cache(config: &Config, shutdown: &CancellationToken) -> Option<Arc<DnsCache>> {
        if !config.cache.enabled || config.resolver.mode == ResolverMode::Static {
            return None;
        }

        let cache = Arc::new(DnsCache::new(config.cache.shard_amount));

        if config.cache.sweep_interval_secs > 0 {
            spawn_sweeper(
                Arc::clone(&cache),
                Duration::from_secs(config.cache.sweep_interval_secs),
                shutdown.clone(),
            );
        }

        Some(cache)
    }
}
