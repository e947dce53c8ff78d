use clap::Parser;
use rootwalk_domain::{CliOverrides, Config, ResolverMode};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "rootwalk")]
#[command(version)]
#[command(about = "rootwalk - iterative DNS resolver that walks the hierarchy from the root servers")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Resolver mode (recursive, static)
    #[arg(long)]
    mode: Option<ResolverMode>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
        mode: cli.mode,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting rootwalk v{}", env!("CARGO_PKG_VERSION"));
    match cli.config.clone().or_else(Config::get_config_path) {
        Some(path) => info!(path = %path, "Configuration loaded"),
        None => info!("No configuration file found, using defaults"),
    }

    let shutdown = CancellationToken::new();
    let dns_services = di::DnsServices::new(&config, &shutdown)?;

    let ctrl_c_shutdown = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        info!("Shutdown signal received");
        ctrl_c_shutdown.cancel();
    });

    let result =
        server::start_dns_server(&config.server, dns_services.handler, shutdown.clone()).await;
    shutdown.cancel();

    if let Err(e) = &result {
        error!(error = %e, "DNS server error");
    }

    if let Some(cache) = &dns_services.cache {
        info!(
            entries = cache.len(),
            hit_rate = cache.metrics().hit_rate(),
            "Cache statistics at shutdown"
        );
    }

    info!("Server shutdown complete");
    result
}
