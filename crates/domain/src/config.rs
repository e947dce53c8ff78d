pub mod cache;
pub mod errors;
pub mod local_records;
pub mod logging;
pub mod resolver;
pub mod root;
pub mod server;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use local_records::LocalDnsRecord;
pub use logging::LoggingConfig;
pub use resolver::{ResolverConfig, ResolverMode};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
