use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::local_records::LocalDnsRecord;
use super::logging::LoggingConfig;
use super::resolver::{ResolverConfig, ResolverMode};
use super::server::ServerConfig;
use crate::DnsName;

/// Main configuration structure for rootwalk
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Resolution configuration
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Records served when `resolver.mode = "static"`
    #[serde(default)]
    pub local_records: Vec<LocalDnsRecord>,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. rootwalk.toml in current directory
    /// 3. /etc/rootwalk/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(mode) = overrides.mode {
            self.resolver.mode = mode;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.recv_buffer_size < 512 {
            return Err(ConfigError::Validation(format!(
                "Receive buffer of {} bytes is below the 512-byte DNS/UDP minimum",
                self.server.recv_buffer_size
            )));
        }

        if self.resolver.mode == ResolverMode::Recursive && self.resolver.root_servers.is_empty() {
            return Err(ConfigError::Validation(
                "No root servers configured".to_string(),
            ));
        }

        if self.resolver.max_iterations == 0 {
            return Err(ConfigError::Validation(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        if self.resolver.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "query_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.resolver.resolve_deadline_ms == 0 {
            return Err(ConfigError::Validation(
                "resolve_deadline_ms must be greater than 0".to_string(),
            ));
        }

        if self.resolver.resolve_deadline_ms < self.resolver.query_timeout_ms {
            return Err(ConfigError::Validation(format!(
                "resolve_deadline_ms ({}) is shorter than query_timeout_ms ({})",
                self.resolver.resolve_deadline_ms, self.resolver.query_timeout_ms
            )));
        }

        if !self.cache.shard_amount.is_power_of_two() || self.cache.shard_amount < 2 {
            return Err(ConfigError::Validation(format!(
                "cache shard_amount {} must be a power of two greater than 1",
                self.cache.shard_amount
            )));
        }

        for record in &self.local_records {
            DnsName::parse(&record.domain).map_err(|e| {
                ConfigError::Validation(format!("Local record '{}': {}", record.domain, e))
            })?;
            record.address.parse::<Ipv4Addr>().map_err(|_| {
                ConfigError::Validation(format!(
                    "Local record '{}' has invalid IPv4 address '{}'",
                    record.domain, record.address
                ))
            })?;
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new("rootwalk.toml").exists() {
            Some("rootwalk.toml".to_string())
        } else if std::path::Path::new("/etc/rootwalk/config.toml").exists() {
            Some("/etc/rootwalk/config.toml".to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
    pub mode: Option<ResolverMode>,
}
