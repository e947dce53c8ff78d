#![allow(dead_code)]
use rootwalk_domain::{DnsName, ResolverConfig, ResourceRecord};
use std::net::{Ipv4Addr, SocketAddr};

pub const ROOT: &str = "198.41.0.4:53";
pub const SECOND_ROOT: &str = "170.247.170.2:53";

pub fn name(text: &str) -> DnsName {
    DnsName::parse(text).unwrap()
}

pub fn server(text: &str) -> SocketAddr {
    text.parse().unwrap()
}

pub fn a(owner: &str, ttl: u32, address: [u8; 4]) -> ResourceRecord {
    ResourceRecord::a(name(owner), ttl, Ipv4Addr::from(address))
}

pub fn ns(zone: &str, nameserver: &str) -> ResourceRecord {
    ResourceRecord::ns(name(zone), 172800, name(nameserver))
}

pub fn cname(alias: &str, ttl: u32, target: &str) -> ResourceRecord {
    ResourceRecord::cname(name(alias), ttl, name(target))
}

/// Resolver settings for scripted tests: short timeouts, default budget.
pub struct ResolverConfigBuilder {
    config: ResolverConfig,
}

impl ResolverConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ResolverConfig {
                root_servers: vec![server(ROOT), server(SECOND_ROOT)],
                query_timeout_ms: 100,
                resolve_deadline_ms: 2_000,
                ..ResolverConfig::default()
            },
        }
    }

    pub fn roots(mut self, roots: Vec<SocketAddr>) -> Self {
        self.config.root_servers = roots;
        self
    }

    pub fn max_iterations(mut self, limit: u32) -> Self {
        self.config.max_iterations = limit;
        self
    }

    pub fn query_timeout_ms(mut self, ms: u64) -> Self {
        self.config.query_timeout_ms = ms;
        self
    }

    pub fn resolve_deadline_ms(mut self, ms: u64) -> Self {
        self.config.resolve_deadline_ms = ms;
        self
    }

    pub fn upstream_port(mut self, port: u16) -> Self {
        self.config.upstream_port = port;
        self
    }

    pub fn verify_responses(mut self, verify: bool) -> Self {
        self.config.verify_responses = verify;
        self
    }

    pub fn build(self) -> ResolverConfig {
        self.config
    }
}

impl Default for ResolverConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
