use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Where answers come from.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResolverMode {
    /// Walk the delegation tree from the root servers.
    #[default]
    Recursive,

    /// Answer only from `[[local_records]]`.
    Static,
}

impl ResolverMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recursive => "recursive",
            Self::Static => "static",
        }
    }
}

impl std::str::FromStr for ResolverMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "recursive" => Ok(Self::Recursive),
            "static" => Ok(Self::Static),
            other => Err(format!("Unknown resolver mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub mode: ResolverMode,

    /// Ordered root nameserver endpoints; resolution starts at the first.
    #[serde(default = "default_root_servers")]
    pub root_servers: Vec<SocketAddr>,

    /// Iterations shared by one resolution and every glue lookup it triggers.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Timeout for a single upstream round-trip, in milliseconds.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Overall deadline for one resolution, in milliseconds.
    #[serde(default = "default_resolve_deadline_ms")]
    pub resolve_deadline_ms: u64,

    /// Port used for nameservers learned from referrals.
    #[serde(default = "default_upstream_port")]
    pub upstream_port: u16,

    /// Reject upstream replies whose id or question do not match the query.
    #[serde(default = "default_true")]
    pub verify_responses: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            mode: ResolverMode::default(),
            root_servers: default_root_servers(),
            max_iterations: default_max_iterations(),
            query_timeout_ms: default_query_timeout_ms(),
            resolve_deadline_ms: default_resolve_deadline_ms(),
            upstream_port: default_upstream_port(),
            verify_responses: true,
        }
    }
}

pub fn default_root_servers() -> Vec<SocketAddr> {
    [
        "198.41.0.4:53",     // a.root-servers.net
        "170.247.170.2:53",  // b.root-servers.net
        "192.33.4.12:53",    // c.root-servers.net
        "199.7.91.13:53",    // d.root-servers.net
        "192.203.230.10:53", // e.root-servers.net
    ]
    .iter()
    .filter_map(|addr| addr.parse().ok())
    .collect()
}

fn default_max_iterations() -> u32 {
    10
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_resolve_deadline_ms() -> u64 {
    10_000
}

fn default_upstream_port() -> u16 {
    53
}

fn default_true() -> bool {
    true
}
