use serde::{Deserialize, Serialize};

/// A fixed address record served by the static store.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocalDnsRecord {
    pub domain: String,

    pub address: String,

    #[serde(default)]
    pub ttl: Option<u32>,
}

impl LocalDnsRecord {
    pub fn ttl_or_default(&self) -> u32 {
        self.ttl.unwrap_or(300)
    }
}
