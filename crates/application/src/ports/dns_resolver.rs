use async_trait::async_trait;
use rootwalk_domain::{DomainError, Question, ResourceRecord};
use std::net::Ipv4Addr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Terminal answer set for the last name in the alias chain.
    pub records: Vec<ResourceRecord>,
    /// CNAME records followed to reach `records`, in order.
    pub aliases: Vec<ResourceRecord>,
    pub cache_hit: bool,
}

impl Resolution {
    pub fn new(records: Vec<ResourceRecord>, cache_hit: bool) -> Self {
        Self {
            records,
            aliases: vec![],
            cache_hit,
        }
    }

    pub fn with_aliases(mut self, aliases: Vec<ResourceRecord>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn addresses(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.records.iter().filter_map(|record| record.address())
    }

    /// Records as they belong in an answer section: aliases first.
    pub fn answer_section(&self) -> Vec<ResourceRecord> {
        self.aliases
            .iter()
            .chain(self.records.iter())
            .cloned()
            .collect()
    }
}

/// Anything that turns a question into records or a typed failure: the
/// iterative resolver, or a fixed record store.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, question: &Question) -> Result<Resolution, DomainError>;
}
