use async_trait::async_trait;
use rootwalk_application::ports::{DnsResolver, Resolution};
use rootwalk_domain::config::LocalDnsRecord;
use rootwalk_domain::{DnsName, DomainError, Question, RecordType, ResourceRecord};
use rustc_hash::FxHashMap;
use std::net::Ipv4Addr;
use tracing::{debug, info};

/// Answers A questions from a fixed table; nothing goes to the network.
pub struct LocalRecordStore {
    records: FxHashMap<DnsName, ResourceRecord>,
}

impl LocalRecordStore {
    pub fn from_config(entries: &[LocalDnsRecord]) -> Result<Self, DomainError> {
        let mut records = FxHashMap::default();

        for entry in entries {
            let name = DnsName::parse(&entry.domain)?;
            let address: Ipv4Addr = entry.address.parse().map_err(|_| {
                DomainError::ConfigError(format!(
                    "Local record '{}' has invalid IPv4 address '{}'",
                    entry.domain, entry.address
                ))
            })?;
            records.insert(
                name.clone(),
                ResourceRecord::a(name, entry.ttl_or_default(), address),
            );
        }

        info!(records = records.len(), "Local record store loaded");
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl DnsResolver for LocalRecordStore {
    async fn resolve(&self, question: &Question) -> Result<Resolution, DomainError> {
        let found = match question.record_type {
            RecordType::A => self.records.get(&question.name),
            _ => None,
        };

        match found {
            Some(record) => {
                debug!(domain = %question.name, "Answered from local records");
                Ok(Resolution::new(vec![record.clone()], true))
            }
            None => Err(DomainError::NotFound(question.name.clone())),
        }
    }
}
