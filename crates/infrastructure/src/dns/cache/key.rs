use rootwalk_domain::{DnsName, RecordType};
use std::fmt;

/// Cache key: `DnsName` already compares and hashes case-insensitively,
/// so `Example.COM.` and `example.com.` share an entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub name: DnsName,
    pub record_type: RecordType,
}

impl CacheKey {
    #[inline]
    pub fn new(name: DnsName, record_type: RecordType) -> Self {
        Self { name, record_type }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.record_type)
    }
}
