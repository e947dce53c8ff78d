use super::RecordType;
use crate::DnsName;
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordClass {
    #[default]
    Internet,
    Other(u16),
}

impl RecordClass {
    pub fn to_u16(&self) -> u16 {
        match self {
            RecordClass::Internet => 1,
            RecordClass::Other(code) => *code,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            1 => RecordClass::Internet,
            other => RecordClass::Other(other),
        }
    }
}

/// Record data. The record type is implied by the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordBody {
    A(Ipv4Addr),
    Ns(DnsName),
    Cname(DnsName),
    /// Any other type, kept as raw rdata so it can be passed back out.
    Opaque {
        record_type: RecordType,
        rdata: Vec<u8>,
    },
}

impl RecordBody {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordBody::A(_) => RecordType::A,
            RecordBody::Ns(_) => RecordType::NS,
            RecordBody::Cname(_) => RecordType::CNAME,
            RecordBody::Opaque { record_type, .. } => *record_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub owner: DnsName,

    pub class: RecordClass,

    pub ttl: u32,

    pub body: RecordBody,
}

impl ResourceRecord {
    pub fn new(owner: DnsName, ttl: u32, body: RecordBody) -> Self {
        Self {
            owner,
            class: RecordClass::Internet,
            ttl,
            body,
        }
    }

    pub fn a(owner: DnsName, ttl: u32, address: Ipv4Addr) -> Self {
        Self::new(owner, ttl, RecordBody::A(address))
    }

    pub fn ns(owner: DnsName, ttl: u32, nameserver: DnsName) -> Self {
        Self::new(owner, ttl, RecordBody::Ns(nameserver))
    }

    pub fn cname(owner: DnsName, ttl: u32, target: DnsName) -> Self {
        Self::new(owner, ttl, RecordBody::Cname(target))
    }

    pub fn record_type(&self) -> RecordType {
        self.body.record_type()
    }

    pub fn address(&self) -> Option<Ipv4Addr> {
        match &self.body {
            RecordBody::A(address) => Some(*address),
            RecordBody::Ns(_) | RecordBody::Cname(_) | RecordBody::Opaque { .. } => None,
        }
    }
}

/// Smallest TTL in a record set; `None` for an empty set.
pub fn min_ttl(records: &[ResourceRecord]) -> Option<u32> {
    records.iter().map(|record| record.ttl).min()
}
