#![allow(dead_code)]
use rootwalk_domain::{DnsName, RecordBody, RecordType, ResourceRecord};
use std::net::Ipv4Addr;
use std::str::FromStr;

pub fn name(text: &str) -> DnsName {
    DnsName::parse(text).expect("Invalid domain name")
}

pub struct ResourceRecordBuilder {
    owner: DnsName,
    ttl: u32,
    body: RecordBody,
}

impl ResourceRecordBuilder {
    pub fn new() -> Self {
        Self {
            owner: name("example.com."),
            ttl: 300,
            body: RecordBody::A(Ipv4Addr::new(192, 0, 2, 1)),
        }
    }

    pub fn owner(mut self, owner: &str) -> Self {
        self.owner = name(owner);
        self
    }

    pub fn address(mut self, address: &str) -> Self {
        self.body = RecordBody::A(Ipv4Addr::from_str(address).expect("Invalid IP address"));
        self
    }

    pub fn cname(mut self, target: &str) -> Self {
        self.body = RecordBody::Cname(name(target));
        self
    }

    pub fn nameserver(mut self, target: &str) -> Self {
        self.body = RecordBody::Ns(name(target));
        self
    }

    pub fn opaque(mut self, record_type: RecordType, rdata: &[u8]) -> Self {
        self.body = RecordBody::Opaque {
            record_type,
            rdata: rdata.to_vec(),
        };
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn build(self) -> ResourceRecord {
        ResourceRecord::new(self.owner, self.ttl, self.body)
    }
}

impl Default for ResourceRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}
