use super::record_type_map::RecordTypeMapper;
use hickory_proto::rr::rdata::{A, CNAME, NS, NULL};
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::BinEncodable;
use rootwalk_domain::{DnsName, DomainError, RecordBody, RecordClass, ResourceRecord};

pub(super) fn name_to_hickory(name: &DnsName) -> Result<Name, DomainError> {
    let labels = name.wire_labels();
    Name::from_labels(labels.iter().map(Vec::as_slice))
        .map_err(|e| DomainError::InvalidDomainName(format!("'{}': {}", name, e)))
}

// raw octets, so escaped characters in a label are counted once
pub(super) fn name_from_hickory(name: &Name) -> Result<DnsName, DomainError> {
    DnsName::from_wire_labels(name.iter()).map_err(|e| DomainError::Format(e.to_string()))
}

pub(super) fn record_to_hickory(record: &ResourceRecord) -> Result<Record, DomainError> {
    let rdata = match &record.body {
        RecordBody::A(address) => RData::A(A(*address)),
        RecordBody::Ns(target) => RData::NS(NS(name_to_hickory(target)?)),
        RecordBody::Cname(target) => RData::CNAME(CNAME(name_to_hickory(target)?)),
        RecordBody::Opaque { record_type, rdata } => RData::Unknown {
            code: RecordTypeMapper::to_hickory(record_type),
            rdata: NULL::with(rdata.clone()),
        },
    };

    if record.class != RecordClass::Internet {
        return Err(DomainError::Format(format!(
            "record {} has unsupported class {}",
            record.owner,
            record.class.to_u16()
        )));
    }

    Ok(Record::from_rdata(
        name_to_hickory(&record.owner)?,
        record.ttl,
        rdata,
    ))
}

pub(super) fn record_from_hickory(record: &Record) -> Result<ResourceRecord, DomainError> {
    let owner = name_from_hickory(record.name())?;
    let body = match record.data() {
        RData::A(a) => RecordBody::A(a.0),
        RData::NS(ns) => RecordBody::Ns(name_from_hickory(&ns.0)?),
        RData::CNAME(cname) => RecordBody::Cname(name_from_hickory(&cname.0)?),
        other => RecordBody::Opaque {
            record_type: RecordTypeMapper::from_hickory(record.record_type()),
            rdata: other
                .to_bytes()
                .map_err(|e| DomainError::Format(format!("rdata of {}: {}", owner, e)))?,
        },
    };

    Ok(ResourceRecord {
        owner,
        class: RecordClass::from_u16(u16::from(record.dns_class())),
        ttl: record.ttl(),
        body,
    })
}
