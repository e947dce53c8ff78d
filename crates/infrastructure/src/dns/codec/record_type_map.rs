//! Mapping between `rootwalk_domain::RecordType` and `hickory_proto::rr::RecordType`.

use hickory_proto::rr::RecordType as HickoryRecordType;
use rootwalk_domain::RecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::NS => HickoryRecordType::NS,
            RecordType::CNAME => HickoryRecordType::CNAME,
            RecordType::SOA => HickoryRecordType::SOA,
            RecordType::PTR => HickoryRecordType::PTR,
            RecordType::MX => HickoryRecordType::MX,
            RecordType::TXT => HickoryRecordType::TXT,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::SRV => HickoryRecordType::SRV,
            RecordType::OPT => HickoryRecordType::OPT,
            RecordType::Other(code) => HickoryRecordType::from(*code),
        }
    }

    /// Never fails: types without a named variant become `RecordType::Other`.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        match hickory_type {
            HickoryRecordType::A => RecordType::A,
            HickoryRecordType::NS => RecordType::NS,
            HickoryRecordType::CNAME => RecordType::CNAME,
            HickoryRecordType::SOA => RecordType::SOA,
            HickoryRecordType::PTR => RecordType::PTR,
            HickoryRecordType::MX => RecordType::MX,
            HickoryRecordType::TXT => RecordType::TXT,
            HickoryRecordType::AAAA => RecordType::AAAA,
            HickoryRecordType::SRV => RecordType::SRV,
            HickoryRecordType::OPT => RecordType::OPT,
            other => RecordType::from_u16(u16::from(other)),
        }
    }
}
