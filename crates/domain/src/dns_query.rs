use crate::{DnsName, RecordClass, RecordType};
use std::fmt;

/// A single question: which records of which type are wanted for a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: DnsName,
    pub record_type: RecordType,
    pub class: RecordClass,
}

impl Question {
    pub fn new(name: DnsName, record_type: RecordType) -> Self {
        Self {
            name,
            record_type,
            class: RecordClass::Internet,
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.record_type)
    }
}
