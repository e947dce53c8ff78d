use crate::{DnsName, RecordType};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed DNS message: {0}")]
    Format(String),

    #[error("Could not resolve {0}: no answers and no authorities")]
    NotFound(DnsName),

    #[error("Could not find next nameserver to query for {0}")]
    NextHopNotFound(DnsName),

    #[error("Resolution of {name} exceeded {limit} iterations")]
    ResolutionLoopExceeded { name: DnsName, limit: u32 },

    #[error("Record type {0} is not supported")]
    UnsupportedType(RecordType),

    #[error("Resolution deadline exceeded for {0}")]
    DeadlineExceeded(DnsName),

    #[error("Resolution cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// True for failures that mean the name itself could not be resolved,
    /// as opposed to trouble reaching or understanding upstream servers.
    pub fn is_name_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::NextHopNotFound(_) | Self::ResolutionLoopExceeded { .. }
        )
    }

    /// True when the shared resolution budget or deadline is spent, so trying
    /// another nameserver candidate cannot succeed either.
    pub fn is_budget_exhausted(&self) -> bool {
        matches!(
            self,
            Self::ResolutionLoopExceeded { .. } | Self::DeadlineExceeded(_) | Self::Cancelled
        )
    }
}
