//! rootwalk domain layer
pub mod config;
pub mod dns_message;
pub mod dns_name;
pub mod dns_query;
pub mod dns_record;
pub mod dns_request;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError, ResolverConfig, ResolverMode};
pub use dns_message::{Message, OpCode, ResponseCode};
pub use dns_name::DnsName;
pub use dns_query::Question;
pub use dns_record::{min_ttl, RecordBody, RecordClass, RecordType, ResourceRecord};
pub use dns_request::DnsRequest;
pub use errors::DomainError;
