mod record;
mod record_type;

pub use record::{min_ttl, RecordBody, RecordClass, ResourceRecord};
pub use record_type::RecordType;
