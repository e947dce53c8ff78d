mod dns_resolver;

pub use dns_resolver::{DnsResolver, Resolution};

// Re-export for convenience
pub use rootwalk_domain::Question;
