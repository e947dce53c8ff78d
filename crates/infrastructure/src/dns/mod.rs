pub mod cache;
pub mod codec;
pub mod listener;
pub mod local_records;
pub mod resolver;
pub mod server;
pub mod transport;

pub use cache::DnsCache;
pub use codec::WireCodec;
pub use listener::UdpListener;
pub use local_records::LocalRecordStore;
pub use resolver::IterativeResolver;
pub use server::DnsServerHandler;
pub use transport::{DnsTransport, TransportResponse, UdpTransport};
