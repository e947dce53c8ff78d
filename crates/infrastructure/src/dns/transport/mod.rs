pub mod udp;

use async_trait::async_trait;
use rootwalk_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

pub use udp::UdpTransport;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

/// One request/response exchange with a nameserver.
///
/// A transport is shared by every hop of a resolution, so the destination is
/// chosen per call.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        server: SocketAddr,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
