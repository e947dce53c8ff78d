//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). Each exchange uses a fresh
//! ephemeral socket connected to the nameserver, so datagrams from any
//! other source are discarded by the kernel.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use rootwalk_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Large enough for any reply a nameserver sends without EDNS(0), with room to spare.
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

#[derive(Debug, Default, Clone, Copy)]
pub struct UdpTransport;

impl UdpTransport {
    pub fn new() -> Self {
        Self
    }

    fn bind_addr(server: SocketAddr) -> SocketAddr {
        if server.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }

    async fn exchange(server: SocketAddr, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let socket = UdpSocket::bind(Self::bind_addr(server))
            .await
            .map_err(|e| DomainError::Network(format!("Failed to bind UDP socket: {}", e)))?;

        socket.connect(server).await.map_err(|e| {
            DomainError::Network(format!("Failed to connect UDP socket to {}: {}", server, e))
        })?;

        let bytes_sent = socket.send(message_bytes).await.map_err(|e| {
            DomainError::Network(format!("Failed to send UDP query to {}: {}", server, e))
        })?;

        debug!(server = %server, bytes_sent = bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let bytes_received = socket.recv(&mut recv_buf).await.map_err(|e| {
            DomainError::Network(format!(
                "Failed to receive UDP response from {}: {}",
                server, e
            ))
        })?;

        recv_buf.truncate(bytes_received);

        debug!(server = %server, bytes_received = bytes_received, "UDP response received");

        Ok(recv_buf)
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        server: SocketAddr,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bytes = tokio::time::timeout(timeout, Self::exchange(server, message_bytes))
            .await
            .map_err(|_| {
                DomainError::Network(format!("Timeout waiting for UDP response from {}", server))
            })??;

        Ok(TransportResponse {
            bytes,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_matches_family() {
        let v4: SocketAddr = "198.41.0.4:53".parse().unwrap();
        let v6: SocketAddr = "[2001:503:ba3e::2:30]:53".parse().unwrap();
        assert!(UdpTransport::bind_addr(v4).is_ipv4());
        assert!(UdpTransport::bind_addr(v6).is_ipv6());
        assert_eq!(UdpTransport::bind_addr(v4).port(), 0);
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server = silent.local_addr().unwrap();

        let result = UdpTransport::new()
            .send(server, &[0u8; 12], Duration::from_millis(50))
            .await;

        match result {
            Err(DomainError::Network(message)) => assert!(message.contains("Timeout")),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_echo_server_reply_is_returned() {
        let echo = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server = echo.local_addr().unwrap();
        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            if let Ok((len, peer)) = echo.recv_from(&mut buf).await {
                let _ = echo.send_to(&buf[..len], peer).await;
            }
        });

        let response = UdpTransport::new()
            .send(server, b"ping", Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(response.bytes, b"ping");
        assert_eq!(response.protocol_used, "UDP");
    }
}
