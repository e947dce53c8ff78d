use super::server::DnsServerHandler;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const MIN_RECV_BUFFER: usize = 512;

/// Receive loop for the query socket: one task per datagram, replies sent
/// back to the source address.
pub struct UdpListener {
    socket: Arc<UdpSocket>,
    recv_buffer_size: usize,
}

impl UdpListener {
    pub fn new(socket: UdpSocket, recv_buffer_size: usize) -> Self {
        Self {
            socket: Arc::new(socket),
            recv_buffer_size: recv_buffer_size.max(MIN_RECV_BUFFER),
        }
    }

    pub async fn bind(addr: SocketAddr, recv_buffer_size: usize) -> io::Result<Self> {
        Ok(Self::new(UdpSocket::bind(addr).await?, recv_buffer_size))
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Runs until `shutdown` fires (`Ok`) or the socket fails for good (`Err`).
    /// Per-datagram problems are logged and never stop the loop.
    pub async fn serve(
        self,
        handler: Arc<DnsServerHandler>,
        shutdown: CancellationToken,
    ) -> io::Result<()> {
        let mut recv_buf = vec![0u8; self.recv_buffer_size];

        info!(
            local_addr = ?self.socket.local_addr().ok(),
            recv_buffer_size = self.recv_buffer_size,
            "UDP listener ready"
        );

        loop {
            let received = tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("UDP listener: shutting down");
                    return Ok(());
                }
                received = self.socket.recv_from(&mut recv_buf) => received,
            };

            let (len, peer) = match received {
                Ok(received) => received,
                Err(e) if is_transient(&e) => {
                    debug!(error = %e, "Transient UDP receive error");
                    continue;
                }
                Err(e) => {
                    error!(error = %e, "UDP receive failed, stopping listener");
                    return Err(e);
                }
            };

            let datagram: Arc<[u8]> = Arc::from(&recv_buf[..len]);
            let handler = Arc::clone(&handler);
            let socket = Arc::clone(&self.socket);

            tokio::spawn(async move {
                if let Some(reply) = handler.handle_datagram(&datagram, peer).await {
                    if let Err(e) = socket.send_to(&reply, peer).await {
                        warn!(client = %peer, error = %e, "Failed to send reply");
                    }
                }
            });
        }
    }
}

// ICMP errors from earlier replies surface on the next recv on some platforms.
fn is_transient(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionRefused
    )
}
