use rootwalk_domain::config::ServerConfig;
use rootwalk_infrastructure::dns::{DnsServerHandler, UdpListener};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Serves DNS over UDP until `shutdown` fires or the socket fails.
pub async fn start_dns_server(
    config: &ServerConfig,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = config.listen_addr().parse()?;

    info!(bind_address = %socket_addr, "Starting DNS server");

    let socket = create_udp_socket(socket_addr, config.recv_buffer_size)?;
    let listener = UdpListener::new(socket, config.recv_buffer_size);
    listener.serve(handler, shutdown).await?;

    info!("DNS server stopped");
    Ok(())
}

fn create_udp_socket(socket_addr: SocketAddr, recv_buffer_size: usize) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    // kernel buffer room for bursts; the application buffer holds one datagram
    socket.set_recv_buffer_size(recv_buffer_size.max(256 * 1024))?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
