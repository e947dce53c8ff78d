use rootwalk_application::use_cases::HandleDnsQueryUseCase;
use rootwalk_domain::{Message, Question, RecordBody, RecordType, ResponseCode};
use rootwalk_infrastructure::dns::cache::DnsCache;
use rootwalk_infrastructure::dns::{
    DnsServerHandler, IterativeResolver, UdpListener, UdpTransport, WireCodec,
};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;

mod helpers;
use helpers::{name, MockDnsServer, ResolverConfigBuilder};

#[tokio::test]
async fn test_query_over_udp_is_resolved_through_mock_root() {
    let root = MockDnsServer::start(Ipv4Addr::new(93, 184, 216, 34), 300)
        .await
        .unwrap();
    let config = ResolverConfigBuilder::new()
        .roots(vec![root.addr()])
        .query_timeout_ms(1_000)
        .build();
    let resolver = IterativeResolver::new(&config, Arc::new(UdpTransport::new()))
        .unwrap()
        .with_cache(Arc::new(DnsCache::new(4)));
    let handler = Arc::new(DnsServerHandler::new(Arc::new(HandleDnsQueryUseCase::new(
        Arc::new(resolver),
    ))));

    let listener = UdpListener::bind("127.0.0.1:0".parse().unwrap(), 4096)
        .await
        .unwrap();
    let listen_addr = listener.local_addr().unwrap();
    let shutdown = CancellationToken::new();
    let serving = tokio::spawn(listener.serve(handler, shutdown.clone()));

    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let mut query = Message::query(0xABCD, Question::new(name("example.com."), RecordType::A));
    query.recursion_desired = true;
    client
        .send_to(&WireCodec::encode(&query).unwrap(), listen_addr)
        .await
        .unwrap();

    let mut buf = vec![0u8; 512];
    let (len, _) = tokio::time::timeout(Duration::from_secs(3), client.recv_from(&mut buf))
        .await
        .expect("listener did not reply")
        .unwrap();
    let reply = WireCodec::decode(&buf[..len]).unwrap();

    assert_eq!(reply.id, 0xABCD);
    assert_eq!(reply.response_code, ResponseCode::NoError);
    assert!(reply.recursion_available);
    assert_eq!(
        reply.answers[0].body,
        RecordBody::A(Ipv4Addr::new(93, 184, 216, 34))
    );

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(1), serving)
        .await
        .expect("listener did not stop")
        .unwrap()
        .unwrap();
    root.shutdown();
}

#[tokio::test]
async fn test_malformed_datagram_gets_no_reply_and_listener_survives() {
    let root = MockDnsServer::start(Ipv4Addr::new(192, 0, 2, 1), 60)
        .await
        .unwrap();
    let config = ResolverConfigBuilder::new().roots(vec![root.addr()]).build();
    let resolver = IterativeResolver::new(&config, Arc::new(UdpTransport::new())).unwrap();
    let handler = Arc::new(DnsServerHandler::new(Arc::new(HandleDnsQueryUseCase::new(
        Arc::new(resolver),
    ))));
    let listener = UdpListener::bind("127.0.0.1:0".parse().unwrap(), 4096)
        .await
        .unwrap();
    let listen_addr = listener.local_addr().unwrap();
    let shutdown = CancellationToken::new();
    tokio::spawn(listener.serve(handler, shutdown.clone()));

    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    client.send_to(&[0xde, 0xad], listen_addr).await.unwrap();

    let mut buf = vec![0u8; 512];
    let silent = tokio::time::timeout(Duration::from_millis(200), client.recv_from(&mut buf)).await;
    assert!(silent.is_err(), "malformed input must not be answered");

    let query = Message::query(7, Question::new(name("example.org."), RecordType::A));
    client
        .send_to(&WireCodec::encode(&query).unwrap(), listen_addr)
        .await
        .unwrap();
    let (len, _) = tokio::time::timeout(Duration::from_secs(3), client.recv_from(&mut buf))
        .await
        .expect("listener stopped answering")
        .unwrap();
    assert_eq!(WireCodec::decode(&buf[..len]).unwrap().id, 7);

    shutdown.cancel();
}
