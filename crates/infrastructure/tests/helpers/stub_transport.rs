#![allow(dead_code)]
use async_trait::async_trait;
use rootwalk_domain::{DnsName, DomainError, Message, Question, ResourceRecord, ResponseCode};
use rootwalk_infrastructure::dns::{DnsTransport, TransportResponse, WireCodec};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::Duration;

/// What a scripted nameserver does with a query.
#[derive(Debug, Clone)]
pub enum Scripted {
    Reply {
        rcode: ResponseCode,
        answers: Vec<ResourceRecord>,
        authorities: Vec<ResourceRecord>,
        additionals: Vec<ResourceRecord>,
    },
    /// A well-formed reply carrying the wrong id.
    WrongId,
    /// Never answers; the exchange times out.
    Silent,
    Garbage(Vec<u8>),
}

impl Scripted {
    pub fn answer(answers: Vec<ResourceRecord>) -> Self {
        Self::Reply {
            rcode: ResponseCode::NoError,
            answers,
            authorities: vec![],
            additionals: vec![],
        }
    }

    pub fn referral(authorities: Vec<ResourceRecord>, additionals: Vec<ResourceRecord>) -> Self {
        Self::Reply {
            rcode: ResponseCode::NoError,
            answers: vec![],
            authorities,
            additionals,
        }
    }

    pub fn nxdomain() -> Self {
        Self::Reply {
            rcode: ResponseCode::NXDomain,
            answers: vec![],
            authorities: vec![],
            additionals: vec![],
        }
    }

    pub fn empty() -> Self {
        Self::answer(vec![])
    }
}

/// In-memory nameservers keyed by address. Every exchange goes through the
/// real wire codec in both directions and is recorded.
#[derive(Default)]
pub struct StubTransport {
    by_name: Mutex<HashMap<(SocketAddr, DnsName), Scripted>>,
    by_server: Mutex<HashMap<SocketAddr, Scripted>>,
    exchanges: Mutex<Vec<(SocketAddr, Question)>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, server: SocketAddr, name: &DnsName, scripted: Scripted) -> Self {
        self.by_name
            .lock()
            .unwrap()
            .insert((server, name.clone()), scripted);
        self
    }

    /// Fallback for any name sent to `server`.
    pub fn on_any(self, server: SocketAddr, scripted: Scripted) -> Self {
        self.by_server.lock().unwrap().insert(server, scripted);
        self
    }

    pub fn exchanges(&self) -> Vec<(SocketAddr, Question)> {
        self.exchanges.lock().unwrap().clone()
    }

    pub fn exchange_count(&self) -> usize {
        self.exchanges.lock().unwrap().len()
    }

    fn script_for(&self, server: SocketAddr, name: &DnsName) -> Option<Scripted> {
        let by_name = self.by_name.lock().unwrap();
        if let Some(scripted) = by_name.get(&(server, name.clone())) {
            return Some(scripted.clone());
        }
        self.by_server.lock().unwrap().get(&server).cloned()
    }
}

#[async_trait]
impl DnsTransport for StubTransport {
    async fn send(
        &self,
        server: SocketAddr,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let query = WireCodec::decode(message_bytes).expect("resolver sent undecodable query");
        assert!(!query.recursion_desired, "iterative queries must not ask for recursion");
        let question = query.question().cloned().expect("query without question");
        self.exchanges
            .lock()
            .unwrap()
            .push((server, question.clone()));

        let Some(scripted) = self.script_for(server, &question.name) else {
            return Err(DomainError::Network(format!("{} is unreachable", server)));
        };

        let reply = match scripted {
            Scripted::Reply {
                rcode,
                answers,
                authorities,
                additionals,
            } => {
                let mut reply = Message::reply_to(&query, rcode);
                reply.recursion_available = false;
                reply.answers = answers;
                reply.authorities = authorities;
                reply.additionals = additionals;
                reply
            }
            Scripted::WrongId => {
                let mut reply = Message::reply_to(&query, ResponseCode::NoError);
                reply.id = query.id.wrapping_add(1);
                reply.answers = vec![ResourceRecord::a(
                    question.name.clone(),
                    60,
                    [203, 0, 113, 66].into(),
                )];
                reply
            }
            Scripted::Silent => {
                tokio::time::sleep(timeout).await;
                return Err(DomainError::Network(format!(
                    "Timeout waiting for UDP response from {}",
                    server
                )));
            }
            Scripted::Garbage(bytes) => {
                return Ok(TransportResponse {
                    bytes,
                    protocol_used: "STUB",
                })
            }
        };

        Ok(TransportResponse {
            bytes: WireCodec::encode(&reply).expect("scripted reply must encode"),
            protocol_used: "STUB",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "STUB"
    }
}
