use crate::Question;
use std::net::SocketAddr;

/// A question as received from a client.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub question: Question,
    pub client: SocketAddr,
}

impl DnsRequest {
    pub fn new(question: Question, client: SocketAddr) -> Self {
        Self { question, client }
    }
}
