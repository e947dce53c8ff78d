use crate::dns::codec::{WireCodec, MAX_UDP_PAYLOAD};
use rootwalk_application::use_cases::{HandleDnsQueryUseCase, QueryOutcome};
use rootwalk_domain::{DnsRequest, Message, ResponseCode};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Turns one request datagram into at most one reply datagram.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// `None` means nothing is sent back: undecodable input, a message that
    /// is itself a response or has no question, or a resolution that failed
    /// upstream.
    pub async fn handle_datagram(&self, bytes: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let request = match WireCodec::decode(bytes) {
            Ok(message) => message,
            Err(e) => {
                warn!(client = %client, error = %e, "Dropping undecodable query");
                return None;
            }
        };

        if request.is_response {
            debug!(client = %client, id = request.id, "Dropping datagram flagged as a response");
            return None;
        }

        let Some(question) = request.question().cloned() else {
            debug!(client = %client, id = request.id, "Dropping query without a question");
            return None;
        };

        let outcome = self
            .use_case
            .execute(&DnsRequest::new(question, client))
            .await;

        let response = match outcome {
            QueryOutcome::Answer(resolution) => {
                let mut response = Message::reply_to(&request, ResponseCode::NoError);
                response.answers = resolution.answer_section();
                response
            }
            QueryOutcome::NameError => Message::reply_to(&request, ResponseCode::NXDomain),
            QueryOutcome::NotImplemented => Message::reply_to(&request, ResponseCode::NotImp),
            QueryOutcome::Drop(_) => return None,
        };

        Self::encode_reply(response, client)
    }

    /// Encodes a reply, falling back to an empty truncated one when the
    /// answers do not fit a plain UDP payload.
    fn encode_reply(mut response: Message, client: SocketAddr) -> Option<Vec<u8>> {
        let bytes = match WireCodec::encode(&response) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(client = %client, error = %e, "Failed to encode reply");
                return None;
            }
        };

        if bytes.len() <= MAX_UDP_PAYLOAD {
            return Some(bytes);
        }

        debug!(client = %client, size = bytes.len(), "Reply too large, sending truncated");
        response.truncated = true;
        response.answers.clear();
        match WireCodec::encode(&response) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(client = %client, error = %e, "Failed to encode truncated reply");
                None
            }
        }
    }
}
