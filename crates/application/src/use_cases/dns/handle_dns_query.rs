use crate::ports::{DnsResolver, Resolution};
use rootwalk_domain::{DnsRequest, DomainError, Question};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// What the server should do with a decoded query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Reply NOERROR with these records.
    Answer(Resolution),
    /// Reply NXDOMAIN.
    NameError,
    /// Reply NOTIMP; the resolver was not consulted.
    NotImplemented,
    /// Send nothing. Upstream trouble is not reported as a missing name.
    Drop(DomainError),
}

impl QueryOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            QueryOutcome::Answer(_) => "NOERROR",
            QueryOutcome::NameError => "NXDOMAIN",
            QueryOutcome::NotImplemented => "NOTIMP",
            QueryOutcome::Drop(_) => "DROPPED",
        }
    }
}

pub struct HandleDnsQueryUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl HandleDnsQueryUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    pub async fn execute(&self, request: &DnsRequest) -> QueryOutcome {
        let start = Instant::now();
        let question = &request.question;

        let result = match Self::ensure_resolvable(question) {
            Ok(()) => self.resolver.resolve(question).await,
            Err(e) => Err(e),
        };

        let outcome = match result {
            Ok(resolution) => QueryOutcome::Answer(resolution),
            Err(DomainError::UnsupportedType(record_type)) => {
                debug!(
                    domain = %question.name,
                    record_type = %record_type,
                    client = %request.client,
                    "Record type not supported"
                );
                QueryOutcome::NotImplemented
            }
            Err(e) if e.is_name_error() => {
                debug!(domain = %question.name, error = %e, "Name could not be resolved");
                QueryOutcome::NameError
            }
            Err(e) => {
                warn!(domain = %question.name, error = %e, "Resolution failed, not replying");
                QueryOutcome::Drop(e)
            }
        };

        info!(
            domain = %question.name,
            record_type = %question.record_type,
            client = %request.client,
            status = outcome.status(),
            cache_hit = matches!(&outcome, QueryOutcome::Answer(r) if r.cache_hit),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Query handled"
        );

        outcome
    }

    fn ensure_resolvable(question: &Question) -> Result<(), DomainError> {
        if question.record_type.is_resolvable() {
            Ok(())
        } else {
            Err(DomainError::UnsupportedType(question.record_type))
        }
    }
}
