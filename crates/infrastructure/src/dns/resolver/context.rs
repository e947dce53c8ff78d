use rootwalk_domain::{DnsName, DomainError};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// State shared by one top-level resolution and every nested nameserver
/// lookup it triggers: the iteration budget, the deadline and cancellation.
#[derive(Debug)]
pub struct ResolutionContext {
    limit: u32,
    used: u32,
    deadline: Instant,
    cancel: CancellationToken,
}

impl ResolutionContext {
    pub fn new(limit: u32, timeout: Duration, cancel: CancellationToken) -> Self {
        Self {
            limit,
            used: 0,
            deadline: Instant::now() + timeout,
            cancel,
        }
    }

    /// Takes one iteration from the budget before a query (or a cached
    /// alias hop) is made on behalf of `name`.
    pub fn consume_iteration(&mut self, name: &DnsName) -> Result<(), DomainError> {
        self.check_live(name)?;
        if self.used >= self.limit {
            return Err(DomainError::ResolutionLoopExceeded {
                name: name.clone(),
                limit: self.limit,
            });
        }
        self.used += 1;
        Ok(())
    }

    pub fn iterations_used(&self) -> u32 {
        self.used
    }

    /// Time budget for the next round-trip: the per-query timeout, cut short
    /// by whatever is left before the deadline.
    pub fn exchange_timeout(
        &self,
        query_timeout: Duration,
        name: &DnsName,
    ) -> Result<Duration, DomainError> {
        self.check_live(name)?;
        Ok(query_timeout.min(self.time_left()))
    }

    pub fn time_left(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn deadline_passed(&self) -> bool {
        Instant::now() >= self.deadline
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    fn check_live(&self, name: &DnsName) -> Result<(), DomainError> {
        if self.cancel.is_cancelled() {
            return Err(DomainError::Cancelled);
        }
        if self.deadline_passed() {
            return Err(DomainError::DeadlineExceeded(name.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name() -> DnsName {
        DnsName::parse("example.com.").unwrap()
    }

    #[test]
    fn test_budget_allows_exactly_limit_iterations() {
        let mut ctx = ResolutionContext::new(3, Duration::from_secs(5), CancellationToken::new());

        for _ in 0..3 {
            ctx.consume_iteration(&name()).unwrap();
        }

        assert_eq!(ctx.iterations_used(), 3);
        assert!(matches!(
            ctx.consume_iteration(&name()),
            Err(DomainError::ResolutionLoopExceeded { limit: 3, .. })
        ));
    }

    #[test]
    fn test_cancelled_context_refuses_work() {
        let token = CancellationToken::new();
        let mut ctx = ResolutionContext::new(10, Duration::from_secs(5), token.clone());
        token.cancel();

        assert_eq!(ctx.consume_iteration(&name()), Err(DomainError::Cancelled));
    }

    #[test]
    fn test_expired_deadline_is_reported() {
        let ctx = ResolutionContext::new(10, Duration::ZERO, CancellationToken::new());

        assert!(matches!(
            ctx.exchange_timeout(Duration::from_secs(2), &name()),
            Err(DomainError::DeadlineExceeded(_))
        ));
    }

    #[test]
    fn test_exchange_timeout_is_capped_by_query_timeout() {
        let ctx = ResolutionContext::new(10, Duration::from_secs(60), CancellationToken::new());
        let timeout = ctx
            .exchange_timeout(Duration::from_millis(500), &name())
            .unwrap();
        assert_eq!(timeout, Duration::from_millis(500));
    }
}
