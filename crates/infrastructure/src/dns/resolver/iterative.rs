use super::context::ResolutionContext;
use super::referral::{referral_candidates, NextHop};
use crate::dns::cache::{CacheKey, DnsCache};
use crate::dns::codec::WireCodec;
use crate::dns::transport::DnsTransport;
use async_trait::async_trait;
use futures::future::BoxFuture;
use rootwalk_application::ports::{DnsResolver, Resolution};
use rootwalk_domain::{
    DnsName, DomainError, Message, Question, RecordBody, RecordType, ResolverConfig,
    ResourceRecord, ResponseCode,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Resolves names by walking referrals down from the root servers, one
/// non-recursive query per step.
pub struct IterativeResolver {
    // non-empty, checked in `new`
    root_servers: Vec<SocketAddr>,
    upstream_port: u16,
    max_iterations: u32,
    query_timeout: Duration,
    resolve_deadline: Duration,
    verify_responses: bool,
    transport: Arc<dyn DnsTransport>,
    cache: Option<Arc<DnsCache>>,
    shutdown: CancellationToken,
}

impl IterativeResolver {
    pub fn new(
        config: &ResolverConfig,
        transport: Arc<dyn DnsTransport>,
    ) -> Result<Self, DomainError> {
        if config.root_servers.is_empty() {
            return Err(DomainError::ConfigError(
                "No root servers configured".to_string(),
            ));
        }

        info!(
            roots = config.root_servers.len(),
            max_iterations = config.max_iterations,
            query_timeout_ms = config.query_timeout_ms,
            transport = transport.protocol_name(),
            "Iterative resolver created"
        );

        Ok(Self {
            root_servers: config.root_servers.clone(),
            upstream_port: config.upstream_port,
            max_iterations: config.max_iterations,
            query_timeout: Duration::from_millis(config.query_timeout_ms),
            resolve_deadline: Duration::from_millis(config.resolve_deadline_ms),
            verify_responses: config.verify_responses,
            transport,
            cache: None,
            shutdown: CancellationToken::new(),
        })
    }

    pub fn with_cache(mut self, cache: Arc<DnsCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// In-flight resolutions fail with `Cancelled` once `token` fires.
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn new_context(&self) -> ResolutionContext {
        ResolutionContext::new(
            self.max_iterations,
            self.resolve_deadline,
            self.shutdown.child_token(),
        )
    }

    pub async fn resolve_name(
        &self,
        name: &DnsName,
        record_type: RecordType,
    ) -> Result<Resolution, DomainError> {
        let mut ctx = self.new_context();
        let result = self.resolve_with(name.clone(), record_type, &mut ctx).await;

        debug!(
            domain = %name,
            record_type = %record_type,
            iterations = ctx.iterations_used(),
            ok = result.is_ok(),
            "Resolution finished"
        );

        result
    }

    /// Resolves within an existing context, so nested nameserver lookups
    /// draw on the caller's budget and deadline.
    pub fn resolve_with<'a>(
        &'a self,
        name: DnsName,
        record_type: RecordType,
        ctx: &'a mut ResolutionContext,
    ) -> BoxFuture<'a, Result<Resolution, DomainError>> {
        Box::pin(async move {
            let mut name = name;
            let mut aliases = Vec::new();
            let mut used_network = false;

            'names: loop {
                if let Some(records) =
                    self.follow_cached(&mut name, record_type, &mut aliases, ctx)?
                {
                    return Ok(Resolution::new(records, !used_network).with_aliases(aliases));
                }

                let mut target = self.root_servers[0];
                loop {
                    ctx.consume_iteration(&name)?;
                    let mut response = self.exchange(target, &name, record_type, ctx).await?;
                    used_network = true;

                    if !response.answers.is_empty() {
                        let answers = std::mem::take(&mut response.answers);
                        self.store(&name, record_type, &answers);

                        if let Some(next) = alias_target(&answers, record_type) {
                            debug!(alias = %name, target = %next, "Following CNAME from the roots");
                            aliases.push(answers[0].clone());
                            name = next;
                            continue 'names;
                        }
                        return Ok(Resolution::new(answers, false).with_aliases(aliases));
                    }

                    if response.response_code == ResponseCode::NXDomain
                        || response.authorities.is_empty()
                    {
                        return Err(DomainError::NotFound(name));
                    }

                    target = self.next_hop(&response, &name, ctx).await?;
                }
            }
        })
    }

    /// Serves `name` from the cache, chasing cached aliases. Each alias hop
    /// costs an iteration. `Ok(None)` means the current `name` must go to the
    /// network.
    fn follow_cached(
        &self,
        name: &mut DnsName,
        record_type: RecordType,
        aliases: &mut Vec<ResourceRecord>,
        ctx: &mut ResolutionContext,
    ) -> Result<Option<Vec<ResourceRecord>>, DomainError> {
        let Some(cache) = &self.cache else {
            return Ok(None);
        };

        loop {
            let now = Instant::now();
            let Some(entry) = cache.get_at(&CacheKey::new(name.clone(), record_type), now) else {
                return Ok(None);
            };
            let records = entry.records_at(now);

            match alias_target(&records, record_type) {
                Some(next) => {
                    ctx.consume_iteration(name)?;
                    debug!(alias = %name, target = %next, "Following cached CNAME");
                    aliases.push(records[0].clone());
                    *name = next;
                }
                None => {
                    debug!(domain = %name, record_type = %record_type, "Cache hit");
                    return Ok(Some(records));
                }
            }
        }
    }

    async fn exchange(
        &self,
        target: SocketAddr,
        name: &DnsName,
        record_type: RecordType,
        ctx: &ResolutionContext,
    ) -> Result<Message, DomainError> {
        let query = Message::query(fastrand::u16(..), Question::new(name.clone(), record_type));
        let bytes = WireCodec::encode(&query)?;
        let timeout = ctx.exchange_timeout(self.query_timeout, name)?;

        debug!(
            server = %target,
            domain = %name,
            record_type = %record_type,
            iteration = ctx.iterations_used(),
            "Querying nameserver"
        );

        let reply = tokio::select! {
            biased;
            _ = ctx.cancel_token().cancelled() => return Err(DomainError::Cancelled),
            reply = self.transport.send(target, &bytes, timeout) => reply,
        };

        let reply = match reply {
            Ok(reply) => reply,
            Err(DomainError::Network(_)) if ctx.deadline_passed() => {
                return Err(DomainError::DeadlineExceeded(name.clone()))
            }
            Err(e) => return Err(e),
        };

        debug!(
            server = %target,
            protocol = reply.protocol_used,
            size = reply.bytes.len(),
            "Reply received"
        );

        let response = WireCodec::decode(&reply.bytes)?;

        if self.verify_responses && !response.answers_query(&query) {
            return Err(DomainError::Format(format!(
                "reply from {} does not match query {} for {}",
                target, query.id, name
            )));
        }

        if response.truncated {
            debug!(server = %target, domain = %name, "Truncated reply, using what arrived");
        }

        Ok(response)
    }

    /// Picks the next server from a referral. Nameservers without glue are
    /// resolved in turn; a failed lookup moves on to the next candidate unless
    /// the shared budget is gone.
    async fn next_hop(
        &self,
        response: &Message,
        name: &DnsName,
        ctx: &mut ResolutionContext,
    ) -> Result<SocketAddr, DomainError> {
        for hop in referral_candidates(response) {
            match hop {
                NextHop::Glue(address) => {
                    debug!(domain = %name, nameserver = %address, "Following referral with glue");
                    return Ok(SocketAddr::from((address, self.upstream_port)));
                }
                NextHop::Glueless(nameserver) => {
                    debug!(domain = %name, nameserver = %nameserver, "Resolving glueless nameserver");

                    match self
                        .resolve_with(nameserver.clone(), RecordType::A, ctx)
                        .await
                    {
                        Ok(resolution) => {
                            if let Some(address) = resolution.addresses().next() {
                                return Ok(SocketAddr::from((address, self.upstream_port)));
                            }
                            debug!(nameserver = %nameserver, "Nameserver has no address records");
                        }
                        Err(e) if e.is_budget_exhausted() => return Err(e),
                        Err(e) => {
                            debug!(
                                nameserver = %nameserver,
                                error = %e,
                                "Nameserver lookup failed, trying next candidate"
                            );
                        }
                    }
                }
            }
        }

        Err(DomainError::NextHopNotFound(name.clone()))
    }

    fn store(&self, name: &DnsName, record_type: RecordType, answers: &[ResourceRecord]) {
        if let Some(cache) = &self.cache {
            cache.insert_resources(CacheKey::new(name.clone(), record_type), answers.to_vec());
        }
    }
}

/// The CNAME target to chase when the first record of an answer set is an
/// alias. A CNAME question is answered by the alias itself.
fn alias_target(records: &[ResourceRecord], record_type: RecordType) -> Option<DnsName> {
    if record_type == RecordType::CNAME {
        return None;
    }
    match records.first().map(|record| &record.body) {
        Some(RecordBody::Cname(target)) => Some(target.clone()),
        _ => None,
    }
}

#[async_trait]
impl DnsResolver for IterativeResolver {
    async fn resolve(&self, question: &Question) -> Result<Resolution, DomainError> {
        self.resolve_name(&question.name, question.record_type)
            .await
    }
}
