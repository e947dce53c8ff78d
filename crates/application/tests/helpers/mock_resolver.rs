#![allow(dead_code)]

use async_trait::async_trait;
use rootwalk_application::ports::{DnsResolver, Resolution};
use rootwalk_domain::{DnsName, DomainError, Question};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct MockDnsResolver {
    responses: Mutex<HashMap<DnsName, Resolution>>,
    error_responses: Mutex<HashMap<DnsName, DomainError>>,
    calls: AtomicUsize,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            error_responses: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_response(&self, domain: &str, resolution: Resolution) {
        self.responses
            .lock()
            .unwrap()
            .insert(DnsName::parse(domain).unwrap(), resolution);
    }

    pub fn set_response_error(&self, domain: &str, error: DomainError) {
        self.error_responses
            .lock()
            .unwrap()
            .insert(DnsName::parse(domain).unwrap(), error);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, question: &Question) -> Result<Resolution, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = self.error_responses.lock().unwrap().get(&question.name).cloned() {
            return Err(err);
        }

        self.responses
            .lock()
            .unwrap()
            .get(&question.name)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(question.name.clone()))
    }
}
