#![allow(dead_code)]

use async_trait::async_trait;
use dns_repeater_application::ports::{DnsResolution, SystemResolver, UpstreamResolver};
use dns_repeater_domain::{DnsName, DnsQuery, DomainError, RecordType};
use hickory_proto::rr::rdata::{A, TXT};
use hickory_proto::rr::{Name, RData, Record};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;

pub fn wire_name(name: &str) -> Name {
    Name::from_str(&format!("{}.", name.trim_end_matches('.'))).unwrap()
}

pub fn a_record(name: &str, ip: &str) -> Record {
    Record::from_rdata(wire_name(name), 300, RData::A(A(ip.parse().unwrap())))
}

pub fn txt_record(name: &str, text: &str) -> Record {
    Record::from_rdata(
        wire_name(name),
        300,
        RData::TXT(TXT::new(vec![text.to_string()])),
    )
}

#[derive(Clone, Default)]
pub struct MockSystemResolver {
    responses: Arc<RwLock<HashMap<String, Result<Vec<Ipv4Addr>, DomainError>>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSystemResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_response(&self, name: &str, ips: &[&str]) {
        let ips = ips.iter().map(|ip| ip.parse().unwrap()).collect();
        self.responses
            .write()
            .await
            .insert(name.to_string(), Ok(ips));
    }

    pub async fn set_response_error(&self, name: &str, error: DomainError) {
        self.responses
            .write()
            .await
            .insert(name.to_string(), Err(error));
    }

    pub async fn set_delay(&self, name: &str, delay: Duration) {
        self.delays.write().await.insert(name.to_string(), delay);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SystemResolver for MockSystemResolver {
    async fn lookup_ipv4(&self, name: &DnsName) -> Result<Vec<Ipv4Addr>, DomainError> {
        let key = name.to_string();
        self.calls.lock().unwrap().push(key.clone());

        let delay = self.delays.read().await.get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .read()
            .await
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(DomainError::NotFound(format!("no such host: {}", key))))
    }
}

#[derive(Clone, Default)]
pub struct MockUpstreamResolver {
    responses: Arc<RwLock<HashMap<(String, RecordType), Result<DnsResolution, DomainError>>>>,
    calls: Arc<Mutex<Vec<DnsQuery>>>,
}

impl MockUpstreamResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_response(&self, name: &str, record_type: RecordType, resolution: DnsResolution) {
        self.responses
            .write()
            .await
            .insert((name.to_string(), record_type), Ok(resolution));
    }

    pub async fn set_response_error(&self, name: &str, record_type: RecordType, error: DomainError) {
        self.responses
            .write()
            .await
            .insert((name.to_string(), record_type), Err(error));
    }

    pub fn calls(&self) -> Vec<DnsQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn forward(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        self.calls.lock().unwrap().push(query.clone());

        let key = (query.name.to_string(), query.record_type);
        self.responses
            .read()
            .await
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(DomainError::NotFound(format!("no mock response for {}", key.0))))
    }
}
