#![allow(dead_code)]
use async_trait::async_trait;
use dns_repeater_application::ports::SystemResolver;
use dns_repeater_domain::{DnsName, DomainError};
use std::collections::HashMap;
use std::net::Ipv4Addr;

/// System resolver backed by a fixed host table.
#[derive(Default)]
pub struct StaticSystemResolver {
    hosts: HashMap<String, Vec<Ipv4Addr>>,
}

impl StaticSystemResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, name: &str, ip: Ipv4Addr) -> Self {
        self.hosts.entry(name.to_string()).or_default().push(ip);
        self
    }
}

#[async_trait]
impl SystemResolver for StaticSystemResolver {
    async fn lookup_ipv4(&self, name: &DnsName) -> Result<Vec<Ipv4Addr>, DomainError> {
        let key = name.to_string();
        self.hosts
            .get(&key)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("no such host: {}", key)))
    }
}
