use async_trait::async_trait;
use dns_repeater_application::ports::SystemResolver;
use dns_repeater_domain::{DnsName, DomainError};
use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

/// Resolves names with the platform resolver (`getaddrinfo`), so the search
/// list and ndots from `/etc/resolv.conf` and `/etc/hosts` apply exactly as
/// for any local process.
///
/// Each lookup blocks a thread. At most `max_in_flight` run at once; the
/// rest wait for a permit instead of being dropped.
pub struct BlockingSystemResolver {
    permits: Arc<Semaphore>,
    max_in_flight: usize,
}

impl BlockingSystemResolver {
    pub fn new(max_in_flight: usize) -> Self {
        let max_in_flight = max_in_flight.max(1);
        Self {
            permits: Arc::new(Semaphore::new(max_in_flight)),
            max_in_flight,
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    pub fn available_workers(&self) -> usize {
        self.permits.available_permits()
    }
}

#[async_trait]
impl SystemResolver for BlockingSystemResolver {
    async fn lookup_ipv4(&self, name: &DnsName) -> Result<Vec<Ipv4Addr>, DomainError> {
        let host = name.to_string();

        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| DomainError::NotFound(format!("{}: {}", host, e)))?;

        let lookup_host = host.clone();
        let result = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            lookup_blocking(&lookup_host)
        })
        .await
        .map_err(|e| DomainError::NotFound(format!("{}: resolver worker failed: {}", host, e)))?;

        match &result {
            Ok(addrs) => debug!(domain = %host, addresses = ?addrs, "System lookup finished"),
            Err(e) => debug!(domain = %host, error = %e, "System lookup failed"),
        }
        result
    }
}

fn lookup_blocking(host: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
    let addrs = (host, 0u16)
        .to_socket_addrs()
        .map_err(|e| DomainError::NotFound(format!("no such host: {}: {}", host, e)))?;

    let mut ipv4 = Vec::new();
    for addr in addrs {
        if let IpAddr::V4(ip) = addr.ip() {
            if !ipv4.contains(&ip) {
                ipv4.push(ip);
            }
        }
    }
    Ok(ipv4)
}
