use async_trait::async_trait;
use dns_repeater_domain::{DnsName, DomainError};
use std::net::Ipv4Addr;

/// Host lookup the way a local client library performs it, honouring the
/// search list and ndots of the local resolver configuration.
#[async_trait]
pub trait SystemResolver: Send + Sync {
    /// All IPv4 addresses for `name`. An empty list is a valid answer;
    /// a name that does not exist is `DomainError::NotFound`.
    async fn lookup_ipv4(&self, name: &DnsName) -> Result<Vec<Ipv4Addr>, DomainError>;
}
