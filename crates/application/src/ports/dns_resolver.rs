use async_trait::async_trait;
use dns_repeater_domain::{DnsName, DnsQuery, DomainError};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record};
use std::net::{IpAddr, Ipv4Addr};

/// Answers synthesized by the resolver are never cached downstream.
pub const SYNTHESIZED_TTL: u32 = 0;

/// The sections of a DNS answer produced for one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DnsResolution {
    pub answers: Vec<Record>,
    /// Records from the AUTHORITY section of the upstream response (e.g. SOA for NODATA).
    pub authority: Vec<Record>,
    pub additional: Vec<Record>,
}

impl DnsResolution {
    pub fn new(answers: Vec<Record>) -> Self {
        Self {
            answers,
            authority: vec![],
            additional: vec![],
        }
    }

    /// One A record per address, all owned by `owner`.
    pub fn from_addresses(owner: &Name, addresses: &[Ipv4Addr]) -> Self {
        let answers = addresses
            .iter()
            .map(|ip| Record::from_rdata(owner.clone(), SYNTHESIZED_TTL, RData::A(A(*ip))))
            .collect();
        Self::new(answers)
    }

    pub fn addresses(&self) -> Vec<IpAddr> {
        self.answers
            .iter()
            .filter_map(|record| match record.data() {
                RData::A(a) => Some(IpAddr::V4(a.0)),
                RData::AAAA(aaaa) => Some(IpAddr::V6(aaaa.0)),
                _ => None,
            })
            .collect()
    }

    /// Give answer records owned by `from` to `to`. Records owned by other
    /// names (CNAME targets and the like) are left alone.
    pub fn reowned(mut self, from: &Name, to: &Name) -> Self {
        for record in &mut self.answers {
            if record.name() == from {
                record.set_name(to.clone());
            }
        }
        self
    }
}

/// Convert a label sequence into a fully qualified wire name.
pub fn to_wire_name(name: &DnsName) -> Result<Name, DomainError> {
    Name::from_labels(name.labels().iter().map(|l| &l[..]))
        .map_err(|e| DomainError::InvalidDomainName(format!("{}: {}", name, e)))
}

/// Standard recursive resolver used for everything the pipeline does not
/// special-case. Results and errors are passed back without reinterpretation.
#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    async fn forward(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError>;
}
