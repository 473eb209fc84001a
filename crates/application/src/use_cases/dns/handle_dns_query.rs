use crate::events::{ResolutionEvent, ResolutionEventEmitter, ResolutionPath};
use crate::ports::{to_wire_name, DnsResolution, SystemResolver, UpstreamResolver};
use crate::services::SuffixRegistry;
use dns_repeater_domain::{DnsName, DnsQuery, DomainError, RecordType};
use hickory_proto::rr::Name;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// First label of the probe a client sends to reveal its search suffix.
pub const SENTINEL_LABEL: &[u8] = b"hellotelepresence";

pub const DEFAULT_STRIP_TIMEOUT: Duration = Duration::from_secs(1);

/// Resolves queries the way a client inside the target namespace would.
///
/// Pipeline per query: sentinel check, suffix strip (with fallback to the
/// unstripped name), AAAA to A normalization, then system or upstream
/// resolution. Answers are always owned by the name the caller asked.
pub struct HandleDnsQueryUseCase {
    system: Arc<dyn SystemResolver>,
    upstream: Arc<dyn UpstreamResolver>,
    suffix: Arc<SuffixRegistry>,
    events: ResolutionEventEmitter,
    strip_timeout: Duration,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        system: Arc<dyn SystemResolver>,
        upstream: Arc<dyn UpstreamResolver>,
        suffix: Arc<SuffixRegistry>,
    ) -> Self {
        Self {
            system,
            upstream,
            suffix,
            events: ResolutionEventEmitter::new_disabled(),
            strip_timeout: DEFAULT_STRIP_TIMEOUT,
        }
    }

    pub fn with_events(mut self, events: ResolutionEventEmitter) -> Self {
        self.events = events;
        self
    }

    pub fn with_strip_timeout(mut self, timeout: Duration) -> Self {
        self.strip_timeout = timeout;
        self
    }

    pub async fn execute(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        let owner = to_wire_name(&query.name)?;

        if let Some(resolution) = self.check_sentinel(query, &owner) {
            return Ok(resolution);
        }

        if let Some(suffix) = self.suffix.get() {
            if let Some(stripped) = query.name.strip_suffix(&suffix) {
                return self.resolve_stripped(query, stripped, &owner).await;
            }
        }

        self.resolve(query, &owner).await
    }

    fn check_sentinel(&self, query: &DnsQuery, owner: &Name) -> Option<DnsResolution> {
        if query.name.first_label() != Some(SENTINEL_LABEL) {
            return None;
        }

        let candidate = query.name.without_first_label();
        if !self.suffix.is_learned() && self.suffix.try_set(candidate.clone()) {
            info!(suffix = %candidate, "Learned DNS search suffix to filter out");
            self.events
                .emit(ResolutionEvent::SuffixLearned { suffix: candidate.clone() });
        }

        let suffix = self.suffix.get()?;
        if candidate != *suffix {
            return None;
        }

        debug!(domain = %query.name, "Answering sentinel probe");
        self.events.emit(ResolutionEvent::SentinelAnswered {
            name: query.name.clone(),
        });
        Some(DnsResolution::from_addresses(owner, &[Ipv4Addr::LOCALHOST]))
    }

    /// Try the name without the learned suffix under a deadline. If that
    /// fails for any reason, forward the unstripped name upstream. Stripping
    /// happens once; neither leg strips again.
    async fn resolve_stripped(
        &self,
        query: &DnsQuery,
        stripped: DnsName,
        owner: &Name,
    ) -> Result<DnsResolution, DomainError> {
        let stripped_query = query.with_name(stripped);

        debug!(
            record_type = %query.record_type,
            from = %query.name,
            to = %stripped_query.name,
            "Stripped search suffix from query"
        );
        self.events.emit(ResolutionEvent::SuffixStripped {
            original: query.name.clone(),
            stripped: stripped_query.name.clone(),
            record_type: query.record_type,
        });

        let attempt =
            tokio::time::timeout(self.strip_timeout, self.resolve(&stripped_query, owner)).await;

        let error = match attempt {
            Ok(Ok(resolution)) => {
                let stripped_owner = to_wire_name(&stripped_query.name)?;
                return Ok(resolution.reowned(&stripped_owner, owner));
            }
            Ok(Err(e)) => e,
            Err(_) => DomainError::QueryTimeout,
        };

        info!(
            domain = %stripped_query.name,
            error = %error,
            fallback = %query.name,
            "Stripped lookup failed, falling back"
        );
        self.events.emit(ResolutionEvent::FallbackTriggered {
            name: query.name.clone(),
            reason: error.to_string(),
        });

        let fallback_query = match query.record_type {
            RecordType::AAAA => query.with_record_type(RecordType::A),
            _ => query.clone(),
        };
        self.forward_upstream(&fallback_query).await
    }

    async fn resolve(&self, query: &DnsQuery, owner: &Name) -> Result<DnsResolution, DomainError> {
        match query.record_type {
            RecordType::A => self.resolve_system(query, owner).await,
            RecordType::AAAA => {
                // Answering AAAA with nothing makes some clients give up on the
                // name; there is no IPv6 here, so hand back the A records.
                debug!(domain = %query.name, "AAAA query, sending back A instead");
                self.events.emit(ResolutionEvent::TypeNormalized {
                    name: query.name.clone(),
                });
                self.resolve_system(&query.with_record_type(RecordType::A), owner)
                    .await
            }
            RecordType::Other(_) => self.forward_upstream(query).await,
        }
    }

    async fn resolve_system(
        &self,
        query: &DnsQuery,
        owner: &Name,
    ) -> Result<DnsResolution, DomainError> {
        match self.system.lookup_ipv4(&query.name).await {
            Ok(addresses) => {
                info!(domain = %query.name, addresses = ?addresses, "A query resolved");
                self.events.emit(ResolutionEvent::Resolved {
                    name: query.name.clone(),
                    record_type: query.record_type,
                    path: ResolutionPath::System,
                    answers: addresses.len(),
                });
                Ok(DnsResolution::from_addresses(owner, &addresses))
            }
            Err(e) => {
                warn!(domain = %query.name, error = %e, "A query failed");
                self.events.emit(ResolutionEvent::Failed {
                    name: query.name.clone(),
                    record_type: query.record_type,
                    path: ResolutionPath::System,
                    error: e.clone(),
                });
                Err(e)
            }
        }
    }

    async fn forward_upstream(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        debug!(domain = %query.name, record_type = %query.record_type, "Forwarding query upstream");

        match self.upstream.forward(query).await {
            Ok(resolution) => {
                self.events.emit(ResolutionEvent::Resolved {
                    name: query.name.clone(),
                    record_type: query.record_type,
                    path: ResolutionPath::Upstream,
                    answers: resolution.answers.len(),
                });
                Ok(resolution)
            }
            Err(e) => {
                warn!(domain = %query.name, record_type = %query.record_type, error = %e, "Upstream query failed");
                self.events.emit(ResolutionEvent::Failed {
                    name: query.name.clone(),
                    record_type: query.record_type,
                    path: ResolutionPath::Upstream,
                    error: e.clone(),
                });
                Err(e)
            }
        }
    }
}
