use crate::dns::record_type_map::RecordTypeMapper;
use async_trait::async_trait;
use dns_repeater_application::ports::{to_wire_name, DnsResolution, UpstreamResolver};
use dns_repeater_domain::{DnsQuery, DomainError};
use hickory_resolver::config::{ResolverConfig, ResolverOpts, ServerOrderingStrategy};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::{ResolveError, Resolver};
use tracing::debug;

/// Recursive resolver configured from the local resolver configuration.
///
/// Nameservers are tried one at a time in the order they are listed,
/// for `attempts` rounds. Nothing is cached.
pub struct ResolvConfUpstream {
    resolver: Resolver<TokioConnectionProvider>,
}

impl ResolvConfUpstream {
    pub fn new(config: ResolverConfig, mut opts: ResolverOpts) -> Self {
        opts.cache_size = 0;
        opts.num_concurrent_reqs = 1;
        opts.server_ordering_strategy = ServerOrderingStrategy::UserProvidedOrder;
        opts.preserve_intermediates = true;

        let resolver = Resolver::builder_with_config(config, TokioConnectionProvider::default())
            .with_options(opts)
            .build();

        Self { resolver }
    }
}

fn map_resolve_error(domain: &str, error: ResolveError) -> Result<DnsResolution, DomainError> {
    if error.is_nx_domain() {
        return Err(DomainError::NotFound(format!("{}: {}", domain, error)));
    }
    if error.is_no_records_found() {
        // NODATA: the name exists, there is just nothing of this type.
        return Ok(DnsResolution::default());
    }
    Err(DomainError::UpstreamFailure(format!("{}: {}", domain, error)))
}

#[async_trait]
impl UpstreamResolver for ResolvConfUpstream {
    async fn forward(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        let domain = query.name.to_string();
        // Fully qualified, so resolv.conf's search list is not applied a
        // second time.
        let name = to_wire_name(&query.name)?;
        let record_type = RecordTypeMapper::to_hickory(&query.record_type);

        let lookup = self.resolver.lookup(name, record_type);
        let result = match query.timeout {
            Some(timeout) => tokio::time::timeout(timeout, lookup)
                .await
                .map_err(|_| DomainError::UpstreamFailure(format!("{}: query timed out", domain)))?,
            None => lookup.await,
        };

        match result {
            Ok(lookup) => {
                debug!(
                    domain = %domain,
                    record_type = %query.record_type,
                    answers = lookup.records().len(),
                    "Upstream query succeeded"
                );
                Ok(DnsResolution::new(lookup.records().to_vec()))
            }
            Err(e) => map_resolve_error(&domain, e),
        }
    }
}
