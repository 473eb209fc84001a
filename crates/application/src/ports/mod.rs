mod dns_resolver;
mod system_resolver;

pub use dns_resolver::{to_wire_name, DnsResolution, UpstreamResolver, SYNTHESIZED_TTL};
pub use system_resolver::SystemResolver;

// Re-export for convenience
pub use dns_repeater_domain::DnsQuery;
