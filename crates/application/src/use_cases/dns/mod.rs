pub mod handle_dns_query;

pub use handle_dns_query::{HandleDnsQueryUseCase, DEFAULT_STRIP_TIMEOUT, SENTINEL_LABEL};
