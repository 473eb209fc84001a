pub mod dns;

pub use dns::{HandleDnsQueryUseCase, DEFAULT_STRIP_TIMEOUT, SENTINEL_LABEL};
