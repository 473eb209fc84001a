//! DNS Repeater Domain Layer
pub mod config;
pub mod dns_name;
pub mod dns_query;
pub mod dns_record;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_name::DnsName;
pub use dns_query::DnsQuery;
pub use dns_record::RecordType;
pub use errors::DomainError;
