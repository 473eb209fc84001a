pub mod dns;
pub mod socks;

pub use dns::start_dns_server;
pub use socks::start_socks_server;
