pub mod host_resolver;
pub mod resolv_conf;

pub use host_resolver::BlockingSystemResolver;
pub use resolv_conf::{load_system_conf, log_system_conf};
