pub mod event_logger;
pub mod record_type_map;
pub mod server;
pub mod upstream;

pub use event_logger::ResolutionEventLogger;
pub use record_type_map::RecordTypeMapper;
pub use server::DnsServerHandler;
pub use upstream::ResolvConfUpstream;
