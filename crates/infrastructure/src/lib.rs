pub mod dns;
pub mod socks;
pub mod system;
