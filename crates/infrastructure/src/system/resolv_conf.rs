use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::system_conf::read_system_conf;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::{info, warn};

const DNS_PORT: u16 = 53;

/// Local resolver configuration, read from the host's `/etc/resolv.conf`.
///
/// This is the file `getaddrinfo` reads too, so the system leg and the
/// upstream leg always agree on nameservers and search list.
pub fn load_system_conf() -> (ResolverConfig, ResolverOpts) {
    let (config, opts) = match read_system_conf() {
        Ok(parts) => parts,
        Err(e) => {
            warn!(error = %e, "Cannot read resolver configuration, using defaults");
            (loopback_config(), ResolverOpts::default())
        }
    };

    if config.name_servers().is_empty() {
        warn!("No nameservers configured, using 127.0.0.1:53");
        return (loopback_config(), opts);
    }

    (config, opts)
}

/// What libc falls back to when resolv.conf names no server.
pub fn loopback_config() -> ResolverConfig {
    ResolverConfig::from_parts(
        None,
        vec![],
        NameServerConfigGroup::from_ips_clear(&[IpAddr::V4(Ipv4Addr::LOCALHOST)], DNS_PORT, true),
    )
}

/// Distinct nameserver addresses in configuration order. Each address
/// appears once per protocol in the hickory config.
pub fn nameserver_addrs(config: &ResolverConfig) -> Vec<SocketAddr> {
    let mut addrs = Vec::new();
    for ns in config.name_servers() {
        if !addrs.contains(&ns.socket_addr) {
            addrs.push(ns.socket_addr);
        }
    }
    addrs
}

pub fn log_system_conf(config: &ResolverConfig, opts: &ResolverOpts) {
    let search: Vec<String> = config.search().iter().map(|s| s.to_string()).collect();
    info!(
        nameservers = ?nameserver_addrs(config),
        search = ?search,
        ndots = opts.ndots,
        timeout_secs = opts.timeout.as_secs(),
        attempts = opts.attempts,
        "Local resolver configuration"
    );
}
