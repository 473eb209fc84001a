use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Resolution settings
///
/// Nameservers, search list and ndots are not configured here: both the
/// system resolver and the upstream fallback take them from the host's
/// `/etc/resolv.conf`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Upper bound on concurrent blocking lookups. Queries beyond it wait.
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,

    /// Deadline for the lookup of a suffix-stripped name
    #[serde(default = "default_strip_timeout_ms")]
    pub strip_timeout_ms: u64,

    /// Per-try upstream timeout; when unset the `timeout:` option from
    /// resolv.conf applies
    #[serde(default)]
    pub upstream_timeout_ms: Option<u64>,
}

impl ResolverConfig {
    pub fn strip_timeout(&self) -> Duration {
        Duration::from_millis(self.strip_timeout_ms)
    }

    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            worker_threads: default_worker_threads(),
            strip_timeout_ms: default_strip_timeout_ms(),
            upstream_timeout_ms: None,
        }
    }
}

fn default_worker_threads() -> usize {
    50
}

fn default_strip_timeout_ms() -> u64 {
    1000
}
