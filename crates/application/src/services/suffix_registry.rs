use arc_swap::ArcSwapOption;
use dns_repeater_domain::DnsName;
use std::sync::Arc;

/// The search suffix learned from the first sentinel probe.
///
/// Written at most once per process, read by every query. The write is a
/// single compare-and-swap against "unset", so concurrent probes cannot
/// interleave: exactly one candidate wins and later ones are ignored.
#[derive(Debug)]
pub struct SuffixRegistry {
    suffix: ArcSwapOption<DnsName>,
}

impl SuffixRegistry {
    pub fn new() -> Self {
        Self {
            suffix: ArcSwapOption::empty(),
        }
    }

    /// Store `candidate` if no suffix is stored yet. Returns `true` when this
    /// call stored it.
    ///
    /// An empty candidate leaves the registry unlearned.
    pub fn try_set(&self, candidate: DnsName) -> bool {
        if candidate.is_empty() {
            return false;
        }
        let previous = self
            .suffix
            .compare_and_swap(&None::<Arc<DnsName>>, Some(Arc::new(candidate)));
        previous.is_none()
    }

    pub fn get(&self) -> Option<Arc<DnsName>> {
        self.suffix.load_full()
    }

    pub fn is_learned(&self) -> bool {
        self.suffix.load().is_some()
    }
}

impl Default for SuffixRegistry {
    fn default() -> Self {
        Self::new()
    }
}
