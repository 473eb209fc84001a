use dns_repeater_domain::{DnsName, DomainError, RecordType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionPath {
    System,
    Upstream,
}

impl ResolutionPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionPath::System => "system",
            ResolutionPath::Upstream => "upstream",
        }
    }
}

/// One transition of the query resolution pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionEvent {
    SuffixLearned {
        suffix: DnsName,
    },

    /// `<sentinel>.<suffix>` answered with the loopback address.
    SentinelAnswered {
        name: DnsName,
    },

    SuffixStripped {
        original: DnsName,
        stripped: DnsName,
        record_type: RecordType,
    },

    /// The stripped lookup failed or ran out of time; the unstripped
    /// name goes to the upstream resolver instead.
    FallbackTriggered {
        name: DnsName,
        reason: String,
    },

    /// AAAA rewritten to A.
    TypeNormalized {
        name: DnsName,
    },

    Resolved {
        name: DnsName,
        record_type: RecordType,
        path: ResolutionPath,
        answers: usize,
    },

    Failed {
        name: DnsName,
        record_type: RecordType,
        path: ResolutionPath,
        error: DomainError,
    },
}

impl ResolutionEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ResolutionEvent::SuffixLearned { .. } => "suffix_learned",
            ResolutionEvent::SentinelAnswered { .. } => "sentinel_answered",
            ResolutionEvent::SuffixStripped { .. } => "suffix_stripped",
            ResolutionEvent::FallbackTriggered { .. } => "fallback_triggered",
            ResolutionEvent::TypeNormalized { .. } => "type_normalized",
            ResolutionEvent::Resolved { .. } => "resolved",
            ResolutionEvent::Failed { .. } => "failed",
        }
    }
}
