use super::{DnsName, RecordType};
use std::time::Duration;

/// A single question handed to the resolution pipeline.
///
/// Rewrites produce a new value; the original stays untouched so the
/// answer can still be owned by the name the caller asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub name: DnsName,
    pub record_type: RecordType,
    pub timeout: Option<Duration>,
}

impl DnsQuery {
    pub fn new(name: impl Into<DnsName>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_name(&self, name: DnsName) -> Self {
        Self {
            name,
            record_type: self.record_type,
            timeout: self.timeout,
        }
    }

    pub fn with_record_type(&self, record_type: RecordType) -> Self {
        Self {
            name: self.name.clone(),
            record_type,
            timeout: self.timeout,
        }
    }
}
