use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Domain not found: {0}")]
    NotFound(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Upstream resolver failure: {0}")]
    UpstreamFailure(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl DomainError {
    /// Negative answers are reported to the caller as NXDOMAIN rather than
    /// as a server failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }
}
