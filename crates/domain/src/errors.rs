use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed domain name: {0}")]
    MalformedName(String),

    #[error("Truncated DNS message: {0}")]
    TruncatedMessage(String),

    #[error("Cannot encode domain name: {0}")]
    Encoding(String),

    #[error("Resolution exhausted for {domain}: no answer, glue or referral")]
    ResolutionExhausted { domain: String },

    #[error("Resolution depth exceeded for {domain}: {reason}")]
    ResolutionDepthExceeded { domain: String, reason: String },

    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("Transport timeout waiting for {server}")]
    TransportTimeout { server: String },

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(String),

    #[error("Cache store error: {0}")]
    CacheStore(String),
}

impl DomainError {
    /// True for failures raised by the codec while reading or writing wire data.
    pub fn is_codec(&self) -> bool {
        matches!(
            self,
            DomainError::MalformedName(_)
                | DomainError::TruncatedMessage(_)
                | DomainError::Encoding(_)
        )
    }

    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DomainError::Transport { .. } | DomainError::TransportTimeout { .. }
        )
    }
}
