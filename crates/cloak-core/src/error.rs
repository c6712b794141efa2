use thiserror::Error;

pub type CloakResult<T> = Result<T, CloakError>;

#[derive(Debug, Error)]
pub enum CloakError {
    /// The remote session failed; the cause is passed through untouched.
    #[error("transport error: {0}")]
    Transport(#[source] anyhow::Error),

    /// None of the session's master keys decrypts the item's metadata.
    #[error("no master key decrypts metadata of item {uuid}")]
    NoMatchingKey { uuid: String },

    #[error("malformed metadata for item {uuid}: {reason}")]
    MalformedMetadata { uuid: String, reason: String },

    /// Item names must be non-empty and free of `/`.
    #[error("invalid item name: {0:?}")]
    InvalidName(String),

    #[error("crypto error: {0}")]
    Crypto(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CloakError {
    pub fn malformed(uuid: impl Into<String>, reason: impl Into<String>) -> Self {
        CloakError::MalformedMetadata {
            uuid: uuid.into(),
            reason: reason.into(),
        }
    }

    /// True for failures of the remote call itself, as opposed to failures
    /// decoding what the remote returned.
    pub fn is_transport(&self) -> bool {
        matches!(self, CloakError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_keeps_source() {
        let err = CloakError::Transport(anyhow::anyhow!("connection reset"));
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "transport error: connection reset");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn key_exhaustion_is_not_transport() {
        let err = CloakError::NoMatchingKey {
            uuid: "abc".into(),
        };
        assert!(!err.is_transport());
        assert!(err.to_string().contains("abc"));
    }
}
