use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    /// The authentication tag did not validate: wrong key, corruption, or tampering.
    #[error("metadata decryption failed: wrong key or corrupted data")]
    DecryptionFailed,

    /// The envelope could not be parsed, so no key could ever open it.
    #[error("invalid metadata ciphertext: {0}")]
    InvalidCiphertext(String),

    /// The ciphertext authenticated but the plaintext is not UTF-8.
    #[error("decrypted metadata is not valid UTF-8: {0}")]
    MalformedPlaintext(String),

    #[error("no master key in the set decrypts this metadata")]
    NoMatchingKey,

    #[error("master key set is empty")]
    EmptyKeySet,

    #[error("metadata encryption failed: {0}")]
    Encryption(String),

    #[error("unsupported auth version: {0}")]
    UnsupportedAuthVersion(u32),
}
