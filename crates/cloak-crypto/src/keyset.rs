//! The account's master keys, oldest first.

use tracing::trace;

use crate::error::CryptoError;
use crate::kdf::MasterKey;
use crate::metadata::{decrypt_metadata, encrypt_metadata};

/// Ordered, non-empty set of master keys. The last key is current and is the
/// only one used to encrypt; every key is tried when decrypting.
#[derive(Debug, Clone)]
pub struct MasterKeySet {
    keys: Vec<MasterKey>,
}

impl MasterKeySet {
    pub fn new(keys: Vec<MasterKey>) -> Result<Self, CryptoError> {
        if keys.is_empty() {
            return Err(CryptoError::EmptyKeySet);
        }
        Ok(Self { keys })
    }

    /// Parse the `|`-joined key list delivered by the account API.
    pub fn from_joined(joined: &str) -> Result<Self, CryptoError> {
        Self::new(
            joined
                .split('|')
                .filter(|key| !key.is_empty())
                .map(MasterKey::from)
                .collect(),
        )
    }

    pub fn current(&self) -> &MasterKey {
        // Non-empty by construction.
        &self.keys[self.keys.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MasterKey> {
        self.keys.iter()
    }

    /// Seal metadata under the current key.
    pub fn encrypt_metadata(&self, plaintext: &str) -> Result<String, CryptoError> {
        encrypt_metadata(plaintext, self.current())
    }

    /// Open metadata with whichever key sealed it.
    ///
    /// Keys are tried in set order and the first success wins. Fails with
    /// [`CryptoError::NoMatchingKey`] when no key opens the envelope, which is
    /// expected for items shared from other accounts.
    pub fn decrypt_metadata(&self, ciphertext: &str) -> Result<String, CryptoError> {
        for (index, key) in self.keys.iter().enumerate() {
            match decrypt_metadata(ciphertext, key) {
                Ok(plaintext) => {
                    trace!(key_index = index, "metadata opened");
                    return Ok(plaintext);
                }
                Err(CryptoError::DecryptionFailed) => continue,
                Err(CryptoError::InvalidCiphertext(reason)) => {
                    trace!(%reason, "metadata envelope unreadable by any key");
                    return Err(CryptoError::NoMatchingKey);
                }
                Err(other) => return Err(other),
            }
        }
        Err(CryptoError::NoMatchingKey)
    }
}
