//! Key derivation: passphrase + account salt → master key and auth secret

use pbkdf2::pbkdf2_hmac;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use zeroize::{Zeroize, Zeroizing};

use crate::error::CryptoError;

/// PBKDF2 rounds for auth version 2. Fixed by the service protocol.
pub const PBKDF2_ITERATIONS: u32 = 200_000;

/// PBKDF2 output length in bytes (512 bits). Fixed by the service protocol.
pub const DERIVED_KEY_LEN: usize = 64;

/// A master key used to seal item metadata.
///
/// The service treats master keys as opaque strings, so the bytes are kept
/// as-is (for derived keys: the ASCII hex of the PBKDF2 output half).
/// Zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct MasterKey {
    bytes: Vec<u8>,
}

impl MasterKey {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&str> for MasterKey {
    fn from(key: &str) -> Self {
        Self::from_bytes(key.as_bytes())
    }
}

impl Drop for MasterKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Output of a login-time derivation.
#[derive(Debug)]
pub struct Credentials {
    /// Becomes the current entry of the account's master key set
    pub master_key: MasterKey,
    /// Sent to the service to authenticate; never used for encryption
    pub auth_secret: SecretString,
}

/// Account authentication scheme, as reported by the service for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthVersion {
    /// Legacy: SHA-512 of the passphrase is both master key and auth secret.
    V1,
    /// PBKDF2-HMAC-SHA512 with the account salt.
    V2,
}

impl TryFrom<u32> for AuthVersion {
    type Error = CryptoError;

    fn try_from(version: u32) -> Result<Self, Self::Error> {
        match version {
            1 => Ok(AuthVersion::V1),
            2 => Ok(AuthVersion::V2),
            other => Err(CryptoError::UnsupportedAuthVersion(other)),
        }
    }
}

/// Derive the master key and auth secret for the given auth version.
pub fn derive_credentials(
    passphrase: &SecretString,
    salt: &str,
    version: AuthVersion,
) -> Credentials {
    match version {
        AuthVersion::V1 => {
            let digest = hex::encode(Sha512::digest(passphrase.expose_secret().as_bytes()));
            Credentials {
                master_key: MasterKey::from_bytes(digest.as_bytes()),
                auth_secret: SecretString::from(digest),
            }
        }
        AuthVersion::V2 => derive_master_key_and_auth(passphrase, salt),
    }
}

/// PBKDF2-HMAC-SHA512 over passphrase and salt, split into master key and
/// auth secret.
///
/// The 512-bit output is hex-encoded; the first half of the hex string is the
/// master key, the second half is hashed once more with SHA-512 (hex) to form
/// the auth secret.
pub fn derive_master_key_and_auth(passphrase: &SecretString, salt: &str) -> Credentials {
    let mut derived = Zeroizing::new([0u8; DERIVED_KEY_LEN]);
    pbkdf2_hmac::<Sha512>(
        passphrase.expose_secret().as_bytes(),
        salt.as_bytes(),
        PBKDF2_ITERATIONS,
        derived.as_mut(),
    );

    let derived_hex = Zeroizing::new(hex::encode(derived.as_ref()));
    let (master_half, auth_half) = derived_hex.split_at(derived_hex.len() / 2);

    Credentials {
        master_key: MasterKey::from_bytes(master_half.as_bytes()),
        auth_secret: SecretString::from(hex::encode(Sha512::digest(auth_half.as_bytes()))),
    }
}
