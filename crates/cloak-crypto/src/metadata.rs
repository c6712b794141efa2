//! AES-256-GCM metadata envelopes
//!
//! Envelope format (text, as stored by the service):
//! ```text
//! "002" || iv (12 ASCII alphanumeric chars) || base64(ciphertext || 16-byte tag)
//! ```
//! The 12 IV characters are used directly as the GCM nonce. The AES key is
//! PBKDF2-HMAC-SHA512(password = master key, salt = master key, 1 round).
//!
//! Older clients wrote `"001|" || base64(iv) || "|" || base64(ciphertext || tag)`;
//! those envelopes are still readable but never written.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use rand::{distributions::Alphanumeric, Rng};
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::kdf::MasterKey;
use crate::{IV_SIZE, KEY_SIZE, TAG_SIZE};

const VERSION_CURRENT: &str = "002";
const VERSION_LEGACY: &str = "001";

/// Seal a short UTF-8 metadata string under `key`.
///
/// Every call draws a fresh IV, so equal inputs produce different envelopes.
pub fn encrypt_metadata(plaintext: &str, key: &MasterKey) -> Result<String, CryptoError> {
    let iv: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(IV_SIZE)
        .map(char::from)
        .collect();

    let sealed = seal(plaintext.as_bytes(), key, iv.as_bytes())?;
    Ok(format!("{VERSION_CURRENT}{iv}{}", BASE64.encode(sealed)))
}

/// Open a metadata envelope with `key`.
///
/// Fails with [`CryptoError::DecryptionFailed`] when the tag does not verify;
/// nothing is returned for a failed open.
pub fn decrypt_metadata(ciphertext: &str, key: &MasterKey) -> Result<String, CryptoError> {
    let (iv, sealed) = parse_envelope(ciphertext)?;

    let aes_key = derive_aes_key(key);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&aes_key[..]));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(&iv), sealed.as_ref())
        .map_err(|_| CryptoError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|e| CryptoError::MalformedPlaintext(e.to_string()))
}

fn seal(plaintext: &[u8], key: &MasterKey, iv: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let aes_key = derive_aes_key(key);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&aes_key[..]));
    cipher
        .encrypt(Nonce::from_slice(iv), plaintext)
        .map_err(|e| CryptoError::Encryption(e.to_string()))
}

fn derive_aes_key(key: &MasterKey) -> Zeroizing<[u8; KEY_SIZE]> {
    let mut aes_key = Zeroizing::new([0u8; KEY_SIZE]);
    pbkdf2_hmac::<Sha512>(key.as_bytes(), key.as_bytes(), 1, aes_key.as_mut());
    aes_key
}

/// Split an envelope into (nonce, ciphertext || tag).
fn parse_envelope(ciphertext: &str) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
    let (iv, sealed) = match ciphertext.get(..3) {
        Some(VERSION_CURRENT) => {
            let iv = ciphertext
                .get(3..3 + IV_SIZE)
                .ok_or_else(|| CryptoError::InvalidCiphertext("truncated IV".into()))?;
            let sealed = BASE64
                .decode(&ciphertext[3 + IV_SIZE..])
                .map_err(|e| CryptoError::InvalidCiphertext(format!("base64: {e}")))?;
            (iv.as_bytes().to_vec(), sealed)
        }
        Some(VERSION_LEGACY) => {
            let mut parts = ciphertext.splitn(3, '|').skip(1);
            let (Some(iv_b64), Some(sealed_b64)) = (parts.next(), parts.next()) else {
                return Err(CryptoError::InvalidCiphertext(
                    "legacy envelope needs three '|' separated parts".into(),
                ));
            };
            let iv = BASE64
                .decode(iv_b64)
                .map_err(|e| CryptoError::InvalidCiphertext(format!("base64 IV: {e}")))?;
            let sealed = BASE64
                .decode(sealed_b64)
                .map_err(|e| CryptoError::InvalidCiphertext(format!("base64: {e}")))?;
            (iv, sealed)
        }
        _ => {
            return Err(CryptoError::InvalidCiphertext(
                "unknown envelope version".into(),
            ))
        }
    };

    if iv.len() != IV_SIZE {
        return Err(CryptoError::InvalidCiphertext(format!(
            "IV is {} bytes, expected {IV_SIZE}",
            iv.len()
        )));
    }
    if sealed.len() < TAG_SIZE {
        return Err(CryptoError::InvalidCiphertext(format!(
            "ciphertext too short: {} bytes",
            sealed.len()
        )));
    }

    Ok((iv, sealed))
}
