//! cloak-crypto: metadata cryptography for an end-to-end encrypted drive
//!
//! Item names and attributes never leave the client in plaintext. Each
//! item's metadata is a small JSON document sealed with AES-256-GCM under one
//! of the account's master keys.
//!
//! Key hierarchy:
//! ```text
//! Passphrase + account salt
//!   └── PBKDF2-HMAC-SHA512 (200 000 rounds, 512-bit) → hex digest
//!         ├── first half:  master key (current entry of the MasterKeySet)
//!         │     └── metadata AES key: PBKDF2-HMAC-SHA512(key, key, 1 round, 256-bit)
//!         └── second half: SHA-512 → auth secret sent to the service
//! ```
//!
//! Accounts accumulate master keys over time. Old items stay sealed under
//! the key that was current when they were written, so reads go through
//! [`MasterKeySet::decrypt_metadata`], which tries every key.

pub mod error;
pub mod kdf;
pub mod keyset;
pub mod metadata;
pub mod names;

pub use error::CryptoError;
pub use kdf::{derive_credentials, derive_master_key_and_auth, AuthVersion, Credentials, MasterKey};
pub use keyset::MasterKeySet;
pub use metadata::{decrypt_metadata, encrypt_metadata};
pub use names::hash_name;

/// Size of the AES-256 key derived from a master key
pub const KEY_SIZE: usize = 32;

/// Size of the AES-GCM nonce, carried as ASCII characters in the envelope
pub const IV_SIZE: usize = 12;

/// Size of the GCM authentication tag
pub const TAG_SIZE: usize = 16;
