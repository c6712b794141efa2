//! Shared helpers for drive integration tests
#![allow(dead_code)]

use std::sync::Arc;

use cloak_crypto::{encrypt_metadata, MasterKey, MasterKeySet};
use cloak_drive::{Drive, FolderEntry, MemorySession, UploadEntry};
use uuid::Uuid;

pub const ROOT: &str = "root-0000";
pub const OLD_KEY: &str = "old-master-key";
pub const CURRENT_KEY: &str = "current-master-key";

/// Fixed upload time used by seeded entries (2025-10-16T10:00:00Z)
pub const SEEDED_AT: i64 = 1_760_608_800;

/// Key set of a rotated account: one retired key, one current key.
pub fn key_set() -> MasterKeySet {
    MasterKeySet::new(vec![MasterKey::from(OLD_KEY), MasterKey::from(CURRENT_KEY)]).unwrap()
}

/// Empty drive over an in-memory session.
pub fn setup_drive() -> (Drive, Arc<MemorySession>) {
    let session = Arc::new(MemorySession::with_root(ROOT));
    let drive = Drive::new(session.clone(), key_set());
    (drive, session)
}

/// Seed a directory whose name is sealed under `key`.
pub fn add_dir_with_key(session: &MemorySession, key: &str, parent: &str, name: &str) -> String {
    let uuid = Uuid::new_v4().to_string();
    let sealed = encrypt_metadata(
        &serde_json::json!({ "name": name }).to_string(),
        &MasterKey::from(key),
    )
    .unwrap();
    session.insert_folder(FolderEntry {
        uuid: uuid.clone(),
        name: sealed,
        parent: parent.to_string(),
        color: None,
        timestamp: SEEDED_AT,
        favorited: 0,
    });
    uuid
}

pub fn add_dir(session: &MemorySession, parent: &str, name: &str) -> String {
    add_dir_with_key(session, CURRENT_KEY, parent, name)
}

/// Seed a file with raw metadata JSON sealed under `key`.
pub fn add_file_with_metadata(
    session: &MemorySession,
    key: &str,
    parent: &str,
    metadata: &serde_json::Value,
) -> String {
    let uuid = Uuid::new_v4().to_string();
    let sealed = encrypt_metadata(&metadata.to_string(), &MasterKey::from(key)).unwrap();
    session.insert_upload(UploadEntry {
        uuid: uuid.clone(),
        metadata: sealed,
        timestamp: SEEDED_AT,
        parent: parent.to_string(),
        favorited: 0,
        region: "de-1".to_string(),
        bucket: "bucket-1".to_string(),
        chunks: 1,
    });
    uuid
}

pub fn add_file(session: &MemorySession, parent: &str, name: &str) -> String {
    add_file_with_metadata(
        session,
        CURRENT_KEY,
        parent,
        &serde_json::json!({
            "name": name,
            "size": 11,
            "mime": "text/plain",
            "key": "0123456789abcdef0123456789abcdef",
            "lastModified": SEEDED_AT * 1000,
        }),
    )
}
