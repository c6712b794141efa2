//! Remote session contract and the wire shapes it exchanges.
//!
//! Transport, authentication and retries belong to the implementor. Errors
//! are opaque `anyhow` values that the drive passes through as
//! [`cloak_core::CloakError::Transport`] without retrying.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Response of the base-folder call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseFolder {
    pub uuid: String,
}

/// Immediate children of one directory, in backend order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryContent {
    #[serde(default)]
    pub uploads: Vec<UploadEntry>,
    #[serde(default)]
    pub folders: Vec<FolderEntry>,
}

/// A file as the service stores it; `metadata` is a sealed envelope of
/// `{name, size, mime, key, lastModified}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadEntry {
    pub uuid: String,
    pub metadata: String,
    /// Upload time, epoch seconds
    pub timestamp: i64,
    pub parent: String,
    /// 0 or 1
    #[serde(default)]
    pub favorited: u8,
    pub region: String,
    pub bucket: String,
    pub chunks: u64,
}

/// A directory as the service stores it; `name` is a sealed envelope of `{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    pub uuid: String,
    pub name: String,
    pub parent: String,
    #[serde(default)]
    pub color: Option<String>,
    /// Creation time, epoch seconds
    pub timestamp: i64,
    /// 0 or 1
    #[serde(default)]
    pub favorited: u8,
}

/// Response of the create-directory call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedDirectory {
    pub uuid: String,
}

/// An authenticated connection to the remote drive.
///
/// Calls are independent request/response round trips; implementations must
/// be safe to share across tasks.
#[async_trait]
pub trait RemoteSession: Send + Sync {
    /// UUID of the account's root directory.
    async fn get_user_base_folder(&self) -> anyhow::Result<BaseFolder>;

    /// Files and directories whose parent is `uuid`.
    async fn get_directory_content(&self, uuid: &str) -> anyhow::Result<DirectoryContent>;

    /// Create a directory with a client-chosen `uuid`, sealed name and name
    /// lookup token under `parent`.
    async fn create_directory(
        &self,
        uuid: &str,
        encrypted_name: &str,
        name_hashed: &str,
        parent: &str,
    ) -> anyhow::Result<CreatedDirectory>;

    async fn trash_file(&self, uuid: &str) -> anyhow::Result<()>;

    /// Moves the directory to trash; the service handles its descendants.
    async fn trash_directory(&self, uuid: &str) -> anyhow::Result<()>;
}
