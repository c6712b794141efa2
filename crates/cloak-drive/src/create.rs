//! Directory creation and path materialization.

use chrono::Utc;
use cloak_core::{CloakError, CloakResult, Directory};
use cloak_crypto::hash_name;
use tracing::{debug, info};
use uuid::Uuid;

use crate::drive::Drive;
use crate::listing::DirectoryMetadata;
use crate::resolve::segments;

impl Drive {
    /// Create directory `name` under `parent_uuid`.
    ///
    /// The name is sealed under the current master key and sent along with its
    /// lookup token. The service does not reject duplicate names.
    pub async fn create_directory(&self, parent_uuid: &str, name: &str) -> CloakResult<Directory> {
        if name.is_empty() || name.contains('/') {
            return Err(CloakError::InvalidName(name.to_string()));
        }

        let uuid = Uuid::new_v4().to_string();
        let metadata = serde_json::to_string(&DirectoryMetadata {
            name: name.to_string(),
        })
        .map_err(|e| CloakError::malformed(&uuid, e.to_string()))?;
        let encrypted_name = self
            .keys
            .encrypt_metadata(&metadata)
            .map_err(|e| CloakError::Crypto(e.to_string()))?;

        let created = self
            .session
            .create_directory(&uuid, &encrypted_name, &hash_name(name), parent_uuid)
            .await
            .map_err(CloakError::Transport)?;

        info!(uuid = %created.uuid, parent = parent_uuid, "created directory");
        Ok(Directory {
            uuid: created.uuid,
            name: name.to_string(),
            parent_uuid: Some(parent_uuid.to_string()),
            color: None,
            created: Utc::now(),
            favorited: false,
        })
    }

    /// UUID of the directory at `path`, creating whatever is missing.
    ///
    /// Existing directories are reused, never recreated. This is not atomic:
    /// if a create fails, the directories made before it stay, and calling
    /// again with the same path picks up where the failure left off. Two
    /// concurrent calls on overlapping paths can both create the same missing
    /// directory.
    pub async fn resolve_or_create(&self, path: &str) -> CloakResult<String> {
        let mut current = self.base_folder_uuid().await?;
        let mut creating = false;

        for segment in segments(path) {
            if !creating {
                let listing = self.list_children(&current).await?;
                if let Some(dir) = listing.find_directory(segment) {
                    current = dir.uuid.clone();
                    continue;
                }
                debug!(path, segment, "materializing missing directories");
                creating = true;
            }
            // A directory created in this call has no children yet.
            current = self.create_directory(&current, segment).await?.uuid;
        }

        Ok(current)
    }
}
