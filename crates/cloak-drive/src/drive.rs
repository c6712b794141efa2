use std::sync::Arc;

use cloak_core::{CloakError, CloakResult};
use cloak_crypto::{CryptoError, MasterKeySet};
use tracing::{info, warn};

use crate::session::RemoteSession;

/// Client view of one account's drive: a remote session plus the account's
/// master keys.
///
/// Cheap to clone and safe to use from many tasks at once; no call mutates
/// shared state. Concurrent calls may fetch the same listing independently.
#[derive(Clone)]
pub struct Drive {
    pub(crate) session: Arc<dyn RemoteSession>,
    pub(crate) keys: Arc<MasterKeySet>,
}

impl Drive {
    pub fn new(session: Arc<dyn RemoteSession>, keys: MasterKeySet) -> Self {
        Self {
            session,
            keys: Arc::new(keys),
        }
    }

    pub fn keys(&self) -> &MasterKeySet {
        &self.keys
    }

    /// UUID of the account root.
    pub async fn base_folder_uuid(&self) -> CloakResult<String> {
        let base = self
            .session
            .get_user_base_folder()
            .await
            .map_err(CloakError::Transport)?;
        Ok(base.uuid)
    }

    pub async fn trash_file(&self, uuid: &str) -> CloakResult<()> {
        self.session
            .trash_file(uuid)
            .await
            .map_err(CloakError::Transport)?;
        info!(uuid, "file moved to trash");
        Ok(())
    }

    pub async fn trash_directory(&self, uuid: &str) -> CloakResult<()> {
        self.session
            .trash_directory(uuid)
            .await
            .map_err(CloakError::Transport)?;
        info!(uuid, "directory moved to trash");
        Ok(())
    }

    /// Decrypt one item's metadata with any of the account's keys.
    pub(crate) fn open_metadata(&self, uuid: &str, ciphertext: &str) -> CloakResult<String> {
        self.keys.decrypt_metadata(ciphertext).map_err(|e| match e {
            CryptoError::NoMatchingKey => {
                warn!(uuid, keys = self.keys.len(), "no master key opens item metadata");
                CloakError::NoMatchingKey { uuid: uuid.into() }
            }
            CryptoError::MalformedPlaintext(reason) => CloakError::malformed(uuid, reason),
            other => CloakError::Crypto(other.to_string()),
        })
    }
}

impl std::fmt::Debug for Drive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Drive")
            .field("keys", &self.keys.len())
            .finish_non_exhaustive()
    }
}
