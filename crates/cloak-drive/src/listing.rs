//! Directory listings: fetch one directory's children and decrypt them.

use chrono::{DateTime, Utc};
use cloak_core::{CloakError, CloakResult, ContentKey, Directory, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::drive::Drive;
use crate::session::{FolderEntry, UploadEntry};

/// Wire timestamps at or above this are milliseconds, below it seconds.
const MILLIS_THRESHOLD: u64 = 100_000_000_000;

/// Decrypted file metadata.
#[derive(Debug, Deserialize)]
struct FileMetadata {
    name: String,
    size: u64,
    #[serde(default)]
    mime: String,
    key: String,
    #[serde(rename = "lastModified", default)]
    last_modified: Option<i64>,
}

/// Decrypted directory metadata.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct DirectoryMetadata {
    pub(crate) name: String,
}

/// The decrypted children of one directory, in the order the backend
/// returned them.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub files: Vec<File>,
    pub directories: Vec<Directory>,
}

impl Listing {
    /// First file named exactly `name`.
    ///
    /// Names are not unique remotely. When several children share a name the
    /// earliest in backend order wins, and that order is not stable between
    /// calls.
    pub fn find_file(&self, name: &str) -> Option<&File> {
        self.files.iter().find(|file| file.name == name)
    }

    /// First directory named exactly `name`; same tie-break as [`Listing::find_file`].
    pub fn find_directory(&self, name: &str) -> Option<&Directory> {
        self.directories.iter().find(|dir| dir.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }
}

impl Drive {
    /// Fetch and decrypt the immediate children of directory `uuid`.
    ///
    /// All or nothing: if any child's metadata cannot be decrypted or parsed,
    /// the whole call fails rather than returning a listing with gaps.
    pub async fn list_children(&self, uuid: &str) -> CloakResult<Listing> {
        let content = self
            .session
            .get_directory_content(uuid)
            .await
            .map_err(CloakError::Transport)?;

        let files = content
            .uploads
            .iter()
            .map(|upload| self.decode_file(upload))
            .collect::<CloakResult<Vec<_>>>()?;
        let directories = content
            .folders
            .iter()
            .map(|folder| self.decode_directory(folder))
            .collect::<CloakResult<Vec<_>>>()?;

        debug!(
            uuid,
            files = files.len(),
            directories = directories.len(),
            "listed directory"
        );
        Ok(Listing { files, directories })
    }

    fn decode_file(&self, upload: &UploadEntry) -> CloakResult<File> {
        let plaintext = self.open_metadata(&upload.uuid, &upload.metadata)?;
        let metadata: FileMetadata = serde_json::from_str(&plaintext)
            .map_err(|e| CloakError::malformed(&upload.uuid, e.to_string()))?;

        let created = timestamp_to_time(&upload.uuid, upload.timestamp)?;
        let last_modified = match metadata.last_modified {
            Some(ts) => timestamp_to_time(&upload.uuid, ts)?,
            None => created,
        };

        Ok(File {
            uuid: upload.uuid.clone(),
            name: metadata.name,
            size: metadata.size,
            mime_type: metadata.mime,
            content_key: ContentKey::from_bytes(metadata.key.into_bytes()),
            created,
            last_modified,
            parent_uuid: upload.parent.clone(),
            favorited: upload.favorited == 1,
            region: upload.region.clone(),
            bucket: upload.bucket.clone(),
            chunks: upload.chunks,
        })
    }

    fn decode_directory(&self, folder: &FolderEntry) -> CloakResult<Directory> {
        let plaintext = self.open_metadata(&folder.uuid, &folder.name)?;
        let metadata: DirectoryMetadata = serde_json::from_str(&plaintext)
            .map_err(|e| CloakError::malformed(&folder.uuid, e.to_string()))?;

        Ok(Directory {
            uuid: folder.uuid.clone(),
            name: metadata.name,
            parent_uuid: Some(folder.parent.clone()),
            color: folder.color.clone().filter(|color| !color.is_empty()),
            created: timestamp_to_time(&folder.uuid, folder.timestamp)?,
            favorited: folder.favorited == 1,
        })
    }
}

fn timestamp_to_time(uuid: &str, ts: i64) -> CloakResult<DateTime<Utc>> {
    let time = if ts.unsigned_abs() >= MILLIS_THRESHOLD {
        DateTime::<Utc>::from_timestamp_millis(ts)
    } else {
        DateTime::<Utc>::from_timestamp(ts, 0)
    };
    time.ok_or_else(|| CloakError::malformed(uuid, format!("timestamp {ts} out of range")))
}
