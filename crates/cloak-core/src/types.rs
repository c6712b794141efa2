use chrono::{DateTime, Utc};
use zeroize::Zeroize;

/// Key used to encrypt a file's content chunks, as found in the file's
/// decrypted metadata. Zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct ContentKey {
    bytes: Vec<u8>,
}

impl ContentKey {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for ContentKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// A file on the remote drive, decrypted at listing time.
///
/// This is a snapshot: it does not track later remote changes.
#[derive(Debug, Clone)]
pub struct File {
    pub uuid: String,
    pub name: String,
    /// Plaintext size in bytes
    pub size: u64,
    pub mime_type: String,
    pub content_key: ContentKey,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    /// UUID of the directory containing this file
    pub parent_uuid: String,
    pub favorited: bool,
    pub region: String,
    pub bucket: String,
    /// Number of content chunks stored remotely
    pub chunks: u64,
}

/// A directory on the remote drive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    pub uuid: String,
    pub name: String,
    /// `None` only for the account root
    pub parent_uuid: Option<String>,
    /// Display colour; `None` means the default colour
    pub color: Option<String>,
    pub created: DateTime<Utc>,
    pub favorited: bool,
}

impl Directory {
    /// The account root. The backend never lists the root as a child, so
    /// only its UUID is known; the creation time is reported as the epoch.
    pub fn root(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: String::new(),
            parent_uuid: None,
            color: None,
            created: DateTime::<Utc>::UNIX_EPOCH,
            favorited: false,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_uuid.is_none()
    }
}

/// The result of resolving a path: either a file or a directory.
#[derive(Debug, Clone)]
pub enum Item {
    File(File),
    Directory(Directory),
}

impl Item {
    pub fn uuid(&self) -> &str {
        match self {
            Item::File(file) => &file.uuid,
            Item::Directory(dir) => &dir.uuid,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Item::File(file) => &file.name,
            Item::Directory(dir) => &dir.name,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Item::Directory(_))
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            Item::File(file) => Some(file),
            Item::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            Item::File(_) => None,
            Item::Directory(dir) => Some(dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_key_debug_is_redacted() {
        let key = ContentKey::from_bytes(b"super-secret".to_vec());
        let debug = format!("{key:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn root_directory_has_no_parent() {
        let root = Directory::root("root-uuid");
        assert!(root.is_root());
        assert_eq!(root.name, "");
        assert_eq!(root.color, None);

        let item = Item::Directory(root);
        assert!(item.is_dir());
        assert_eq!(item.uuid(), "root-uuid");
        assert!(item.as_file().is_none());
    }
}
