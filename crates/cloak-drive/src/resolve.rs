//! Path resolution: walk `/`-separated paths through directory listings.
//!
//! Empty segments are ignored, so `""`, `"/"` and `"//"` all name the root,
//! and `"/a//b/"` is the same path as `"a/b"`. Segment matching is exact
//! string equality on decrypted names.

use cloak_core::{CloakResult, Directory, Item};
use tracing::debug;

use crate::drive::Drive;

/// Non-empty segments of `path`, in order.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

impl Drive {
    /// Find the item at `path`.
    ///
    /// Returns `Ok(None)` when nothing is there. When the final segment names
    /// both a file and a directory, the file wins unless `require_directory`
    /// is set. Intermediate segments only ever match directories. Duplicate
    /// names resolve to whichever child the backend lists first.
    ///
    /// The empty path resolves to the root without any listing request.
    pub async fn resolve(&self, path: &str, require_directory: bool) -> CloakResult<Option<Item>> {
        let segments = segments(path);
        let root = self.base_folder_uuid().await?;
        let Some((last, parents)) = segments.split_last() else {
            return Ok(Some(Item::Directory(Directory::root(root))));
        };

        let mut current = root;
        for segment in parents {
            let listing = self.list_children(&current).await?;
            match listing.find_directory(segment) {
                Some(dir) => current = dir.uuid.clone(),
                None => {
                    debug!(path, segment, "no directory for path segment");
                    return Ok(None);
                }
            }
        }

        let listing = self.list_children(&current).await?;
        if !require_directory {
            if let Some(file) = listing.find_file(last) {
                return Ok(Some(Item::File(file.clone())));
            }
        }
        let found = listing.find_directory(last).cloned().map(Item::Directory);
        if found.is_none() {
            debug!(path, segment = *last, require_directory, "path not found");
        }
        Ok(found)
    }

    /// UUID of the item at `path`, or `None` if nothing is there.
    ///
    /// The empty path short-circuits to the root UUID.
    pub async fn resolve_uuid(
        &self,
        path: &str,
        require_directory: bool,
    ) -> CloakResult<Option<String>> {
        if segments(path).is_empty() {
            return self.base_folder_uuid().await.map(Some);
        }
        let item = self.resolve(path, require_directory).await?;
        Ok(item.map(|item| item.uuid().to_string()))
    }
}
