//! In-process `RemoteSession` backed by a flat parent/child table.
//!
//! Stores entries exactly as the service would (sealed names, UUID parents)
//! and counts requests, so callers can check how many round trips an
//! operation cost.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::session::{
    BaseFolder, CreatedDirectory, DirectoryContent, FolderEntry, RemoteSession, UploadEntry,
};

#[derive(Default)]
struct MemoryState {
    folders: Vec<FolderEntry>,
    uploads: Vec<UploadEntry>,
    /// Lookup token submitted with each created directory
    name_hashes: HashMap<String, String>,
    /// Remaining successful creates before injected failures start
    create_budget: Option<usize>,
}

pub struct MemorySession {
    root_uuid: String,
    state: Mutex<MemoryState>,
    listing_requests: AtomicUsize,
    created_directories: AtomicUsize,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::with_root(Uuid::new_v4().to_string())
    }

    pub fn with_root(root_uuid: impl Into<String>) -> Self {
        Self {
            root_uuid: root_uuid.into(),
            state: Mutex::new(MemoryState::default()),
            listing_requests: AtomicUsize::new(0),
            created_directories: AtomicUsize::new(0),
        }
    }

    pub fn root_uuid(&self) -> &str {
        &self.root_uuid
    }

    /// Insert a directory entry as-is (its `name` must already be sealed).
    pub fn insert_folder(&self, entry: FolderEntry) {
        self.state().folders.push(entry);
    }

    /// Insert a file entry as-is (its `metadata` must already be sealed).
    pub fn insert_upload(&self, entry: UploadEntry) {
        self.state().uploads.push(entry);
    }

    /// Number of `get_directory_content` calls served so far.
    pub fn listing_requests(&self) -> usize {
        self.listing_requests.load(Ordering::SeqCst)
    }

    /// Number of directories created through `create_directory`.
    pub fn created_directories(&self) -> usize {
        self.created_directories.load(Ordering::SeqCst)
    }

    /// Lookup token that was submitted when directory `uuid` was created.
    pub fn name_hash(&self, uuid: &str) -> Option<String> {
        self.state().name_hashes.get(uuid).cloned()
    }

    /// Let `successes` more creates through, then fail every later one.
    pub fn fail_creates_after(&self, successes: usize) {
        self.state().create_budget = Some(successes);
    }

    /// Remove any create failure injected by [`MemorySession::fail_creates_after`].
    pub fn allow_creates(&self) {
        self.state().create_budget = None;
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemorySession {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryState {
    fn is_directory(&self, uuid: &str, root_uuid: &str) -> bool {
        uuid == root_uuid || self.folders.iter().any(|folder| folder.uuid == uuid)
    }
}

#[async_trait]
impl RemoteSession for MemorySession {
    async fn get_user_base_folder(&self) -> anyhow::Result<BaseFolder> {
        Ok(BaseFolder {
            uuid: self.root_uuid.clone(),
        })
    }

    async fn get_directory_content(&self, uuid: &str) -> anyhow::Result<DirectoryContent> {
        self.listing_requests.fetch_add(1, Ordering::SeqCst);
        let state = self.state();
        if !state.is_directory(uuid, &self.root_uuid) {
            bail!("directory {uuid} does not exist");
        }

        Ok(DirectoryContent {
            uploads: state
                .uploads
                .iter()
                .filter(|upload| upload.parent == uuid)
                .cloned()
                .collect(),
            folders: state
                .folders
                .iter()
                .filter(|folder| folder.parent == uuid)
                .cloned()
                .collect(),
        })
    }

    async fn create_directory(
        &self,
        uuid: &str,
        encrypted_name: &str,
        name_hashed: &str,
        parent: &str,
    ) -> anyhow::Result<CreatedDirectory> {
        let mut state = self.state();
        if let Some(budget) = state.create_budget.as_mut() {
            if *budget == 0 {
                bail!("create_directory rejected: injected failure");
            }
            *budget -= 1;
        }
        if !state.is_directory(parent, &self.root_uuid) {
            bail!("parent directory {parent} does not exist");
        }
        if state.is_directory(uuid, &self.root_uuid) {
            bail!("directory {uuid} already exists");
        }

        state.folders.push(FolderEntry {
            uuid: uuid.to_string(),
            name: encrypted_name.to_string(),
            parent: parent.to_string(),
            color: None,
            timestamp: Utc::now().timestamp(),
            favorited: 0,
        });
        state
            .name_hashes
            .insert(uuid.to_string(), name_hashed.to_string());
        self.created_directories.fetch_add(1, Ordering::SeqCst);

        Ok(CreatedDirectory {
            uuid: uuid.to_string(),
        })
    }

    async fn trash_file(&self, uuid: &str) -> anyhow::Result<()> {
        let mut state = self.state();
        let index = state
            .uploads
            .iter()
            .position(|upload| upload.uuid == uuid)
            .ok_or_else(|| anyhow!("file {uuid} does not exist"))?;
        state.uploads.remove(index);
        Ok(())
    }

    async fn trash_directory(&self, uuid: &str) -> anyhow::Result<()> {
        let mut state = self.state();
        let index = state
            .folders
            .iter()
            .position(|folder| folder.uuid == uuid)
            .ok_or_else(|| anyhow!("directory {uuid} does not exist"))?;
        state.folders.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(uuid: &str, parent: &str) -> FolderEntry {
        FolderEntry {
            uuid: uuid.into(),
            name: "sealed".into(),
            parent: parent.into(),
            color: None,
            timestamp: 0,
            favorited: 0,
        }
    }

    #[test]
    fn lists_only_direct_children_in_insertion_order() {
        let session = MemorySession::with_root("root");
        session.insert_folder(folder("b", "root"));
        session.insert_folder(folder("a", "root"));
        session.insert_folder(folder("nested", "a"));

        let content = tokio_test::block_on(session.get_directory_content("root")).unwrap();
        let uuids: Vec<_> = content.folders.iter().map(|f| f.uuid.as_str()).collect();
        assert_eq!(uuids, vec!["b", "a"]);
        assert_eq!(session.listing_requests(), 1);
    }

    #[test]
    fn listing_unknown_directory_fails() {
        let session = MemorySession::with_root("root");
        assert!(tokio_test::block_on(session.get_directory_content("nope")).is_err());
    }

    #[test]
    fn create_budget_injects_failures() {
        let session = MemorySession::with_root("root");
        session.fail_creates_after(1);

        assert!(tokio_test::block_on(session.create_directory("d1", "n", "h", "root")).is_ok());
        assert!(tokio_test::block_on(session.create_directory("d2", "n", "h", "root")).is_err());

        session.allow_creates();
        assert!(tokio_test::block_on(session.create_directory("d2", "n", "h", "d1")).is_ok());
        assert_eq!(session.created_directories(), 2);
        assert_eq!(session.name_hash("d2").as_deref(), Some("h"));
    }

    #[test]
    fn create_under_missing_parent_fails() {
        let session = MemorySession::with_root("root");
        assert!(tokio_test::block_on(session.create_directory("d", "n", "h", "ghost")).is_err());
        assert_eq!(session.created_directories(), 0);
    }

    #[test]
    fn trash_removes_entries() {
        let session = MemorySession::with_root("root");
        session.insert_folder(folder("d", "root"));

        tokio_test::block_on(session.trash_directory("d")).unwrap();
        assert!(tokio_test::block_on(session.trash_directory("d")).is_err());
        assert!(tokio_test::block_on(session.trash_file("missing")).is_err());
    }
}
