//! cloak-drive: hierarchical paths over a flat, encrypted remote drive
//!
//! The service only knows items by UUID and parent UUID, and every item name
//! is sealed metadata. This crate rebuilds `/`-separated paths on top of that:
//!
//!   - `listing`: fetch one directory's children and decrypt them
//!   - `resolve`: walk a path segment by segment from the account root
//!   - `create`: create directories (including whole paths) and trash items
//!
//! Nothing is cached. Each path segment costs one listing request, and the
//! remote drive is the only source of truth.

pub mod create;
pub mod drive;
pub mod listing;
pub mod memory;
pub mod resolve;
pub mod session;

pub use drive::Drive;
pub use listing::Listing;
pub use memory::MemorySession;
pub use session::{
    BaseFolder, CreatedDirectory, DirectoryContent, FolderEntry, RemoteSession, UploadEntry,
};
