pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use error::{CloakError, CloakResult};
pub use types::{ContentKey, Directory, File, Item};
