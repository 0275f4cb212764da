//! Handlers that touch the served directory.

pub mod download;
pub mod fallback;
pub mod listing;
pub mod size;
pub mod upload;

pub use listing::{EntryKind, FileEntry};
pub use size::format_size;
pub use upload::UploadOutcome;
