//! BrowsQ Storage Layer
//!
//! Bookmarks live in a single JSON file mapping URL to title.
//! The file is read in full at startup and rewritten in full on every change.

mod bookmarks;
mod error;

pub use bookmarks::{Bookmark, BookmarkStore};
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
