//! BrowsQ Tab Management
//!
//! An ordered list of tabs, each owning one page session, plus the index of
//! the active tab. There is always at least one tab once the window is up:
//! closing the last one is refused.

mod collection;
mod error;
mod tab;

pub use collection::TabCollection;
pub use error::TabError;
pub use tab::Tab;

pub type Result<T> = std::result::Result<T, TabError>;
