//! BrowsQ Navigation
//!
//! Address bar input resolution:
//!   1. `http://` / `https://` prefix → navigate as typed
//!   2. no `.` in the last path segment → web search
//!   3. anything else → navigate to `https://` + input

mod error;
mod input;

pub use error::NavigationError;
pub use input::{InputResolver, NavigationIntent, DEFAULT_SEARCH_HOST};

pub type Result<T> = std::result::Result<T, NavigationError>;
