//! BrowsQ Core
//!
//! Coordination layer for one browser window: the navigation controller keeps
//! the address bar, padlock and window title in step with the active tab,
//! and the [`Browser`] turns toolbar / tab strip / bookmark bar actions into
//! commands.

mod app;
mod browser;
mod config;
mod controller;
mod error;
mod presenter;

pub use app::Application;
pub use browser::Browser;
pub use config::Config;
pub use controller::NavigationController;
pub use error::CoreError;
pub use presenter::{Presenter, RecordingPresenter};

// Re-export core components
pub use browsq_navigation::{InputResolver, NavigationError, NavigationIntent};
pub use browsq_session::{
    Engine, EngineFactory, EventQueue, HeadlessEngine, HeadlessEngineFactory, PageSession,
    SessionEvent, SessionEventKind, SessionId, SessionNotifier,
};
pub use browsq_storage::{Bookmark, BookmarkStore, StorageError};
pub use browsq_tabs::{Tab, TabCollection, TabError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
