//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] browsq_storage::StorageError),

    #[error("Tab error: {0}")]
    Tab(#[from] browsq_tabs::TabError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] browsq_navigation::NavigationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
