//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Invalid search host: {0}")]
    InvalidSearchHost(String),
}
