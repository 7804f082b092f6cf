//! Tab error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TabError {
    #[error("Tab index {index} out of range ({len} tabs)")]
    OutOfRange { index: usize, len: usize },

    #[error("No tabs open")]
    EmptyCollection,
}
