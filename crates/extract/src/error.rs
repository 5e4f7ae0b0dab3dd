//! Error types for extraction
//!
//! Lookup misses on finished tables and selects are `Option`s, not errors.

use dom::DomError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid node: {0}")]
    InvalidNode(String),

    #[error("Missing attribute '{key}'")]
    MissingAttribute { key: String },

    #[error("Missing text content: {0}")]
    MissingContent(String),

    #[error(transparent)]
    Dom(#[from] DomError),
}
