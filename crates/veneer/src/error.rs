use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for the toolkit crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the toolkit.
#[derive(Debug, Error)]
pub enum Error {
    /// A document operation referenced a missing node or an invalid hierarchy.
    #[error("Document error: {0}")]
    Dom(#[from] dom::Error),

    /// Configuration could not be loaded or validated.
    #[error("Config error: {0}")]
    Config(#[from] config::Error),

    /// A settings schema could not be decoded.
    #[error("Invalid settings schema: {0}")]
    Schema(String),

    /// A host service call failed.
    #[error("Host service error: {0}")]
    Host(String),
}
