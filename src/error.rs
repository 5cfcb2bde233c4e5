//! Error types for blockdoc library.
//!
//! Block-level problems never surface here: malformed nodes degrade to
//! fallback blocks inside the parser. Only document-level contract
//! violations and I/O or JSON failures are reported as errors.

use std::io;
use thiserror::Error;

/// Result type alias for blockdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while assembling or reading documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input text is not valid JSON, or does not have the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Both `pages` and `currentPageBody` were supplied.
    #[error("An article must supply either `pages` or `currentPageBody`, not both")]
    BodyConflict,

    /// Neither `pages` nor `currentPageBody` was supplied.
    #[error("An article must supply `pages` or `currentPageBody`")]
    MissingBody,

    /// A page entry is invalid (zero or duplicate page number).
    #[error("Invalid page: {0}")]
    InvalidPage(String),

    /// The article title is empty or whitespace.
    #[error("Article title must not be empty")]
    EmptyTitle,

    /// The input has the wrong top-level shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error during rendering (JSON output).
    #[error("Rendering error: {0}")]
    Render(String),
}
