//! Error types for letterpress-template

use thiserror::Error;

/// Result type alias for template operations
pub type Result<T> = std::result::Result<T, Error>;

/// Template error type
#[derive(Error, Debug)]
pub enum Error {
    /// Error from the underlying template engine
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Front matter block is malformed
    #[error("Invalid front matter: {0}")]
    FrontMatter(String),
}
