use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a tab style.
#[derive(Error, Debug)]
pub enum StyleError {
    /// Style file was not found or could not be read.
    #[error("Failed to read style file {path:?}: {source}")]
    Read {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Error parsing style content.
    #[error("Failed to parse style: {details}")]
    Parse {
        /// Details about the parse error.
        details: String,
    },
}

/// Result type alias for style operations.
pub type StyleResult<T> = Result<T, StyleError>;

impl StyleError {
    /// Create a parse error.
    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::Parse {
            details: details.into(),
        }
    }
}
