//! # Error Types
//!
//! The pager has no I/O in its core, so [PagerError] only describes broken
//! caller contracts. [ConfigError] covers loading [PagerConfig](crate::config::PagerConfig).

use std::path::PathBuf;
use thiserror::Error;

/// Contract violations reported by the pager.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PagerError {
    /// An index outside `0..count` was passed to a selection or per-tab setter.
    #[error("Index {index} is out of range for {count} pages")]
    IndexOutOfRange {
        /// The index that was passed.
        index: usize,
        /// The number of pages at the time of the call.
        count: usize,
    },

    /// A selection was requested while the pager holds no pages.
    #[error("The pager has no pages")]
    EmptyPages,

    /// Someone other than the pager tried to observe its scroll view.
    #[error("Scroll view is already observed by {owner}; {intruder} may not replace it")]
    ForeignScrollObserver {
        /// The registered owner.
        owner: u64,
        /// The id that attempted to register.
        intruder: u64,
    },
}

/// Result type alias for pager operations.
pub type PagerResult<T> = Result<T, PagerError>;

impl PagerError {
    /// Create an index out of range error.
    pub fn out_of_range(index: usize, count: usize) -> Self {
        Self::IndexOutOfRange { index, count }
    }

    /// Validate `index` against `count`.
    pub fn check_index(index: usize, count: usize) -> PagerResult<()> {
        if count == 0 {
            Err(Self::EmptyPages)
        } else if index >= count {
            Err(Self::out_of_range(index, count))
        } else {
            Ok(())
        }
    }
}

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a configuration file.
    #[error("Failed to parse config {path:?}: {details}")]
    Parse {
        /// The file that failed to parse, if the content came from a file.
        path: Option<PathBuf>,
        /// Details about the parse error.
        details: String,
    },

    /// A value was parsed but is not usable.
    #[error("Invalid value for '{field}': {reason}")]
    Invalid {
        /// The offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create a parse error.
    pub fn parse_error(path: Option<PathBuf>, details: impl Into<String>) -> Self {
        Self::Parse {
            path,
            details: details.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_index() {
        assert_eq!(PagerError::check_index(0, 0), Err(PagerError::EmptyPages));
        assert_eq!(PagerError::check_index(2, 3), Ok(()));
        assert_eq!(
            PagerError::check_index(3, 3),
            Err(PagerError::IndexOutOfRange { index: 3, count: 3 })
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PagerError::out_of_range(5, 2).to_string(),
            "Index 5 is out of range for 2 pages"
        );
        assert_eq!(
            ConfigError::invalid("tab_strip_height", "must be finite").to_string(),
            "Invalid value for 'tab_strip_height': must be finite"
        );
    }
}
