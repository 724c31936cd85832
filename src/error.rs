//! Error types for the punctuation analysis library.
//!
//! Argument errors are raised before any file is opened. I/O failures on the
//! source or the rendered document abort the whole operation. Malformed
//! mapping entries are the one recoverable kind: the counting stage logs them
//! and keeps going.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for analysis and rendering operations.
pub type PuncResult<T> = Result<T, PuncError>;

/// Error type for all analysis and rendering operations.
#[derive(Debug, Error)]
pub enum PuncError {
    /// Missing or malformed path, options of an unsupported shape,
    /// unknown encoding label
    #[error("Invalid argument '{parameter}': {reason}")]
    InvalidArgument { parameter: String, reason: String },

    /// The input could not be opened or a read failed mid-stream
    #[error("Source unavailable '{}': {source}", path.display())]
    SourceUnavailable { path: PathBuf, source: io::Error },

    /// The rendered document could not be created or written
    #[error("Destination unwritable '{}': {source}", path.display())]
    DestinationUnwritable { path: PathBuf, source: io::Error },

    /// A caller-supplied count that is not a non-negative integer.
    ///
    /// Never returned from a run; the counter logs it and heals the entry.
    #[error("Malformed mapping entry for '{key}': {value}")]
    MalformedMappingEntry { key: String, value: String },

    /// The PDF backend rejected the document
    #[error("Render error: {message}")]
    Render {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PuncError {
    pub(crate) fn invalid_argument(parameter: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter: parameter.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn source_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn destination_unwritable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DestinationUnwritable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn render<E>(message: &str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Render {
            message: format!("{}: {}", message, source),
            source: Some(Box::new(source)),
        }
    }

    /// Returns true for argument errors raised before any I/O.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns true when the input could not be read.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}
