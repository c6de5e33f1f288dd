//! Error types for I/O operations.
//!
//! Every decode and export entry point returns [`IoResult`]. Decoders are
//! all-or-nothing: on any error no raster is returned and every buffer
//! allocated so far has already been dropped.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File could not be opened or created.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        /// Path that failed.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Unrecognized magic or malformed header.
    #[error("format error: {0}")]
    Format(String),

    /// Sample count in the body does not match the header.
    #[error("truncated data: expected {expected} samples, got {actual}")]
    Truncated {
        /// Samples required by the header.
        expected: usize,
        /// Samples actually present.
        actual: usize,
    },

    /// Sample buffer could not be allocated.
    #[error("failed to allocate {requested} bytes")]
    Allocation {
        /// Bytes requested.
        requested: usize,
    },

    /// Read or write failure on an open stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Coarse error category, for callers that branch on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// File missing or unopenable.
    NotFound,
    /// Unrecognized magic or malformed header.
    Format,
    /// Sample count mismatch.
    Truncated,
    /// Buffer allocation failed.
    Allocation,
    /// Stream error after the file was opened.
    Io,
}

impl IoError {
    /// Creates an [`IoError::Open`] error.
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Open { .. } => ErrorKind::NotFound,
            Self::Format(_) => ErrorKind::Format,
            Self::Truncated { .. } => ErrorKind::Truncated,
            Self::Allocation { .. } => ErrorKind::Allocation,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<edgemap_core::Error> for IoError {
    fn from(err: edgemap_core::Error) -> Self {
        match err {
            edgemap_core::Error::AllocationFailed { requested, .. } => Self::Allocation { requested },
            other => Self::Format(other.to_string()),
        }
    }
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
