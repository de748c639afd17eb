//! Error types for the resbake-core library.
//!
//! Every I/O failure carries the path it happened on, so the CLI can report
//! a useful message without having to re-derive context.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for resbake operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all resbake operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to open or read an input resource
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create an output artifact
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        /// Path to the artifact that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write to an output artifact
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the artifact that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to query the filesystem identity of a file
    #[error("failed to query identity of '{path}': {source}")]
    FileIdentity {
        /// Path to the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or enumerate a directory
    #[error("failed to read directory '{path}': {source}")]
    DirectoryRead {
        /// Path to the directory
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The root to embed is not a directory
    #[error("'{path}' is not a directory")]
    NotADirectory {
        /// The offending root path
        path: PathBuf,
    },

    /// Rejected run configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file create error
    pub fn file_create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileCreate {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file write error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file identity error
    pub fn file_identity(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIdentity {
            path: path.into(),
            source,
        }
    }

    /// Creates a new directory read error
    pub fn directory_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new not-a-directory error
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Creates a new configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Returns true if this error was raised before any artifact was touched
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig(_) | Self::NotADirectory { .. })
    }
}
