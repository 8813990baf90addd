//! Error types for the jnrgen-core library.
//!
//! This module provides error handling using the `thiserror` crate, with a
//! hard split between run-fatal failures (I/O setup, constants that cannot
//! be represented) and declaration-local failures that the driver logs and
//! skips.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for jnrgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error type for all jnrgen operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read the input header
    #[error("failed to read header '{path}': {source}")]
    FileRead {
        /// Path to the header that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a generated unit
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the output directory
    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreate {
        /// Path to the directory that failed to create
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to remove a stale output directory
    #[error("failed to remove directory '{path}': {source}")]
    DirectoryRemove {
        /// Path to the directory that failed to remove
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The parser required a token of one kind but found another
    #[error("expected {expected} but found {found}")]
    UnexpectedToken {
        /// Description of the required token
        expected: String,
        /// Description of the token actually present
        found: String,
    },

    /// A struct field's C type could not be resolved against the symbol table
    #[error("unknown type: {name}")]
    UnknownType {
        /// The unresolved C type text
        name: String,
    },

    /// A `#define` literal that no supported numeric width can hold
    #[error("constant '{name}' exceeds 64 bits: {value}")]
    ConstantOverflow {
        /// The constant's C name
        name: String,
        /// The offending literal text
        value: String,
    },

    /// A `#define` literal that is not a recognizable integer
    #[error("constant '{name}' has an unparseable value: {value}")]
    InvalidLiteral {
        /// The constant's C name
        name: String,
        /// The offending literal text
        value: String,
    },

    /// A patch targeted a declaration it cannot apply to
    #[error("patch for '{target}' failed: {details}")]
    Patch {
        /// The exported type name the patch was registered against
        target: String,
        /// What went wrong
        details: String,
    },

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Creates a new header read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
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

    /// Creates a new directory creation error
    pub fn directory_create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreate {
            path: path.into(),
            source,
        }
    }

    /// Creates a new directory removal error
    pub fn directory_remove(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryRemove {
            path: path.into(),
            source,
        }
    }

    /// Creates a new unexpected-token error
    pub fn unexpected_token(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates a new unknown-type error
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    /// Creates a new constant-overflow error
    pub fn constant_overflow(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::ConstantOverflow {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a new invalid-literal error
    pub fn invalid_literal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a new patch error
    pub fn patch(target: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Patch {
            target: target.into(),
            details: details.into(),
        }
    }

    /// Creates a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this failure is local to one declaration and the run
    /// should log it and continue with the next declaration.
    ///
    /// Everything else (I/O setup, a constant no 64-bit type can hold) is
    /// run-fatal.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedToken { .. }
                | Self::UnknownType { .. }
                | Self::InvalidLiteral { .. }
                | Self::Patch { .. }
                | Self::FileWrite { .. }
        )
    }
}
