//! Error types for the junction library.
//!
//! This module provides the error hierarchy for all namespace engine and
//! registration store operations, using `thiserror` for ergonomic error
//! handling.

use thiserror::Error;

/// Result type alias for operations that may fail with a junction error.
///
/// # Examples
///
/// ```
/// use junction::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the junction library.
///
/// This enum encompasses all failure conditions of the namespace engine
/// (codec, resolution, comparison) and of the registration store.
#[derive(Debug, Error)]
pub enum Error {
    /// A byte sequence could not be decoded into an identifier list.
    #[error("malformed identifier list at byte {offset}: {reason}")]
    MalformedIdentifier {
        /// Byte offset at which decoding failed.
        offset: usize,
        /// The reason the bytes could not be decoded.
        reason: String,
    },

    /// An identifier list is structurally valid but unusable in context.
    #[error("invalid identifier list: {reason}")]
    InvalidIdentifierList {
        /// The reason the list is unusable.
        reason: String,
    },

    /// A tree operation was attempted before root initialization.
    #[error("extension instance not initialized")]
    NotInitialized,

    /// Root initialization was attempted more than once.
    #[error("extension instance already initialized")]
    AlreadyInitialized,

    /// A lookup during bind or name resolution found no matching child.
    #[error("not found: {resource}")]
    NotFound {
        /// The segment or resource that was not found.
        resource: String,
    },

    /// A non-terminal hop of a bind resolved to an item rather than a folder.
    #[error("not a folder: {name}")]
    NotAFolder {
        /// Display name of the node that blocked the descent.
        name: String,
    },

    /// An optional capability is not implemented by the node.
    ///
    /// Callers must be able to distinguish "not supported" from "failed",
    /// so this is never folded into `NotFound`.
    #[error("unsupported: {what}")]
    Unsupported {
        /// The capability that is not supported.
        what: String,
    },

    /// A mount point is already claimed by a different extension identity.
    #[error("registration conflict: {details}")]
    RegistrationConflict {
        /// Details about the conflicting entry.
        details: String,
    },

    /// A registration store error occurred.
    #[error("registration store error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl From<crate::idlist::InvalidIdentifierError> for Error {
    fn from(err: crate::idlist::InvalidIdentifierError) -> Self {
        Self::Validation {
            field: "identifier".to_string(),
            message: err.reason,
        }
    }
}

impl Error {
    /// Check if this error indicates a lookup miss.
    ///
    /// # Examples
    ///
    /// ```
    /// use junction::Error;
    ///
    /// let err = Error::NotFound { resource: "Alpha".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error indicates an unsupported capability.
    ///
    /// # Examples
    ///
    /// ```
    /// use junction::Error;
    ///
    /// let err = Error::Unsupported { what: "detail column 3".to_string() };
    /// assert!(err.is_unsupported());
    /// ```
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Check if this error indicates a registration conflict.
    #[must_use]
    pub fn is_registration_conflict(&self) -> bool {
        matches!(self, Self::RegistrationConflict { .. })
    }
}
