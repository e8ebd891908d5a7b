//! Error types for interface API operations.
//!
//! All errors implement `std::error::Error` via `thiserror`. Validation
//! errors are raised before any command is sent, so a failed call never
//! leaves a partial config push behind; transport errors are surfaced
//! unmodified and never retried at this layer.

use spytest_types::{Dialect, ParseError};
use thiserror::Error;

/// Result type alias for interface API operations.
pub type IntfResult<T> = Result<T, IntfError>;

/// Opaque failure reported by the transport collaborator.
///
/// Timeouts, malformed responses and connection losses all arrive here;
/// retry policy belongs to the caller or the transport itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failure during {operation}: {message}")]
pub struct TransportError {
    /// The transport verb that failed (e.g., "show", "config", "rest-get").
    pub operation: String,
    /// Collaborator-supplied detail.
    pub message: String,
}

impl TransportError {
    /// Creates a transport error.
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur during interface API operations.
#[derive(Debug, Error)]
pub enum IntfError {
    /// Dialect token resolved from the device matches none of the known
    /// surfaces. Fatal for the current operation, not retryable.
    #[error("unsupported dialect token '{token}'")]
    UnsupportedDialect {
        /// The unrecognized token.
        token: String,
    },

    /// Property not implemented for the resolved dialect.
    #[error("property '{property}' is not supported via {dialect}")]
    UnsupportedProperty {
        /// The property name.
        property: String,
        /// The dialect it was requested on.
        dialect: Dialect,
    },

    /// Value outside the enumerated legal set. Raised before any
    /// transport I/O.
    #[error("invalid value for {field}: {message}")]
    InvalidParameter {
        /// The parameter that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// The device datastore has no REST URL template for this endpoint.
    #[error("no REST URL template for '{key}'")]
    MissingRestUrl {
        /// The datastore key.
        key: String,
    },

    /// Name or token parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Opaque transport failure, surfaced unmodified.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl IntfError {
    /// Creates an unsupported dialect error.
    pub fn unsupported_dialect(token: impl Into<String>) -> Self {
        Self::UnsupportedDialect {
            token: token.into(),
        }
    }

    /// Creates an unsupported property error.
    pub fn unsupported_property(property: impl Into<String>, dialect: Dialect) -> Self {
        Self::UnsupportedProperty {
            property: property.into(),
            dialect,
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a missing REST URL error.
    pub fn missing_rest_url(key: impl Into<String>) -> Self {
        Self::MissingRestUrl { key: key.into() }
    }

    /// Returns true if this error was raised by pre-send validation,
    /// guaranteeing no command reached the device.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            IntfError::UnsupportedDialect { .. }
                | IntfError::UnsupportedProperty { .. }
                | IntfError::InvalidParameter { .. }
                | IntfError::MissingRestUrl { .. }
                | IntfError::Parse(_)
        )
    }
}
