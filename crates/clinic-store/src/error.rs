//! Error types for the clinic store
//!
//! Every credential and record operation returns one of these kinds; nothing
//! unstructured crosses into the presentation layer. Notification failures
//! are deliberately absent — they surface as warnings on a successful
//! outcome, never as an operation error.

use clinic_model::Role;

/// Main store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Email already registered
    #[error("account already registered: {0}")]
    DuplicateAccount(String),

    /// Email does not end with the required organizational domain
    #[error("email domain not accepted: {0}")]
    InvalidDomain(String),

    /// Unknown email or wrong password, deliberately indistinguishable
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Role/ownership check failed
    #[error("operation not permitted for role {role}")]
    Forbidden {
        /// Role of the requesting session
        role: Role,
    },

    /// Referenced id absent
    #[error("record not found: {0}")]
    NotFound(String),

    /// Malformed field value or disallowed state change
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// Underlying storage failure
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl StoreError {
    /// Check if the error is an authorization failure
    #[inline]
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }

    /// Check if the error reports caller input as invalid
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationFailed(_))
    }

    /// Create a forbidden error for the given role
    #[inline]
    #[must_use]
    pub fn forbidden(role: Role) -> Self {
        Self::Forbidden { role }
    }
}

/// Storage backend errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem I/O failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted table could not be decoded
    #[error("corrupt table {table}: {source}")]
    Corrupt {
        /// Logical table name
        table: &'static str,
        /// Decoding failure
        source: serde_json::Error,
    },

    /// Snapshot could not be encoded
    #[error("encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}
