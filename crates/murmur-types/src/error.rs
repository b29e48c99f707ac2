use std::error::Error as StdError;

use thiserror::Error;

/// Boxed lower-level failure carried by [`AuthorizationError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// The single failure kind of the session layer.
///
/// Raised when a stored token cannot be verified or parsed, when a required
/// identity is absent, or when provisioning does not yield a usable id. When
/// it wraps a lower-level failure the cause is kept in `source`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AuthorizationError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl AuthorizationError {
    /// No identity is attached to the current session.
    pub fn missing_identity() -> Self {
        Self {
            message: "no authenticated identity".to_string(),
            source: None,
        }
    }

    /// Provisioning returned an id that cannot be used as a session subject.
    pub fn unusable_identity(id: i64) -> Self {
        Self {
            message: format!("provisioned identity id {id} is not usable"),
            source: None,
        }
    }

    /// Wrap a lower-level failure.
    pub fn wrap<E>(cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        let cause = cause.into();
        Self {
            message: format!("authorization failed: {cause}"),
            source: Some(cause),
        }
    }

    /// Whether this error wraps an underlying cause.
    pub fn has_cause(&self) -> bool {
        self.source.is_some()
    }

    /// Downcast the wrapped cause, if any, to a concrete error type.
    pub fn cause<E: StdError + 'static>(&self) -> Option<&E> {
        self.source.as_deref().and_then(|e| e.downcast_ref::<E>())
    }
}

/// Errors from signing or verifying session tokens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token signature")]
    InvalidSignature,

    #[error("token encoding failed: {0}")]
    Encode(String),

    #[error("invalid signing key")]
    InvalidKey,
}

/// Errors from repository operations (used by trait definitions in murmur-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}
