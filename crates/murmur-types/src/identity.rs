//! Anonymous identity and the signed session payload that points at it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The durable owner record created on first contact.
///
/// Immutable after creation and never deleted by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub created_at: DateTime<Utc>,
}

/// Signed view of an [`Identity`] id, rebuilt from the cookie on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokenPayload {
    pub id: i64,
}

impl From<&Identity> for SessionTokenPayload {
    fn from(identity: &Identity) -> Self {
        Self { id: identity.id }
    }
}
