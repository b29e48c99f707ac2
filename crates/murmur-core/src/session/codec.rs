//! SessionTokenCodec trait for signing and verifying session payloads.
//!
//! Defined in murmur-core so the session manager can issue tokens without
//! coupling to a specific signing scheme. The JWT adapter lives in
//! murmur-infra.

use murmur_types::error::TokenError;
use murmur_types::identity::SessionTokenPayload;

/// Signs and verifies [`SessionTokenPayload`]s with a process-wide secret.
///
/// Implementations must guarantee `decode(encode(p)) == p` and must reject
/// any token whose signature does not verify with
/// [`TokenError::InvalidSignature`]. Tokens need not be byte-stable across
/// calls.
pub trait SessionTokenCodec: Send + Sync {
    fn encode(&self, payload: &SessionTokenPayload) -> Result<String, TokenError>;

    fn decode(&self, token: &str) -> Result<SessionTokenPayload, TokenError>;
}
