//! HS256 JWT session token codec.
//!
//! Implements the `SessionTokenCodec` trait from `murmur-core` using the
//! `jsonwebtoken` crate. Tokens carry `{ id, iat }`; `iat` makes tokens
//! differ across calls but is not validated. There is no `exp` claim:
//! session lifetime is bounded by the cookie's max-age.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use murmur_core::session::codec::SessionTokenCodec;
use murmur_types::error::TokenError;
use murmur_types::identity::SessionTokenPayload;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: i64,
    #[serde(default)]
    iat: i64,
}

/// JWT implementation of `SessionTokenCodec`, keyed by a shared secret.
pub struct JwtSessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionCodec {
    /// Build a codec from the process-wide signing secret.
    ///
    /// Returns [`TokenError::InvalidKey`] for an empty secret.
    pub fn new(secret: &SecretString) -> Result<Self, TokenError> {
        let secret = secret.expose_secret().as_bytes();
        if secret.is_empty() {
            return Err(TokenError::InvalidKey);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }
}

impl SessionTokenCodec for JwtSessionCodec {
    fn encode(&self, payload: &SessionTokenPayload) -> Result<String, TokenError> {
        let claims = Claims {
            id: payload.id,
            iat: chrono::Utc::now().timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<SessionTokenPayload, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "session token rejected");
                TokenError::InvalidSignature
            })?;
        Ok(SessionTokenPayload { id: data.claims.id })
    }
}
