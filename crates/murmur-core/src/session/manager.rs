//! Session manager.
//!
//! Resolves the current identity from the request's session cookie. Every
//! request starts from scratch: no cookie means unauthenticated, a verified
//! cookie means authenticated.
//!
//! A missing cookie is not an error. A cookie that fails verification is,
//! and is reported as [`AuthorizationError`] wrapping the codec failure.
//!
//! Two concurrent first-contact requests may both provision an identity.
//! Nothing here deduplicates that window.

use murmur_types::error::AuthorizationError;
use murmur_types::identity::SessionTokenPayload;

use crate::repository::user::UserRepository;
use crate::service::user::UserProvisioningService;
use crate::session::codec::SessionTokenCodec;
use crate::session::cookie::SessionCookieStore;

pub struct SessionManager<C: SessionTokenCodec, U: UserRepository> {
    codec: C,
    users: UserProvisioningService<U>,
}

impl<C: SessionTokenCodec, U: UserRepository> SessionManager<C, U> {
    pub fn new(codec: C, users: UserProvisioningService<U>) -> Self {
        Self { codec, users }
    }

    pub fn users(&self) -> &UserProvisioningService<U> {
        &self.users
    }

    /// Id of the identity attached to the session, if any.
    pub fn current_user_id<S: SessionCookieStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<Option<i64>, AuthorizationError> {
        let Some(token) = store.read().filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let payload = self.codec.decode(&token).map_err(|e| {
            tracing::warn!(error = %e, "rejected session cookie");
            AuthorizationError::wrap(e)
        })?;

        Ok(Some(payload.id))
    }

    /// Like [`current_user_id`](Self::current_user_id), but absence is an error.
    pub fn current_user_id_required<S: SessionCookieStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<i64, AuthorizationError> {
        self.current_user_id(store)?
            .ok_or_else(AuthorizationError::missing_identity)
    }

    /// Return the session's identity, provisioning one when there is none.
    pub async fn get_or_create_user_id<S: SessionCookieStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<i64, AuthorizationError> {
        match self.current_user_id(store)? {
            Some(id) => Ok(id),
            None => self.set_new_user_id(store).await,
        }
    }

    /// Provision a new identity and bind it to the session cookie.
    pub async fn set_new_user_id<S: SessionCookieStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<i64, AuthorizationError> {
        let identity = self.users.create().await.map_err(AuthorizationError::wrap)?;
        if identity.id <= 0 {
            return Err(AuthorizationError::unusable_identity(identity.id));
        }

        let token = self
            .codec
            .encode(&SessionTokenPayload::from(&identity))
            .map_err(AuthorizationError::wrap)?;
        store.write(token);

        tracing::debug!(user_id = identity.id, "session cookie issued");
        Ok(identity.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeCodec, InMemoryUserRepository, MemoryCookies};
    use murmur_types::error::{RepositoryError, TokenError};

    fn manager(users: InMemoryUserRepository) -> SessionManager<FakeCodec, InMemoryUserRepository> {
        SessionManager::new(FakeCodec, UserProvisioningService::new(users))
    }

    #[test]
    fn test_no_cookie_is_unauthenticated() {
        let sessions = manager(InMemoryUserRepository::default());
        let cookies = MemoryCookies::default();
        assert_eq!(sessions.current_user_id(&cookies).unwrap(), None);
    }

    #[test]
    fn test_empty_cookie_is_unauthenticated() {
        let sessions = manager(InMemoryUserRepository::default());
        let cookies = MemoryCookies::with_token("");
        assert_eq!(sessions.current_user_id(&cookies).unwrap(), None);
    }

    #[test]
    fn test_valid_cookie_resolves_id() {
        let sessions = manager(InMemoryUserRepository::default());
        let cookies = MemoryCookies::with_token(&FakeCodec.encode(&SessionTokenPayload { id: 9 }).unwrap());
        assert_eq!(sessions.current_user_id(&cookies).unwrap(), Some(9));
        assert_eq!(sessions.current_user_id_required(&cookies).unwrap(), 9);
    }

    #[test]
    fn test_corrupt_cookie_is_an_error_with_cause() {
        let sessions = manager(InMemoryUserRepository::default());
        let cookies = MemoryCookies::with_token("tampered");
        let err = sessions.current_user_id(&cookies).unwrap_err();
        assert_eq!(err.cause::<TokenError>(), Some(&TokenError::InvalidSignature));
    }

    #[test]
    fn test_required_fails_without_cookie() {
        let sessions = manager(InMemoryUserRepository::default());
        let err = sessions
            .current_user_id_required(&MemoryCookies::default())
            .unwrap_err();
        assert!(!err.has_cause());
    }

    #[tokio::test]
    async fn test_get_or_create_provisions_once() {
        let sessions = manager(InMemoryUserRepository::default());
        let mut cookies = MemoryCookies::default();

        let first = sessions.get_or_create_user_id(&mut cookies).await.unwrap();
        assert_eq!(cookies.writes, 1);
        let second = sessions.get_or_create_user_id(&mut cookies).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(cookies.writes, 1);
        assert_eq!(sessions.users().find(first).await.unwrap().map(|i| i.id), Some(first));
    }

    #[tokio::test]
    async fn test_get_or_create_rejects_corrupt_cookie() {
        let users = InMemoryUserRepository::default();
        let sessions = manager(users);
        let mut cookies = MemoryCookies::with_token("garbage");
        assert!(sessions.get_or_create_user_id(&mut cookies).await.is_err());
        assert_eq!(cookies.writes, 0);
    }

    #[tokio::test]
    async fn test_set_new_user_id_writes_verifiable_cookie() {
        let sessions = manager(InMemoryUserRepository::default());
        let mut cookies = MemoryCookies::default();
        let id = sessions.set_new_user_id(&mut cookies).await.unwrap();
        let token = cookies.read().unwrap();
        assert_eq!(FakeCodec.decode(&token).unwrap().id, id);
    }

    #[tokio::test]
    async fn test_first_contacts_are_not_deduplicated() {
        let sessions = manager(InMemoryUserRepository::default());
        let mut a = MemoryCookies::default();
        let mut b = MemoryCookies::default();
        let id_a = sessions.get_or_create_user_id(&mut a).await.unwrap();
        let id_b = sessions.get_or_create_user_id(&mut b).await.unwrap();
        assert_ne!(id_a, id_b);
    }

    #[tokio::test]
    async fn test_provisioning_failure_is_wrapped() {
        let sessions = manager(InMemoryUserRepository::failing());
        let mut cookies = MemoryCookies::default();
        let err = sessions.set_new_user_id(&mut cookies).await.unwrap_err();
        assert!(err.cause::<RepositoryError>().is_some());
        assert_eq!(cookies.writes, 0);
    }

    #[tokio::test]
    async fn test_unusable_provisioned_id_is_rejected() {
        let sessions = manager(InMemoryUserRepository::with_forced_id(0));
        let mut cookies = MemoryCookies::default();
        assert!(sessions.set_new_user_id(&mut cookies).await.is_err());
        assert!(cookies.read().is_none());
    }
}
