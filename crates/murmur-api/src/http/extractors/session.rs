//! Cookie-backed session store extractor.
//!
//! Extracting [`CookieSessionStore`] reads the request's cookies. Handlers
//! that may issue a session return [`CookieSessionStore::into_jar`] as part of
//! the response so that a written cookie reaches the client.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar};

use murmur_core::session::cookie::{
    SESSION_COOKIE_MAX_AGE_SECS, SESSION_COOKIE_NAME, SessionCookieStore,
};

use crate::state::AppState;

/// The `auth-token` cookie of one request.
pub struct CookieSessionStore {
    jar: CookieJar,
    secure: bool,
}

impl CookieSessionStore {
    /// `secure` sets the `Secure` attribute on written cookies.
    pub fn new(jar: CookieJar, secure: bool) -> Self {
        Self { jar, secure }
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl SessionCookieStore for CookieSessionStore {
    fn read(&self) -> Option<String> {
        self.jar
            .get(SESSION_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
    }

    fn write(&mut self, token: String) {
        let cookie = Cookie::build((SESSION_COOKIE_NAME, token))
            .http_only(true)
            .secure(self.secure)
            .max_age(time::Duration::seconds(SESSION_COOKIE_MAX_AGE_SECS))
            .path("/");
        self.jar = std::mem::take(&mut self.jar).add(cookie);
    }
}

impl FromRequestParts<AppState> for CookieSessionStore {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Self::new(jar, state.config.environment.is_production()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;
    use axum::http::header::COOKIE;
    use axum::response::IntoResponse;

    #[test]
    fn test_read_absent() {
        let store = CookieSessionStore::new(CookieJar::new(), false);
        assert!(store.read().is_none());
    }

    #[test]
    fn test_read_from_request_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "theme=dark; auth-token=abc.def.ghi".parse().unwrap());
        let store = CookieSessionStore::new(CookieJar::from_headers(&headers), false);
        assert_eq!(store.read().as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_write_sets_cookie_attributes() {
        let mut store = CookieSessionStore::new(CookieJar::new(), true);
        store.write("tok".to_string());
        assert_eq!(store.read().as_deref(), Some("tok"));

        let response = store.into_jar().into_response();
        let set_cookie = response
            .headers()
            .get(axum::http::header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(set_cookie.starts_with("auth-token=tok"));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("Secure"));
        assert!(set_cookie.contains("Path=/"));
        assert!(set_cookie.contains("Max-Age=2592000"));
    }

    #[test]
    fn test_write_without_secure_flag() {
        let mut store = CookieSessionStore::new(CookieJar::new(), false);
        store.write("tok".to_string());
        let response = store.into_jar().into_response();
        let set_cookie = response
            .headers()
            .get(axum::http::header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(!set_cookie.contains("Secure"));
    }
}
