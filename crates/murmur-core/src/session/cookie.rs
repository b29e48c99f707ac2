//! Client-held session token storage.

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "auth-token";

/// Cookie lifetime: thirty days.
pub const SESSION_COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 30;

/// Reads and writes the signed session token on the client.
///
/// One instance lives per request. A missing token is a normal outcome.
/// Writers must mark the value HTTP-only, site-wide, retained for
/// [`SESSION_COOKIE_MAX_AGE_SECS`], and secure-only in production.
pub trait SessionCookieStore {
    fn read(&self) -> Option<String>;

    fn write(&mut self, token: String);
}
