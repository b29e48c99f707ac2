//! Anonymous session handling.
//!
//! A session is an HMAC-signed token holding an identity id, kept by the
//! client in a cookie. [`SessionManager`](manager::SessionManager) turns the
//! cookie into a "current identity", provisioning one on demand.

pub mod codec;
pub mod cookie;
pub mod manager;
