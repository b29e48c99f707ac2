//! Cryptographic operations for Murmur.
//!
//! - `token`: HS256-signed session tokens

pub mod token;
