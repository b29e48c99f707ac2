//! Infrastructure layer for Murmur.
//!
//! Contains implementations of the ports defined in `murmur-core`: SQLite
//! storage, the HS256 session token codec, and the configuration loader.

pub mod config;
pub mod crypto;
pub mod sqlite;
