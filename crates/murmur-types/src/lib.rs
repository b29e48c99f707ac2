//! Shared domain types for Murmur.
//!
//! This crate contains the core domain types used across the Murmur service:
//! Identity, session token payloads, Message and its query options, valence
//! categories, configuration, and the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod identity;
pub mod message;
pub mod query;
pub mod valence;
