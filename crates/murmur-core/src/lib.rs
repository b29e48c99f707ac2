//! Business logic and repository trait definitions for Murmur.
//!
//! This crate defines the "ports" (repository, codec, and cookie traits) that
//! the infrastructure and API layers implement. It depends only on
//! `murmur-types` -- never on `murmur-infra` or any database/IO crate.

pub mod repository;
pub mod service;
pub mod session;
pub mod valence;

#[cfg(test)]
pub(crate) mod testing;
