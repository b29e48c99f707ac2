//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (murmur-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod message;
pub mod query;
pub mod user;

use serde::Serialize;

/// Sort order for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}
