//! Raw list/search options as supplied by callers.
//!
//! Nothing here is validated. `murmur-core` turns these options into a bounded
//! `QuerySpec`, silently dropping filters it does not recognise.

use serde::{Deserialize, Serialize};

/// Sort key names accepted by message listings.
pub const SORT_CREATED_AT_DESC: &str = "CREATED_AT_DESC";
pub const SORT_CREATED_AT_ASC: &str = "CREATED_AT_ASC";

/// Caller-supplied filters. Values are untyped so that invalid input can be
/// dropped rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageFilters {
    #[serde(default, rename = "userId", alias = "user_id")]
    pub user_id: Option<serde_json::Value>,
    #[serde(default, rename = "type")]
    pub message_type: Option<String>,
}

/// Filter, sort, and pagination input for message listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexQueryOptions {
    #[serde(default)]
    pub filters: MessageFilters,
    /// Ordered sort key names; later keys break ties of earlier ones.
    #[serde(default)]
    pub sort: Vec<String>,
    /// 1-based page number.
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl IndexQueryOptions {
    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    pub fn with_sort<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sort = keys.into_iter().map(Into::into).collect();
        self
    }
}
