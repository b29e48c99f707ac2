//! Query parameter extractors for list endpoints.

use serde::Deserialize;

use murmur_types::query::{IndexQueryOptions, MessageFilters};

/// Query parameters for message list and count endpoints.
///
/// The owner filter is never taken from the query string; handlers pin it to
/// the session identity.
#[derive(Debug, Deserialize, Default)]
pub struct MessageListQuery {
    /// Message type filter (e.g. `USER_MESSAGE`). Unknown values are ignored.
    #[serde(rename = "type")]
    pub message_type: Option<String>,
    /// Comma-separated sort keys, e.g. `CREATED_AT_ASC`.
    pub sort: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size (capped at 1000).
    pub limit: Option<u32>,
}

impl MessageListQuery {
    /// Convert into listing options owned by `owner_id`.
    pub fn into_options(self, owner_id: i64) -> IndexQueryOptions {
        let sort = self
            .sort
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        IndexQueryOptions {
            filters: MessageFilters {
                user_id: Some(owner_id.into()),
                message_type: self.message_type,
            },
            sort,
            page: self.page,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_options_splits_sort_and_pins_owner() {
        let query = MessageListQuery {
            message_type: Some("USER_MESSAGE".to_string()),
            sort: Some("CREATED_AT_ASC, ,CREATED_AT_DESC".to_string()),
            page: Some(2),
            limit: Some(10),
        };
        let options = query.into_options(7);
        assert_eq!(options.filters.user_id, Some(serde_json::json!(7)));
        assert_eq!(options.sort, vec!["CREATED_AT_ASC", "CREATED_AT_DESC"]);
        assert_eq!(options.page, Some(2));
        assert_eq!(options.limit, Some(10));
    }

    #[test]
    fn test_defaults() {
        let options = MessageListQuery::default().into_options(1);
        assert!(options.sort.is_empty());
        assert!(options.page.is_none());
        assert!(options.filters.message_type.is_none());
    }
}
