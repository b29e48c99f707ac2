//! Message service.
//!
//! Builds validated query specs from caller options and drives the message
//! repository. Reads are unscoped; every mutation is scoped by owner.
//! Storage errors are returned unchanged.

use murmur_types::error::RepositoryError;
use murmur_types::message::{DeleteOutcome, Message, MessageType, NewMessage};
use murmur_types::query::IndexQueryOptions;

use crate::repository::message::MessageRepository;
use crate::repository::query::{QuerySpec, build_query_spec};

/// Service over the message log.
pub struct MessageService<R: MessageRepository> {
    repo: R,
}

impl<R: MessageRepository> MessageService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate and bound raw listing options.
    pub fn build_query_spec(&self, options: &IndexQueryOptions) -> QuerySpec {
        let spec = build_query_spec(options);
        tracing::debug!(?spec, "built message query spec");
        spec
    }

    pub async fn count(&self, options: &IndexQueryOptions) -> Result<u64, RepositoryError> {
        let spec = self.build_query_spec(options);
        self.repo.count(&spec).await
    }

    pub async fn find(&self, options: &IndexQueryOptions) -> Result<Vec<Message>, RepositoryError> {
        let spec = self.build_query_spec(options);
        self.repo.find(&spec).await
    }

    /// Lookup by primary key. No ownership check.
    pub async fn find_one(&self, id: i64) -> Result<Option<Message>, RepositoryError> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        let stored = self.repo.create(message).await?;
        tracing::debug!(id = stored.id, owner_id = stored.owner_id, "message created");
        Ok(stored)
    }

    /// Delete one message if, and only if, it belongs to `owner_id`.
    ///
    /// A foreign or missing id yields zero rows affected, not an error.
    pub async fn delete(&self, id: i64, owner_id: i64) -> Result<DeleteOutcome, RepositoryError> {
        let outcome = self.repo.delete_owned(id, owner_id).await?;
        tracing::info!(id, owner_id, rows = outcome.rows_affected, "message delete");
        Ok(outcome)
    }

    /// Delete every message owned by `owner_id`.
    pub async fn delete_all(&self, owner_id: i64) -> Result<DeleteOutcome, RepositoryError> {
        let outcome = self.repo.delete_all_owned(owner_id).await?;
        tracing::info!(owner_id, rows = outcome.rows_affected, "messages delete_all");
        Ok(outcome)
    }

    /// Count the user-authored messages of `user_id`.
    ///
    /// The owner and `USER_MESSAGE` type filters override whatever filters
    /// the caller supplied.
    pub async fn user_messages_count(
        &self,
        user_id: i64,
        options: Option<IndexQueryOptions>,
    ) -> Result<u64, RepositoryError> {
        let mut options = options.unwrap_or_default();
        options.filters.user_id = Some(user_id.into());
        options.filters.message_type = Some(MessageType::UserMessage.to_string());
        self.count(&options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryMessageRepository;
    use murmur_types::query::{MessageFilters, SORT_CREATED_AT_ASC};
    use serde_json::json;

    fn new_message(owner_id: i64, message_type: MessageType, content: &str) -> NewMessage {
        NewMessage {
            owner_id,
            message_type,
            content: content.to_string(),
            valence: None,
        }
    }

    async fn seeded() -> MessageService<InMemoryMessageRepository> {
        let service = MessageService::new(InMemoryMessageRepository::default());
        for (owner, t, content) in [
            (2, MessageType::UserMessage, "a"),
            (2, MessageType::AssistantMessage, "b"),
            (2, MessageType::UserMessage, "c"),
            (3, MessageType::UserMessage, "d"),
        ] {
            service.create(&new_message(owner, t, content)).await.unwrap();
        }
        service
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let service = MessageService::new(InMemoryMessageRepository::default());
        let stored = service
            .create(&new_message(1, MessageType::UserMessage, "hello"))
            .await
            .unwrap();
        assert!(stored.id > 0);
        assert_eq!(stored.content, "hello");
        let fetched = service.find_one(stored.id).await.unwrap();
        assert_eq!(fetched, Some(stored));
    }

    #[tokio::test]
    async fn test_find_one_is_unscoped_and_missing_is_none() {
        let service = seeded().await;
        let foreign = service.find_one(4).await.unwrap().unwrap();
        assert_eq!(foreign.owner_id, 3);
        assert!(service.find_one(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_defaults_to_newest_first() {
        let service = seeded().await;
        let all = service.find(&IndexQueryOptions::default()).await.unwrap();
        let contents: Vec<&str> = all.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["d", "c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_find_oldest_first_with_paging() {
        let service = seeded().await;
        let options = IndexQueryOptions::default()
            .with_sort([SORT_CREATED_AT_ASC])
            .with_page(2, 2);
        let page = service.find(&options).await.unwrap();
        let contents: Vec<&str> = page.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["c", "d"]);
    }

    #[tokio::test]
    async fn test_count_with_filters() {
        let service = seeded().await;
        let options = IndexQueryOptions {
            filters: MessageFilters {
                user_id: Some(json!(2)),
                message_type: None,
            },
            ..Default::default()
        };
        assert_eq!(service.count(&options).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_count_drops_invalid_filters() {
        let service = seeded().await;
        let options = IndexQueryOptions {
            filters: MessageFilters {
                user_id: Some(json!("abc")),
                message_type: Some("not-a-real-type".to_string()),
            },
            ..Default::default()
        };
        assert_eq!(service.count(&options).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_non_id_owner_counts_nothing() {
        let service = seeded().await;
        for value in [json!(1.5), json!(1e300)] {
            let options = IndexQueryOptions {
                filters: MessageFilters {
                    user_id: Some(value),
                    message_type: None,
                },
                ..Default::default()
            };
            assert_eq!(service.count(&options).await.unwrap(), 0);
            assert!(service.find(&options).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_user_messages_count_forces_hard_filters() {
        let service = seeded().await;
        let conflicting = IndexQueryOptions {
            filters: MessageFilters {
                user_id: Some(json!(3)),
                message_type: Some("ASSISTANT_MESSAGE".to_string()),
            },
            ..Default::default()
        };
        assert_eq!(service.user_messages_count(2, Some(conflicting)).await.unwrap(), 2);
        assert_eq!(service.user_messages_count(3, None).await.unwrap(), 1);
        assert_eq!(service.user_messages_count(42, None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_requires_owner_match() {
        let service = seeded().await;
        // Message 4 belongs to owner 3.
        let outcome = service.delete(4, 2).await.unwrap();
        assert_eq!(outcome.rows_affected, 0);
        assert!(service.find_one(4).await.unwrap().is_some());

        let outcome = service.delete(4, 3).await.unwrap();
        assert_eq!(outcome.rows_affected, 1);
        assert!(service.find_one(4).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let service = seeded().await;
        let outcome = service.delete(999, 2).await.unwrap();
        assert_eq!(outcome, DeleteOutcome { rows_affected: 0 });
    }

    #[tokio::test]
    async fn test_delete_all_is_owner_scoped() {
        let service = seeded().await;
        let outcome = service.delete_all(2).await.unwrap();
        assert_eq!(outcome.rows_affected, 3);
        assert_eq!(service.count(&IndexQueryOptions::default()).await.unwrap(), 1);

        let outcome = service.delete_all(2).await.unwrap();
        assert_eq!(outcome.rows_affected, 0);
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let service = MessageService::new(InMemoryMessageRepository::failing());
        let err = service.count(&IndexQueryOptions::default()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Connection));
    }
}
