//! Message repository trait definition.
//!
//! Defines the persistence-store capability the message service drives. The
//! infrastructure layer (murmur-infra) implements this trait with SQLite.

use murmur_types::error::RepositoryError;
use murmur_types::message::{DeleteOutcome, Message, NewMessage};

use super::query::QuerySpec;

/// Repository trait for message persistence.
///
/// Listings only ever receive a validated [`QuerySpec`]. Deletes are always
/// predicated on the owner, evaluated by the store in a single statement.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait MessageRepository: Send + Sync {
    /// Count rows matching the spec's where clauses. Ordering and pagination
    /// do not affect the count.
    fn count(
        &self,
        spec: &QuerySpec,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Fetch one page of rows, ordered per the spec.
    fn find(
        &self,
        spec: &QuerySpec,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Look up a message by primary key.
    fn get_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Message>, RepositoryError>> + Send;

    /// Insert a message and return the stored record.
    fn create(
        &self,
        message: &NewMessage,
    ) -> impl std::future::Future<Output = Result<Message, RepositoryError>> + Send;

    /// Delete the row matching both `id` and `owner_id`.
    fn delete_owned(
        &self,
        id: i64,
        owner_id: i64,
    ) -> impl std::future::Future<Output = Result<DeleteOutcome, RepositoryError>> + Send;

    /// Delete every row owned by `owner_id`.
    fn delete_all_owned(
        &self,
        owner_id: i64,
    ) -> impl std::future::Future<Output = Result<DeleteOutcome, RepositoryError>> + Send;
}
