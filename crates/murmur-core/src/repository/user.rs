//! User (identity) repository trait definition.

use murmur_types::error::RepositoryError;
use murmur_types::identity::Identity;

/// Repository trait for anonymous identities.
///
/// Identities are created once and never updated or deleted.
pub trait UserRepository: Send + Sync {
    /// Insert a fresh identity and return it with its assigned id.
    fn create(&self) -> impl std::future::Future<Output = Result<Identity, RepositoryError>> + Send;

    /// Get an identity by id.
    fn get_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Identity>, RepositoryError>> + Send;
}
