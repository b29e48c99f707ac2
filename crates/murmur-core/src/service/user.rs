//! Identity provisioning.

use murmur_types::error::RepositoryError;
use murmur_types::identity::Identity;

use crate::repository::user::UserRepository;

/// Creates and looks up anonymous identities.
pub struct UserProvisioningService<U: UserRepository> {
    repo: U,
}

impl<U: UserRepository> UserProvisioningService<U> {
    pub fn new(repo: U) -> Self {
        Self { repo }
    }

    /// Create a brand new identity.
    pub async fn create(&self) -> Result<Identity, RepositoryError> {
        let identity = self.repo.create().await?;
        tracing::info!(user_id = identity.id, "provisioned new identity");
        Ok(identity)
    }

    pub async fn find(&self, id: i64) -> Result<Option<Identity>, RepositoryError> {
        self.repo.get_by_id(id).await
    }
}
