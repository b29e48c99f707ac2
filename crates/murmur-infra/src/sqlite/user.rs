//! SQLite user repository implementation.

use chrono::Utc;
use sqlx::Row;

use murmur_core::repository::user::UserRepository;
use murmur_types::error::RepositoryError;
use murmur_types::identity::Identity;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self) -> Result<Identity, RepositoryError> {
        let created_at = Utc::now();

        let result = sqlx::query("INSERT INTO users (created_at) VALUES (?)")
            .bind(format_datetime(&created_at))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Identity {
            id: result.last_insert_rowid(),
            created_at,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Identity>, RepositoryError> {
        let row = sqlx::query("SELECT id, created_at FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|row| {
            let id: i64 = row.try_get("id").map_err(|e| RepositoryError::Query(e.to_string()))?;
            let created_at: String = row
                .try_get("created_at")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            Ok(Identity {
                id,
                created_at: parse_datetime(&created_at)?,
            })
        })
        .transpose()
    }
}
