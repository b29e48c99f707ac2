//! SQLite message repository implementation.
//!
//! Implements `MessageRepository` from `murmur-core` using sqlx with split
//! read/write pools. Listings are assembled with `QueryBuilder`: column names
//! come only from the whitelisted `QuerySpec` enums and every value is bound.

use chrono::Utc;
use sqlx::{QueryBuilder, Row, Sqlite};

use murmur_core::repository::SortOrder;
use murmur_core::repository::message::MessageRepository;
use murmur_core::repository::query::{QuerySpec, WhereClause};
use murmur_types::error::RepositoryError;
use murmur_types::message::{DeleteOutcome, Message, MessageType, NewMessage};

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

const MESSAGE_COLUMNS: &str = "id, user_id, type, content, valence, created_at";

/// SQLite-backed implementation of `MessageRepository`.
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Internal row types
// ---------------------------------------------------------------------------

struct MessageRow {
    id: i64,
    user_id: i64,
    message_type: String,
    content: String,
    valence: Option<f64>,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            message_type: row.try_get("type")?,
            content: row.try_get("content")?,
            valence: row.try_get("valence")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let message_type = self
            .message_type
            .parse::<MessageType>()
            .map_err(RepositoryError::Query)?;

        Ok(Message {
            id: self.id,
            owner_id: self.user_id,
            message_type,
            content: self.content,
            valence: self.valence,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Query assembly
// ---------------------------------------------------------------------------

fn push_where(qb: &mut QueryBuilder<'_, Sqlite>, clauses: &[WhereClause]) {
    for (i, clause) in clauses.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        match clause {
            WhereClause::OwnerId(owner_id) => {
                qb.push("user_id = ").push_bind(*owner_id);
            }
            WhereClause::MessageType(message_type) => {
                qb.push("type = ").push_bind(message_type.as_str());
            }
            WhereClause::NoOwner => {
                qb.push("1 = 0");
            }
        }
    }
}

/// ORDER BY from the spec, with `id` as a final tie-breaker in the direction
/// of the last clause.
fn push_order(qb: &mut QueryBuilder<'_, Sqlite>, spec: &QuerySpec) {
    qb.push(" ORDER BY ");
    for clause in &spec.order_clauses {
        qb.push(clause.field.column())
            .push(" ")
            .push(clause.order.as_sql())
            .push(", ");
    }
    let tie = spec
        .order_clauses
        .last()
        .map(|c| c.order)
        .unwrap_or_default();
    qb.push("id ").push(tie.as_sql());
}

fn saturating_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

// ---------------------------------------------------------------------------
// MessageRepository impl
// ---------------------------------------------------------------------------

impl MessageRepository for SqliteMessageRepository {
    async fn count(&self, spec: &QuerySpec) -> Result<u64, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM messages");
        push_where(&mut qb, &spec.where_clauses);

        let count: i64 = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count.max(0) as u64)
    }

    async fn find(&self, spec: &QuerySpec) -> Result<Vec<Message>, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {MESSAGE_COLUMNS} FROM messages"));
        push_where(&mut qb, &spec.where_clauses);
        push_order(&mut qb, spec);
        qb.push(" LIMIT ")
            .push_bind(saturating_i64(spec.take))
            .push(" OFFSET ")
            .push_bind(saturating_i64(spec.skip));

        let rows = qb
            .build()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let r = MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(r.into_message()?);
        }
        Ok(messages)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Message>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let r =
                    MessageRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(r.into_message()?))
            }
            None => Ok(None),
        }
    }

    async fn create(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO messages (user_id, type, content, valence, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(message.owner_id)
        .bind(message.message_type.as_str())
        .bind(&message.content)
        .bind(message.valence)
        .bind(format_datetime(&created_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(done) => Ok(Message {
                id: done.last_insert_rowid(),
                owner_id: message.owner_id,
                message_type: message.message_type,
                content: message.content.clone(),
                valence: message.valence,
                created_at,
            }),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("FOREIGN KEY") => {
                Err(RepositoryError::Conflict(format!(
                    "owner {} does not exist",
                    message.owner_id
                )))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn delete_owned(&self, id: i64, owner_id: i64) -> Result<DeleteOutcome, RepositoryError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(DeleteOutcome {
            rows_affected: result.rows_affected(),
        })
    }

    async fn delete_all_owned(&self, owner_id: i64) -> Result<DeleteOutcome, RepositoryError> {
        let result = sqlx::query("DELETE FROM messages WHERE user_id = ?")
            .bind(owner_id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(DeleteOutcome {
            rows_affected: result.rows_affected(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
