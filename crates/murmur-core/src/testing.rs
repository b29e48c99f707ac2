//! In-memory fakes of the repository ports, for unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};
use murmur_types::error::RepositoryError;
use murmur_types::identity::Identity;
use murmur_types::message::{DeleteOutcome, Message, NewMessage};

use crate::repository::SortOrder;
use crate::repository::message::MessageRepository;
use crate::repository::query::{MessageField, QuerySpec};
use crate::repository::user::UserRepository;

/// Timestamps advance one second per insert so orderings are deterministic.
fn tick(seq: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(seq)
}

#[derive(Default)]
pub struct InMemoryMessageRepository {
    rows: Mutex<Vec<Message>>,
    next_id: AtomicI64,
    fail: bool,
}

impl InMemoryMessageRepository {
    /// A store whose every call fails with a connection error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.fail {
            Err(RepositoryError::Connection)
        } else {
            Ok(())
        }
    }
}

impl MessageRepository for InMemoryMessageRepository {
    async fn count(&self, spec: &QuerySpec) -> Result<u64, RepositoryError> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|m| spec.matches(m)).count() as u64)
    }

    async fn find(&self, spec: &QuerySpec) -> Result<Vec<Message>, RepositoryError> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        let mut matched: Vec<Message> = rows.iter().filter(|m| spec.matches(m)).cloned().collect();
        matched.sort_by(|a, b| {
            spec.order_clauses
                .iter()
                .map(|clause| {
                    let ord = match clause.field {
                        MessageField::CreatedAt => a.created_at.cmp(&b.created_at),
                    };
                    match clause.order {
                        SortOrder::Asc => ord,
                        SortOrder::Desc => ord.reverse(),
                    }
                })
                .find(|ord| ord.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(matched
            .into_iter()
            .skip(spec.skip as usize)
            .take(spec.take as usize)
            .collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Message>, RepositoryError> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|m| m.id == id).cloned())
    }

    async fn create(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        self.check()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = Message {
            id,
            owner_id: message.owner_id,
            message_type: message.message_type,
            content: message.content.clone(),
            valence: message.valence,
            created_at: tick(id),
        };
        self.rows.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn delete_owned(&self, id: i64, owner_id: i64) -> Result<DeleteOutcome, RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| !(m.id == id && m.owner_id == owner_id));
        Ok(DeleteOutcome {
            rows_affected: (before - rows.len()) as u64,
        })
    }

    async fn delete_all_owned(&self, owner_id: i64) -> Result<DeleteOutcome, RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| m.owner_id != owner_id);
        Ok(DeleteOutcome {
            rows_affected: (before - rows.len()) as u64,
        })
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<Identity>>,
    next_id: AtomicI64,
    fail: bool,
    /// Hand out this id instead of a sequential one.
    forced_id: Option<i64>,
}

impl InMemoryUserRepository {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn with_forced_id(id: i64) -> Self {
        Self {
            forced_id: Some(id),
            ..Default::default()
        }
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self) -> Result<Identity, RepositoryError> {
        if self.fail {
            return Err(RepositoryError::Connection);
        }
        let seq = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let identity = Identity {
            id: self.forced_id.unwrap_or(seq),
            created_at: tick(seq),
        };
        self.rows.lock().unwrap().push(identity.clone());
        Ok(identity)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Identity>, RepositoryError> {
        if self.fail {
            return Err(RepositoryError::Connection);
        }
        Ok(self.rows.lock().unwrap().iter().find(|i| i.id == id).cloned())
    }
}

/// Codec producing `signed.<id>` tokens; anything else fails verification.
pub struct FakeCodec;

impl crate::session::codec::SessionTokenCodec for FakeCodec {
    fn encode(
        &self,
        payload: &murmur_types::identity::SessionTokenPayload,
    ) -> Result<String, murmur_types::error::TokenError> {
        Ok(format!("signed.{}", payload.id))
    }

    fn decode(
        &self,
        token: &str,
    ) -> Result<murmur_types::identity::SessionTokenPayload, murmur_types::error::TokenError> {
        token
            .strip_prefix("signed.")
            .and_then(|id| id.parse().ok())
            .map(|id| murmur_types::identity::SessionTokenPayload { id })
            .ok_or(murmur_types::error::TokenError::InvalidSignature)
    }
}

#[derive(Default)]
pub struct MemoryCookies {
    token: Option<String>,
    pub writes: usize,
}

impl MemoryCookies {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            writes: 0,
        }
    }
}

impl crate::session::cookie::SessionCookieStore for MemoryCookies {
    fn read(&self) -> Option<String> {
        self.token.clone()
    }

    fn write(&mut self, token: String) {
        self.token = Some(token);
        self.writes += 1;
    }
}
