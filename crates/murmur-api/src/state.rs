//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the REST API.
//! Services are generic over repository/codec traits, but AppState pins them
//! to the concrete infra implementations. The database pool is built once
//! here and handed to every repository.

use std::sync::Arc;

use secrecy::SecretString;

use murmur_core::service::message::MessageService;
use murmur_core::service::user::UserProvisioningService;
use murmur_core::session::manager::SessionManager;
use murmur_infra::crypto::token::JwtSessionCodec;
use murmur_infra::sqlite::message::SqliteMessageRepository;
use murmur_infra::sqlite::pool::DatabasePool;
use murmur_infra::sqlite::user::SqliteUserRepository;
use murmur_types::config::AppConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteMessageService = MessageService<SqliteMessageRepository>;

pub type ConcreteSessionManager = SessionManager<JwtSessionCodec, SqliteUserRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub message_service: Arc<ConcreteMessageService>,
    pub session_manager: Arc<ConcreteSessionManager>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init(config: AppConfig, secret: &SecretString) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(&config.database_url).await?;
        Self::with_pool(db_pool, config, secret)
    }

    /// Wire services over an existing pool.
    pub fn with_pool(
        db_pool: DatabasePool,
        config: AppConfig,
        secret: &SecretString,
    ) -> anyhow::Result<Self> {
        let codec = JwtSessionCodec::new(secret)?;
        let users = UserProvisioningService::new(SqliteUserRepository::new(db_pool.clone()));
        let session_manager = SessionManager::new(codec, users);

        let message_service = message_service(db_pool);

        Ok(Self {
            message_service: Arc::new(message_service),
            session_manager: Arc::new(session_manager),
            config: Arc::new(config),
        })
    }
}

/// Message service over the SQLite store, for callers that need no sessions.
pub fn message_service(db_pool: DatabasePool) -> ConcreteMessageService {
    MessageService::new(SqliteMessageRepository::new(db_pool))
}
