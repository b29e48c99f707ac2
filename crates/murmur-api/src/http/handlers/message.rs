//! Message handlers for the REST API.
//!
//! Listing, counting and deletion act on the session identity's own
//! messages. Single-message lookup is not scoped by owner.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use murmur_core::valence::classify_optional;
use murmur_types::message::{Message, MessageType, NewMessage};
use murmur_types::valence::ValenceCategory;

use crate::http::error::AppError;
use crate::http::extractors::query::MessageListQuery;
use crate::http::extractors::session::CookieSessionStore;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// A stored message annotated with its valence category.
#[derive(Debug, Serialize)]
pub struct MessageView {
    #[serde(flatten)]
    pub message: Message,
    pub valence_category: Option<ValenceCategory>,
}

impl From<Message> for MessageView {
    fn from(message: Message) -> Self {
        let valence_category = classify_optional(message.valence);
        Self {
            message,
            valence_category,
        }
    }
}

/// Request body for POST /api/v1/messages.
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub content: String,
    #[serde(default)]
    pub valence: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CountView {
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct DeleteView {
    pub deleted: u64,
}

/// GET /api/v1/messages - List the session identity's messages.
pub async fn list_messages(
    State(state): State<AppState>,
    store: CookieSessionStore,
    Query(query): Query<MessageListQuery>,
) -> Result<Json<ApiResponse<Vec<MessageView>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let user_id = state.session_manager.current_user_id_required(&store)?;
    let options = query.into_options(user_id);
    let messages = state.message_service.find(&options).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let views = messages.into_iter().map(MessageView::from).collect();
    Ok(Json(
        ApiResponse::success(views, request_id, elapsed).with_link("self", "/api/v1/messages"),
    ))
}

/// GET /api/v1/messages/count - Count the session identity's user messages.
pub async fn count_messages(
    State(state): State<AppState>,
    store: CookieSessionStore,
    Query(query): Query<MessageListQuery>,
) -> Result<Json<ApiResponse<CountView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let user_id = state.session_manager.current_user_id_required(&store)?;
    let count = state
        .message_service
        .user_messages_count(user_id, Some(query.into_options(user_id)))
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(
        CountView { count },
        request_id,
        elapsed,
    )))
}

/// GET /api/v1/messages/{id} - Fetch one message by id.
pub async fn get_message(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<MessageView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let message = state
        .message_service
        .find_one(id)
        .await?
        .ok_or(AppError::MessageNotFound(id))?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(
        ApiResponse::success(MessageView::from(message), request_id, elapsed)
            .with_link("self", &format!("/api/v1/messages/{id}")),
    ))
}

/// POST /api/v1/messages - Record a user message, provisioning a session if needed.
pub async fn create_message(
    State(state): State<AppState>,
    mut store: CookieSessionStore,
    Json(body): Json<CreateMessageRequest>,
) -> Result<(CookieJar, Json<ApiResponse<MessageView>>), AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    if body.content.trim().is_empty() {
        return Err(AppError::Validation("content must not be empty".to_string()));
    }

    let owner_id = state
        .session_manager
        .get_or_create_user_id(&mut store)
        .await?;
    let stored = state
        .message_service
        .create(&NewMessage {
            owner_id,
            message_type: MessageType::UserMessage,
            content: body.content,
            valence: body.valence,
        })
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let href = format!("/api/v1/messages/{}", stored.id);
    let resp = ApiResponse::success(MessageView::from(stored), request_id, elapsed)
        .with_link("self", &href);
    Ok((store.into_jar(), Json(resp)))
}

/// DELETE /api/v1/messages/{id} - Delete one of the session identity's messages.
///
/// Deleting a foreign or missing id reports zero rows rather than failing.
pub async fn delete_message(
    State(state): State<AppState>,
    store: CookieSessionStore,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeleteView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let owner_id = state.session_manager.current_user_id_required(&store)?;
    let outcome = state.message_service.delete(id, owner_id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(
        DeleteView {
            deleted: outcome.rows_affected,
        },
        request_id,
        elapsed,
    )))
}

/// DELETE /api/v1/messages - Delete all of the session identity's messages.
pub async fn delete_all_messages(
    State(state): State<AppState>,
    store: CookieSessionStore,
) -> Result<Json<ApiResponse<DeleteView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let owner_id = state.session_manager.current_user_id_required(&store)?;
    let outcome = state.message_service.delete_all(owner_id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(
        DeleteView {
            deleted: outcome.rows_affected,
        },
        request_id,
        elapsed,
    )))
}
