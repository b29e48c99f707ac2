//! Session handlers for the REST API.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::http::error::AppError;
use crate::http::extractors::session::CookieSessionStore;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// The identity bound to the request's session cookie.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub authenticated: bool,
    pub user_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

async fn session_view(state: &AppState, user_id: Option<i64>) -> Result<SessionView, AppError> {
    let Some(id) = user_id else {
        return Ok(SessionView {
            authenticated: false,
            user_id: None,
            created_at: None,
        });
    };

    let identity = state.session_manager.users().find(id).await?;
    Ok(SessionView {
        authenticated: true,
        user_id: Some(id),
        created_at: identity.map(|i| i.created_at),
    })
}

/// GET /api/v1/session - Current identity, if any. Never provisions.
pub async fn get_session(
    State(state): State<AppState>,
    store: CookieSessionStore,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let user_id = state.session_manager.current_user_id(&store)?;
    let view = session_view(&state, user_id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(
        ApiResponse::success(view, request_id, elapsed).with_link("self", "/api/v1/session"),
    ))
}

/// POST /api/v1/session - Resolve the session identity, creating one if absent.
pub async fn create_session(
    State(state): State<AppState>,
    mut store: CookieSessionStore,
) -> Result<(CookieJar, Json<ApiResponse<SessionView>>), AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let user_id = state
        .session_manager
        .get_or_create_user_id(&mut store)
        .await?;
    let view = session_view(&state, Some(user_id)).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(view, request_id, elapsed).with_link("self", "/api/v1/session");
    Ok((store.into_jar(), Json(resp)))
}
