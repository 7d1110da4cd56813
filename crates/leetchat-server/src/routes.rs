use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use leetchat_core::backend::CSRF_HEADER;
use leetchat_core::{CredentialContext, HistoryEntry};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub message: String,
    #[serde(default)]
    pub chat_history: Option<Vec<HistoryEntry>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub status: String,
    pub message: String,
}

pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to Leetbase Chatbot API".to_string(),
        status: "active".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn ask(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = payload?;
    let credentials = credentials_from(&headers);
    let reply = state
        .orchestrator
        .handle(&request.message, request.chat_history.as_deref(), credentials.as_ref())
        .await?;

    Ok(Json(AskResponse {
        status: "success".to_string(),
        message: reply,
    }))
}

/// Credentials exist only when a non-blank `Authorization` header was sent
fn credentials_from(headers: &HeaderMap) -> Option<CredentialContext> {
    let authorization = headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()
        .filter(|value| !value.trim().is_empty())?;
    let csrf = headers
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    Some(CredentialContext::new(authorization, csrf))
}
