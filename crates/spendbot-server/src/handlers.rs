//! API route handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use spendbot_core::{Expense, LlmClient, Outcome};

use crate::{AppError, AppState, MAX_MESSAGE_LEN, MAX_PAGE_LIMIT};

/// Request body for POST /api/process
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    /// Telegram user id
    pub user_id: i64,
    /// User message text, 1-500 characters
    pub message: String,
}

/// POST /api/process - Run one message through the extraction pipeline
pub async fn process_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<Outcome>, AppError> {
    if request.user_id <= 0 {
        return Err(AppError::bad_request("user_id must be a positive integer"));
    }
    let message = request.message.trim();
    if message.is_empty() || message.chars().count() > MAX_MESSAGE_LEN {
        return Err(AppError::bad_request(
            "message must be between 1 and 500 characters",
        ));
    }

    info!(user_id = request.user_id, "Processing message");

    // Unknown senders are auto-created on first contact
    let telegram_id = request.user_id.to_string();
    let user = state.db.get_or_create_user(&telegram_id)?;

    let outcome = state.service.process_message(user.id, message).await;
    Ok(Json(outcome))
}

/// Response body for GET /api/health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub llm: &'static str,
}

/// GET /api/health - Service health status
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let db_ok = state.db.health_check();
    if !db_ok {
        warn!("Database health check failed");
    }
    let llm_ok = LlmClient::is_configured(&state.settings);

    Json(HealthResponse {
        status: if db_ok && llm_ok { "healthy" } else { "unhealthy" },
        database: if db_ok { "connected" } else { "disconnected" },
        llm: if llm_ok { "configured" } else { "not_configured" },
    })
}

/// Query parameters for expense listing
#[derive(Debug, Deserialize)]
pub struct ExpenseQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    10
}

#[derive(Serialize)]
pub struct ExpenseListResponse {
    pub telegram_id: String,
    pub total_expenses: usize,
    pub expenses: Vec<Expense>,
}

/// GET /api/users/{telegram_id}/expenses - List a user's expenses
pub async fn list_user_expenses(
    State(state): State<Arc<AppState>>,
    Path(telegram_id): Path<String>,
    Query(params): Query<ExpenseQuery>,
) -> Result<Json<ExpenseListResponse>, AppError> {
    // Input validation: clamp pagination parameters
    let limit = params.limit.max(1).min(MAX_PAGE_LIMIT);
    let offset = params.offset.max(0);

    let user = state
        .db
        .find_user_by_telegram_id(&telegram_id)?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let expenses = state.db.list_expenses(user.id, limit, offset)?;

    Ok(Json(ExpenseListResponse {
        telegram_id,
        total_expenses: expenses.len(),
        expenses,
    }))
}
