//! Spendbot Web Server
//!
//! Axum-based REST API for the spendbot expense tracker:
//! - `POST /api/process` - run one message through the extraction pipeline
//! - `GET /api/health` - database and LLM configuration status
//! - `GET /api/users/{telegram_id}/expenses` - paginated expense listing
//!
//! Errors leaving handlers are sanitized into a JSON envelope; internal
//! details go to the log only.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use spendbot_core::{Database, ExpenseService, Settings};

mod handlers;


/// Maximum pagination limit for expense listings
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Maximum inbound message length in characters
pub const MAX_MESSAGE_LEN: usize = 500;

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub service: ExpenseService,
    /// Settings kept for health reporting (LLM credential presence)
    pub settings: Settings,
}

/// Build the API router
pub fn create_router(db: Database, service: ExpenseService, settings: Settings) -> Router {
    let state = Arc::new(AppState {
        db,
        service,
        settings,
    });

    let api_routes = Router::new()
        .route("/process", post(handlers::process_message))
        .route("/health", get(handlers::health_check))
        .route("/users/:telegram_id/expenses", get(handlers::list_user_expenses));

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the server
pub async fn serve(
    db: Database,
    service: ExpenseService,
    settings: Settings,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    let app = create_router(db, service, settings);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Handler error with a sanitized client-facing message
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_string(),
            internal: Some(err.into()),
        }
    }
}
