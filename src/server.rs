// 🌐 Label Draft API - axum router
// /api/health, /api/draft, /api/send-lead
//
// Every response uses the same JSON envelope: { success, message?, error?, details?, data? }

use crate::config::ServerConfig;
use crate::email::{FieldErrors, LeadRequest, SubmittedLead};
use crate::label::LabelDraft;
use crate::mailer::{Delivery, LeadMailer, MailError};
use crate::Project;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const INVALID_INPUT: &str = "Please check your input.";
pub const NOT_CONFIGURED: &str = "Email service is not configured.";
pub const SEND_FAILED: &str = "Failed to send email. Please try again later.";
pub const SENT: &str = "Your request has been sent. We will be in touch soon.";
pub const LOGGED: &str = "Your request was received (dev mode: email logged, not sent).";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub mailer: Arc<LeadMailer>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        AppState {
            mailer: Arc::new(LeadMailer::new(config)),
        }
    }
}

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            error: None,
            details: None,
            data: Some(data),
        }
    }

    fn ok_with_message(data: T, message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::ok(data)
        }
    }
}

impl ApiResponse<()> {

    fn error(error: &str, details: Option<FieldErrors>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.to_string()),
            details,
            data: None,
        }
    }
}

fn bad_request(details: FieldErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error(INVALID_INPUT, Some(details))),
    )
        .into_response()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /api/draft - Render and score a label from raw inputs
async fn draft(body: Bytes) -> Response {
    let project: Project = match serde_json::from_slice(&body) {
        Ok(project) => project,
        Err(e) => return bad_request(FieldErrors::form(e.to_string())),
    };

    let draft: LabelDraft = project.draft();
    (StatusCode::OK, Json(ApiResponse::ok(draft))).into_response()
}

/// POST /api/send-lead - Validate a lead and forward it to the operator inbox
async fn send_lead(State(state): State<AppState>, body: Bytes) -> Response {
    let lead: LeadRequest = match serde_json::from_slice(&body) {
        Ok(lead) => lead,
        Err(e) => {
            tracing::warn!(error = %e, "malformed lead payload");
            return bad_request(FieldErrors::form(e.to_string()));
        }
    };

    if let Err(details) = lead.validate() {
        tracing::warn!(fields = ?details.field_errors.keys().collect::<Vec<_>>(), "lead failed validation");
        return bad_request(details);
    }

    let submitted = SubmittedLead::new(lead);
    match state.mailer.send(&submitted).await {
        Ok(delivery) => {
            let message = match delivery {
                Delivery::Sent => SENT,
                Delivery::Logged => LOGGED,
            };
            let reference = submitted.reference.to_string();
            (StatusCode::OK, Json(ApiResponse::ok_with_message(reference, message))).into_response()
        }
        Err(MailError::NotConfigured) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(NOT_CONFIGURED, None)),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(reference = %submitted.reference, error = %e, "failed to send lead email");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(SEND_FAILED, None)),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/draft", post(draft))
        .route("/send-lead", post(send_lead))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
