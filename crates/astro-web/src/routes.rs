//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{health, login, process_audio, send_calendar_event, send_pdf};
use crate::server::AppState;

/// Create the API router
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Voice question
        .route("/process_audio", post(process_audio))
        // Mocked account and delivery endpoints
        .route("/api/login", post(login))
        .route("/send-calendar-event", post(send_calendar_event))
        .route("/send-pdf", post(send_pdf))
}
