//! HTTP API handlers

use astro_core::InlineImage;
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::pipeline::BriefResponse;
use crate::server::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Login response payload
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub user: String,
    pub message: &'static str,
}

/// Acknowledgement for the mocked delivery endpoints
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Generic API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn multipart_error(e: MultipartError) -> ApiError {
    warn!("Malformed multipart body: {}", e);
    (
        e.status(),
        Json(ErrorResponse {
            error: e.body_text(),
        }),
    )
}

// ============================================================================
// Handler functions
// ============================================================================

/// Health check endpoint
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "astro-brief",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Image MIME type for the model: the declared `image/*` type, else JPEG
fn image_mime_type(declared: Option<&str>) -> String {
    declared
        .and_then(|ct| ct.parse::<mime::Mime>().ok())
        .filter(|m| m.type_() == mime::IMAGE)
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| InlineImage::MEDIA_TYPE_JPEG.to_string())
}

/// Voice question endpoint: multipart `audio_data` (required) and `image_data` (optional)
pub async fn process_audio(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<BriefResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        debug!("Not a multipart request: {}", e);
        bad_request("No audio")
    })?;

    let mut audio = None;
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("audio_data") => {
                audio = Some(field.bytes().await.map_err(multipart_error)?);
            }
            Some("image_data") => {
                let mime_type = image_mime_type(field.content_type());
                let bytes = field.bytes().await.map_err(multipart_error)?;
                if !bytes.is_empty() {
                    image = Some(InlineImage::new(mime_type, bytes.to_vec()));
                }
            }
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }

    let Some(audio) = audio else {
        return Err(bad_request("No audio"));
    };

    info!(
        "Processing audio: {} bytes, image: {}",
        audio.len(),
        image.as_ref().map(|i| i.bytes.len()).unwrap_or(0)
    );

    Ok(Json(state.pipeline.run(&audio, image).await))
}

/// Mocked login: echoes the local part of the e-mail address
pub async fn login(
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(body) = body.map_err(|e| {
        debug!("Unreadable login body: {}", e);
        bad_request("Missing email")
    })?;

    let Some(email) = body.get("email").and_then(serde_json::Value::as_str) else {
        return Err(bad_request("Missing email"));
    };

    let user = email.split('@').next().unwrap_or_default().to_string();
    info!("Login for user {}", user);

    Ok(Json(LoginResponse {
        status: "success",
        user,
        message: "Login Successful",
    }))
}

/// Mocked newsletter subscription
pub async fn send_calendar_event() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "success",
        message: "Subscribed!",
    })
}

/// Mocked PDF guide delivery
pub async fn send_pdf() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "success",
        message: "Guide sent successfully!",
    })
}
