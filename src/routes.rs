use std::sync::Arc;
use std::time::Instant;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tracing::{info, warn};

use crate::adapter::ContentAdapter;
use crate::error::AdapterError;
use crate::models::{
    ErrorResponse, GradesResponse, ImageRequest, MediaBlob, NamesResponse, SessionContentRequest,
    SessionContentResponse,
};

/// Large enough for a base64 data URL of the biggest inline image Gemini accepts.
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub adapter: Arc<ContentAdapter>,
}

pub fn router(adapter: ContentAdapter) -> Router {
    Router::new()
        .route("/api/session-content", post(session_content))
        .route("/api/students/extract-names", post(extract_names))
        .route("/api/grades/extract", post(extract_grades))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(AppState {
            adapter: Arc::new(adapter),
        })
}

impl AdapterError {
    fn status_code(&self) -> StatusCode {
        match self {
            AdapterError::InvalidMedia(_) | AdapterError::Io(_) => StatusCode::BAD_REQUEST,
            AdapterError::NameExtraction | AdapterError::GradeExtraction | AdapterError::Parse(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for AdapterError {
    fn into_response(self) -> Response {
        warn!("⚠️  Request failed: {}", self);
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

async fn session_content(
    State(state): State<AppState>,
    Json(request): Json<SessionContentRequest>,
) -> Json<SessionContentResponse> {
    let started = Instant::now();
    let content = state
        .adapter
        .generate_session_content(&request.topic, request.kind)
        .await;
    info!(model = state.adapter.model_id(), "🧠 AI Latency: {:.2?}", started.elapsed());

    Json(SessionContentResponse { content })
}

async fn extract_names(
    State(state): State<AppState>,
    Json(request): Json<ImageRequest>,
) -> Result<Json<NamesResponse>, AdapterError> {
    let image = MediaBlob::from_data_url(&request.image, request.mime_type.as_deref())?
        .shrink_if_oversized()
        .await?;

    let started = Instant::now();
    let names = state.adapter.extract_student_names_from_image(&image).await?;
    info!(model = state.adapter.model_id(), count = names.len(), "🧠 AI Latency: {:.2?}", started.elapsed());

    Ok(Json(NamesResponse { names }))
}

async fn extract_grades(
    State(state): State<AppState>,
    Json(request): Json<ImageRequest>,
) -> Result<Json<GradesResponse>, AdapterError> {
    let image = MediaBlob::from_data_url(&request.image, request.mime_type.as_deref())?
        .shrink_if_oversized()
        .await?;

    let started = Instant::now();
    let grades = state.adapter.extract_grades_from_image(&image).await?;
    info!(model = state.adapter.model_id(), count = grades.len(), "🧠 AI Latency: {:.2?}", started.elapsed());

    Ok(Json(GradesResponse { grades }))
}
