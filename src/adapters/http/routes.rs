use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::error;

use crate::adapters::http::state::HttpState;
use crate::application::dto::{ErrorResponse, HealthResponse, ProcessRequest, ProcessResponse};
use crate::domain::errors::DomainError;

pub const SERVICE_NAME: &str = "image-tagger";

fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DomainError::OperationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub async fn health(State(st): State<HttpState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".into(),
        service: SERVICE_NAME.into(),
        model_loaded: st.analysis.model_loaded(),
        timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    })
}

pub async fn process_image(
    State(st): State<HttpState>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> impl IntoResponse {
    let req = match payload {
        Ok(Json(r)) => r,
        Err(rejection) => {
            let msg = format!("invalid request body: {}", rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response();
        }
    };
    let (image, options) = match req.into_parts() {
        Ok(parts) => parts,
        Err(msg) => return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response(),
    };

    match st.analysis.analyze(image, options).await {
        Ok(report) => Json(ProcessResponse::from(report)).into_response(),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                error!("Processing failed: {}", e);
            }
            (status, Json(ErrorResponse::new(e.to_string()))).into_response()
        }
    }
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "Route not found" })),
    )
}
