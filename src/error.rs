use crate::aggregator::AggregationFailure;
use crate::kaltura::KalturaError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Upstream(msg) => msg.clone(),
        };
        let body = axum::Json(json!({ "error": message }));
        (self.status(), body).into_response()
    }
}

impl From<KalturaError> for AppError {
    fn from(e: KalturaError) -> Self {
        match e {
            KalturaError::NotFound(_) => AppError::NotFound(e.to_string()),
            KalturaError::Network(_) => AppError::Upstream(e.to_string()),
        }
    }
}

impl From<AggregationFailure> for AppError {
    fn from(e: AggregationFailure) -> Self {
        AppError::Upstream(e.to_string())
    }
}
