use axum::http::header::InvalidHeaderValue;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] wb_core::Error),

    #[error("Article {0} not found")]
    UnknownArticle(String),

    #[error("Invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Core(e) if e.is_not_found() => {
                debug!(error = %self, "Not found");
                (StatusCode::NOT_FOUND, self.to_string())
            }
            ApiError::UnknownArticle(_) => {
                debug!(error = %self, "Not found");
                (StatusCode::NOT_FOUND, self.to_string())
            }
            _ => {
                warn!(error = %self, "Unexpected request error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(MessageResponse::new(message))).into_response()
    }
}
