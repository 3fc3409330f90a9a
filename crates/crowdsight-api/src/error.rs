//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crowdsight_media::MediaError;
use crowdsight_vision::VisionError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Remote predictor failure, re-surfaced with its original status code
    /// and body so the caller sees exactly what the prediction service said.
    #[error("Prediction service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("Vision error: {0}")]
    Vision(VisionError),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Media(MediaError::Decode(_)) => StatusCode::BAD_REQUEST,
            ApiError::Media(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Vision(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<VisionError> for ApiError {
    fn from(err: VisionError) -> Self {
        match err {
            VisionError::Upstream { status, body } => ApiError::Upstream { status, body },
            other => ApiError::Vision(other),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Upstream bodies pass through verbatim; internal error details are
        // hidden in production.
        let detail = match &self {
            ApiError::Upstream { body, .. } => body.clone(),
            ApiError::Internal(_)
            | ApiError::Vision(_)
            | ApiError::Media(MediaError::Io(_))
            | ApiError::Media(MediaError::Encode(_)) => {
                if std::env::var("ENVIRONMENT").unwrap_or_default() == "production" {
                    "An internal error occurred".to_string()
                } else {
                    self.to_string()
                }
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_keeps_remote_status() {
        let err = ApiError::Upstream {
            status: 403,
            body: "quota exceeded".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_decode_failure_is_bad_request() {
        let decode_err = image_decode_error();
        let err = ApiError::Media(decode_err);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_vision_network_failure_is_bad_gateway() {
        let err: ApiError = VisionError::Json(
            serde_json::from_str::<serde_json::Value>("not json").unwrap_err(),
        )
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    fn image_decode_error() -> MediaError {
        crowdsight_media::decode_image(b"garbage").unwrap_err()
    }
}
