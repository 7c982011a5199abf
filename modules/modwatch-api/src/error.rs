use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::warn;

use modwatch_common::ModwatchError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g. `VALIDATION_ERROR`).
    code: &'static str,
    message: String,
}

/// JSON error returned by the API: `{"error":{"code":"…","message":"…"}}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: &'static str, message: String },
    TooManyRequests { message: String },
    ServiceUnavailable { message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: "VALIDATION_ERROR",
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            Self::TooManyRequests { message } => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", message)
            }
            Self::ServiceUnavailable { message } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "UPSTREAM_UNAVAILABLE",
                message,
            ),
            Self::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
            }
        };

        (
            status,
            Json(ErrorBody {
                error: ErrorDetail { code, message },
            }),
        )
            .into_response()
    }
}

impl From<ModwatchError> for ApiError {
    fn from(err: ModwatchError) -> Self {
        match err {
            ModwatchError::Validation(message) => Self::validation(message),
            ModwatchError::Upstream(detail) => {
                warn!(error = %detail, "Upstream call failed");
                Self::ServiceUnavailable {
                    message: "A backing service is unavailable, try again later".to_string(),
                }
            }
            ModwatchError::Anyhow(e) => {
                warn!(error = %e, "Request failed");
                Self::Internal {
                    message: "Internal error".to_string(),
                }
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ModwatchError::upstream(err).into()
    }
}
