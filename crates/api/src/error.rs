use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use keel_core::error::{CoreError, RuleError};
use keel_core::validation::schema::ValidationReport;
use serde_json::json;

/// An error carrying an explicit HTTP status.
///
/// Only client (4xx) and server (5xx) error statuses are accepted.
#[derive(Debug, Clone, thiserror::Error)]
#[error("HTTP {status}: {message}")]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    pub fn new(status: u16, message: impl Into<String>) -> Result<Self, CoreError> {
        let status = StatusCode::from_u16(status)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .ok_or_else(|| {
                CoreError::Validation(format!("{status} is not an HTTP error status"))
            })?;
        Ok(Self {
            status,
            message: message.into(),
        })
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `keel_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An error with a caller-chosen HTTP status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Input was well-formed but failed validation.
    #[error("Validation failed with {} violation(s)", .0.violations.len())]
    Unprocessable(ValidationReport),
}

impl From<RuleError> for AppError {
    fn from(err: RuleError) -> Self {
        AppError::Core(CoreError::Rule(err))
    }
}

/// Malformed or mistyped request bodies are client errors, kept distinct
/// from the 422 used for records that fail validation.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, key } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} '{key}' not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Rule(err) => {
                    tracing::error!(error = %err, "Rule failed during validation");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "RULE_ERROR",
                        "A validation rule is misconfigured".to_string(),
                    )
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::Http(err) => (err.status(), "HTTP_ERROR", err.message().to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Unprocessable(report) => {
                let body = json!({
                    "error": "Validation failed",
                    "code": "VALIDATION_FAILED",
                    "violations": report.violations,
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn http_error_accepts_error_statuses() {
        assert_eq!(HttpError::new(404, "gone").unwrap().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            HttpError::new(503, "busy").unwrap().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn http_error_accepts_range_edges() {
        assert_eq!(HttpError::new(400, "bad").unwrap().status(), StatusCode::BAD_REQUEST);
        assert_eq!(HttpError::new(599, "edge").unwrap().status().as_u16(), 599);
    }

    #[test]
    fn http_error_rejects_just_outside_range() {
        assert_matches!(HttpError::new(399, "redirect"), Err(CoreError::Validation(_)));
        assert_matches!(HttpError::new(600, "too high"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn http_error_rejects_non_error_statuses() {
        assert_matches!(HttpError::new(200, "ok"), Err(CoreError::Validation(_)));
        assert_matches!(HttpError::new(302, "moved"), Err(CoreError::Validation(_)));
        assert_matches!(HttpError::new(42, "nonsense"), Err(CoreError::Validation(_)));
    }
}
