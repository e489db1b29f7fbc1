use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use opentelemetry::trace::TraceContextExt;
use serde_json::json;
use thiserror::Error;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("user identifier missing from request")]
    MissingIdentifier,

    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("extraction error: {0}")]
    Extraction(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingIdentifier => StatusCode::BAD_REQUEST,
            AppError::Fetch(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Message shown to the end user. Extraction diagnostics stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::MissingIdentifier => {
                "User identifier not provided in the URL (idusuario parameter).".to_string()
            }
            AppError::Fetch(msg) => format!("Failed to load the report: {msg}"),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Extraction(msg) => {
                tracing::error!(error = %msg, "Report extraction failed");
                "The stored report is not in a recognized format.".to_string()
            }
        }
    }
}

fn get_trace_id() -> Option<String> {
    let span = Span::current();
    let context = span.context();
    let span_ref = context.span();
    let span_context = span_ref.span_context();

    if span_context.is_valid() {
        Some(span_context.trace_id().to_string())
    } else {
        None
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = self.user_message();

        let body = if let Some(trace_id) = get_trace_id() {
            json!({
                "error": error_message,
                "status": status.as_u16(),
                "trace_id": trace_id,
            })
        } else {
            json!({
                "error": error_message,
                "status": status.as_u16(),
            })
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_identifier_display() {
        let error = AppError::MissingIdentifier;
        assert_eq!(error.to_string(), "user identifier missing from request");
    }

    #[test]
    fn test_fetch_error_display() {
        let error = AppError::Fetch("connection refused".to_string());
        assert_eq!(error.to_string(), "fetch error: connection refused");
    }

    #[test]
    fn test_not_found_display() {
        let error = AppError::NotFound("no report for user abc".to_string());
        assert_eq!(error.to_string(), "not found: no report for user abc");
    }

    #[test]
    fn test_error_status_codes() {
        let cases = vec![
            (AppError::MissingIdentifier, StatusCode::BAD_REQUEST),
            (AppError::Fetch("down".to_string()), StatusCode::BAD_GATEWAY),
            (
                AppError::NotFound("missing".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Extraction("bad shape".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (error, expected_status) in cases {
            assert_eq!(error.status_code(), expected_status);
        }
    }

    #[test]
    fn test_extraction_user_message_is_generic() {
        let error = AppError::Extraction("responses[0].output was not a string".to_string());
        let message = error.user_message();
        assert!(!message.contains("responses[0]"));
        assert!(message.contains("not in a recognized format"));
    }

    #[test]
    fn test_not_found_user_message_names_identifier() {
        let error = AppError::NotFound("No report found for user abc-123.".to_string());
        assert!(error.user_message().contains("abc-123"));
    }

    #[test]
    fn test_app_result_ok() {
        fn returns_ok() -> AppResult<i32> {
            Ok(42)
        }
        assert_eq!(returns_ok().unwrap(), 42);
    }
}
