use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Request-level error taxonomy. Every variant renders as a structured
/// `{ok: false, error: ...}` payload; nothing here aborts the process.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unusable request field
    #[error("{0}")]
    Validation(String),

    /// Referenced session/checkin does not exist
    #[error("{0}")]
    NotFound(String),

    /// The (student, session) pair already has a checkin
    #[error("Already checked in")]
    DuplicateCheckin,

    /// Unparseable spreadsheet structure
    #[error("{0}")]
    MalformedInput(String),

    #[error("Internal Server Error")]
    Database(#[from] sqlx::Error),

    #[error("Internal Server Error")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            // User-facing conflict, not a server fault
            ApiError::DuplicateCheckin => StatusCode::BAD_REQUEST,
            ApiError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) | ApiError::Spreadsheet(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code() == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.source_message(), "Request failed");
        }

        HttpResponse::build(self.status_code()).json(json!({
            "ok": false,
            "error": self.to_string(),
        }))
    }
}

impl ApiError {
    // Underlying cause for the log; the HTTP body stays generic for 500s.
    fn source_message(&self) -> String {
        match self {
            ApiError::Database(e) => e.to_string(),
            ApiError::Spreadsheet(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}
