use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::any::Any;
use thiserror::Error;

pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Upload error: {0}")]
    UploadError(String),
    #[error("Template error: {0}")]
    TemplateError(String),
}

impl IntoResponse for TallyError {
    fn into_response(self) -> Response {
        match &self {
            TallyError::InvalidRequest(msg) => {
                warn!("rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone()).into_response()
            }
            TallyError::DatabaseError(_)
            | TallyError::UploadError(_)
            | TallyError::TemplateError(_) => {
                error!("{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
        }
    }
}

impl From<sqlx::Error> for TallyError {
    fn from(error: sqlx::Error) -> Self {
        TallyError::DatabaseError(error.to_string())
    }
}

impl From<std::io::Error> for TallyError {
    fn from(error: std::io::Error) -> Self {
        TallyError::UploadError(error.to_string())
    }
}

impl From<minijinja::Error> for TallyError {
    fn from(error: minijinja::Error) -> Self {
        TallyError::TemplateError(error.to_string())
    }
}

impl From<axum::extract::multipart::MultipartError> for TallyError {
    fn from(error: axum::extract::multipart::MultipartError) -> Self {
        TallyError::InvalidRequest(format!("Malformed upload: {}", error.body_text()))
    }
}

/// Last-resort handler for `CatchPanicLayer`: log and answer with the generic 500.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    error!("request handler panicked: {}", details);

    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
}
