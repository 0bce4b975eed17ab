use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::pkg::internal::ai::read::DocumentKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported document format: {0:?}")]
    UnsupportedFormat(String),
    #[error("failed to extract text from {kind} document: {detail}")]
    Extraction { kind: DocumentKind, detail: String },
    #[error("completion is not a usable resume record: {0}")]
    Parse(String),
    #[error("completion service failure: {0}")]
    Service(String),
    #[error("completion service timed out after {0:?}")]
    ServiceTimeout(Duration),
    #[error("record store failure: {0}")]
    Persistence(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Template(#[from] askama::Error),
}

impl Error {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::ServiceTimeout(_))
    }

    fn status(&self) -> StatusCode {
        match self {
            Error::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Error::Extraction { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Parse(_) | Error::Service(_) => StatusCode::BAD_GATEWAY,
            Error::ServiceTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {}", &self);
        let body = Json(json!({
            "error": self.to_string(),
            "retryable": self.is_retryable(),
        }));
        (self.status(), body).into_response()
    }
}
