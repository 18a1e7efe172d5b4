use axum::{
    extract::rejection::PathRejection,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid date '{value}', expected YYYY-MM-DD: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: time::error::Parse,
    },
    #[error("Invalid path: {0}")]
    InvalidPath(#[from] PathRejection),
    #[error("Failed to read climate data: {0}")]
    DataAccess(#[from] db::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Method {method} not allowed on {path}")]
    MethodNotAllowed { method: Method, path: String },
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidDate { .. } => StatusCode::BAD_REQUEST,
            Error::InvalidPath(rejection) => rejection.status(),
            Error::DataAccess(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

/// Body returned with every non-2xx response
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("error handling request: {}", self);
        } else {
            log::warn!("rejected request: {}", self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
