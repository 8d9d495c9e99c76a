//! Error types for the HTTP transport.

use crate::storage::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur while serving a request.
///
/// Storage errors pass through with their own text; the transport only adds
/// failures of its own (bad bodies, records aimed at the wrong URL).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The store rejected the operation.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// The request body is not a valid resource document.
    #[error("{0}")]
    InvalidBody(String),

    /// A record names a different category than the URL it was sent to.
    #[error("Illegal Category:{0}")]
    CategoryMismatch(String),

    /// A record names a different ID than the key it was supplied under.
    #[error("Undefined ID: did you mean {body} or {url}?")]
    IdConflict { body: String, url: String },

    /// The method is not served on this path.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Nothing is served on this path.
    #[error("page not found")]
    NotFound,
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    ///
    /// Every store or body failure is a 500, matching what existing clients
    /// of the REST API expect.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Storage(_)
            | Self::InvalidBody(_)
            | Self::CategoryMismatch(_)
            | Self::IdConflict { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            warn!(error = %self, "Request rejected");
        }

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::Storage(StoreError::EmptyStorage).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::InvalidBody("eof".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ApiError::from(StoreError::ResourceNotFound).to_string(),
            "Resource not found"
        );
        assert_eq!(
            ApiError::CategoryMismatch("b".into()).to_string(),
            "Illegal Category:b"
        );
        assert_eq!(
            ApiError::IdConflict {
                body: "q".into(),
                url: "x".into()
            }
            .to_string(),
            "Undefined ID: did you mean q or x?"
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::Storage(StoreError::EmptyList).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
