//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use homedeck_domain::error::{HomeDeckError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps failures to an HTTP response with appropriate status code.
#[derive(Debug)]
pub enum ApiError {
    /// An error returned by an application service.
    Service(HomeDeckError),
    /// The request body could not be decoded.
    Body(JsonRejection),
}

impl From<HomeDeckError> for ApiError {
    fn from(err: HomeDeckError) -> Self {
        Self::Service(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Service(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        Self::Body(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Service(HomeDeckError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Service(HomeDeckError::NotFound(err)) => {
                (StatusCode::NOT_FOUND, err.to_string())
            }
            Self::Service(HomeDeckError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            Self::Body(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
