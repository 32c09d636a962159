//! Error type for the HTTP layer.
//!
//! [`ApiError`] adds the transport-level failures (wrong method, missing or
//! malformed form input) to [`hashkeep::Error`] and maps every case onto an
//! HTTP status with a plain-text body.
//!
//! ## Status mapping
//! - `MethodNotAllowed`: 405
//! - `MissingPassword`, `InvalidForm`, `Core(InvalidJobId)`: 400
//! - `Core(NotFound)`: 404
//! - `ShuttingDown`: 503

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The route exists but only accepts `required`.
    #[error("{required} method is required")]
    MethodNotAllowed { required: &'static str },

    /// The form body had no `password` field.
    #[error("password parameter is required")]
    MissingPassword,

    /// The form body could not be decoded.
    #[error("Invalid form: {0}")]
    InvalidForm(String),

    /// Shutdown has fired; no new background work is accepted.
    #[error("Service is shutting down")]
    ShuttingDown,

    #[error(transparent)]
    Core(#[from] hashkeep::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::MissingPassword | ApiError::InvalidForm(_) => StatusCode::BAD_REQUEST,
            ApiError::ShuttingDown => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Core(err) => match err {
                hashkeep::Error::NotFound { .. } => StatusCode::NOT_FOUND,
                hashkeep::Error::InvalidJobId { .. } => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            // The raw input is not echoed back to the client.
            ApiError::Core(hashkeep::Error::InvalidJobId { .. }) => "Invalid ID".to_string(),
            other => other.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(%status, "{body}");
        } else {
            tracing::debug!(%status, "{body}");
        }

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashkeep::JobId;

    #[test]
    fn maps_core_errors() {
        let id = JobId::new(3).unwrap();
        let cases = [
            (ApiError::from(hashkeep::Error::NotFound { id }), StatusCode::NOT_FOUND),
            (
                ApiError::from(hashkeep::Error::InvalidJobId { input: "x".into() }),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status(), status);
        }
    }

    #[test]
    fn transport_errors_map_to_status() {
        assert_eq!(
            ApiError::MethodNotAllowed { required: "GET" }.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ApiError::MissingPassword.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::ShuttingDown.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn messages_match_wire_format() {
        let id = JobId::new(3).unwrap();
        assert_eq!(
            ApiError::from(hashkeep::Error::NotFound { id }).to_string(),
            "Id 3 not found"
        );
        assert_eq!(
            ApiError::MethodNotAllowed { required: "POST" }.to_string(),
            "POST method is required"
        );
        assert_eq!(
            ApiError::MissingPassword.to_string(),
            "password parameter is required"
        );
        assert_eq!(
            ApiError::ShuttingDown.to_string(),
            "Service is shutting down"
        );
    }
}
