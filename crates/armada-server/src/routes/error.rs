//! HTTP error mapping
//!
//! Turns domain errors, body rejections and auth failures into a status code
//! plus a JSON `ErrorResponse`.

use armada::{DomainError, ErrorKind};
use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ErrorResponse;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

/// JSON body extractor whose rejections carry an `ErrorResponse`
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl ApiError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status: status_for(kind),
            body: ErrorResponse {
                code: kind,
                message: message.into(),
            },
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Unimplemented => StatusCode::NOT_IMPLEMENTED,
        ErrorKind::AlreadyExists | ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

/// Undecodable bodies, wrong content types and mistyped fields are all
/// malformed input.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(
            ErrorKind::InvalidArgument,
            format!("invalid request body: {}", rejection.body_text()),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = %self.body.code, error = %self.body.message, "request failed");
        }
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armada::StoreError;

    #[test]
    fn test_domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::invalid_argument("x"), StatusCode::BAD_REQUEST),
            (DomainError::not_found("service", "x"), StatusCode::NOT_FOUND),
            (DomainError::unimplemented("x"), StatusCode::NOT_IMPLEMENTED),
            (DomainError::Conflict("x".into()), StatusCode::CONFLICT),
            (DomainError::Store(StoreError::Exist), StatusCode::CONFLICT),
            (DomainError::Store(StoreError::Closed), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn test_unauthenticated_is_401() {
        let err = ApiError::unauthenticated("missing bearer token");
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.body.code, ErrorKind::Unauthenticated);
    }

    #[test]
    fn test_message_is_preserved() {
        let err = ApiError::from(DomainError::invalid_argument("invalid cpu value 5"));
        assert_eq!(err.body.code, ErrorKind::InvalidArgument);
        assert_eq!(err.body.message, "invalid argument: invalid cpu value 5");
    }
}
