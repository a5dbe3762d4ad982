use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use crate::Error;

/// JSON error body: `{"error": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error message attached to the response so the logging middleware can report it
#[derive(Debug, Clone)]
pub struct ErrorMessage(pub String);

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<Error> for ApiError {
    /// Only malformed input maps to 400. Lookups that find nothing are
    /// reported as 500, the same as storage failures.
    fn from(err: Error) -> Self {
        let status = match err {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_)
            | Error::Storage(_)
            | Error::Io(_)
            | Error::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (
            self.status,
            Json(ErrorResponse {
                error: self.message.clone(),
            }),
        )
            .into_response();
        response.extensions_mut().insert(ErrorMessage(self.message));
        response
    }
}

/// Parse a path id, rejecting anything that is not an integer
pub fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse().map_err(|_| ApiError::bad_request("Invalid ID format"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from(Error::Validation("x".into())).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(Error::NotFound("Note 1 not found".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::from(Error::LockPoisoned).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("-1").unwrap(), -1);
        assert_eq!(parse_id("abc").unwrap_err().status(), StatusCode::BAD_REQUEST);
        assert!(parse_id("1.5").is_err());
    }
}
