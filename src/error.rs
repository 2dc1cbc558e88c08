use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use tracing::{error, warn};

/// JSON error body returned by every failing endpoint.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub fields: serde_json::Value,
}

/// Application-level errors, constructed close to their detection point
/// (builder, repository, auth extractor) and translated to an HTTP status
/// at the response boundary.
#[derive(Debug)]
pub enum ApiError {
    /// Bad or missing input (empty partial update, schema mismatch)
    BadRequest(String),

    /// Missing or insufficient credentials
    Unauthorized(String),

    /// No matching record
    NotFound(String),

    /// Store failure, fatal for the request
    Database(sqlx::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Database(e)
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Bad request".to_string(),
                    fields: serde_json::json!({"message": msg}),
                })
            }
            ApiError::Unauthorized(msg) => {
                warn!("Unauthorized: {}", msg);
                HttpResponse::Unauthorized().json(ErrorResponse {
                    error: "Unauthorized".to_string(),
                    fields: serde_json::json!({"message": msg}),
                })
            }
            ApiError::NotFound(msg) => {
                warn!("Not found: {}", msg);
                HttpResponse::NotFound().json(ErrorResponse {
                    error: "Not found".to_string(),
                    fields: serde_json::json!({"message": msg}),
                })
            }
            ApiError::Database(e) => {
                // Log the full error, return a generic body (safe for production)
                error!("Database error: {:?}", e);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to process request".to_string(),
                    fields: serde_json::json!({"message": "Database error occurred"}),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn bad_request_maps_to_400() {
        let err = ApiError::BadRequest("no fields to update".into());
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let err = ApiError::Unauthorized("missing bearer token".into());
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::NotFound("no job with id: 42".into());
        assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_error_maps_to_500() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_error_body_does_not_leak_details() {
        let err = ApiError::Database(sqlx::Error::PoolTimedOut);
        let display = format!("{}", err);
        assert!(display.contains("Database error"));
        // The response body must stay generic regardless of the inner error.
        let response = err.error_response();
        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
