use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Message returned to clients for any storage failure; the cause is only logged.
pub const STORAGE_ERROR_MESSAGE: &str = "Failed to access vendor storage";

/// Custom error type for API endpoints
///
/// Maps the two failure kinds of the vendor API to HTTP status codes and
/// formats them as JSON `{"error": ...}` bodies.
#[derive(Debug)]
pub enum ApiError {
    /// No vendor matches the identifier from the request path
    VendorNotFound(String),
    /// Reading or writing the vendor file failed
    StorageError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::VendorNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Vendor not found: {}", id),
            ),
            ApiError::StorageError(err) => {
                tracing::error!("Storage error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    STORAGE_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::StorageError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> ErrorResponse {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let response = ApiError::VendorNotFound("42".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_of(response).await;
        assert_eq!(body.error, "Vendor not found: 42");
    }

    #[tokio::test]
    async fn test_storage_error_maps_to_500() {
        let err = anyhow::anyhow!("disk full").context("Failed to write vendor file data.json");
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert_eq!(body.error, STORAGE_ERROR_MESSAGE);
        assert!(!body.error.contains("data.json"));
        assert!(!body.error.contains("disk full"));
    }
}
