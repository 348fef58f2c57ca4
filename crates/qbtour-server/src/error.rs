//! Mapping of library errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use qbtour::OrmError;
use serde::Serialize;

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// A failed request. Every failure is answered; none leaves the client waiting.
#[derive(Debug)]
pub struct AppError(pub OrmError);

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self.0 {
            OrmError::NotFound(_) => StatusCode::NOT_FOUND,
            OrmError::Validation(_) => StatusCode::BAD_REQUEST,
            OrmError::UniqueViolation(_) | OrmError::ForeignKeyViolation(_) => {
                StatusCode::CONFLICT
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<OrmError> for AppError {
    fn from(err: OrmError) -> Self {
        Self(err)
    }
}

impl From<qbtour::deadpool_postgres::PoolError> for AppError {
    fn from(err: qbtour::deadpool_postgres::PoolError) -> Self {
        Self(OrmError::from(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::warn!(error = %self.0, "request rejected");
        }

        let body = ErrorResponse {
            error: self.0.to_string(),
            code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            AppError(OrmError::not_found("no user left")).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError(OrmError::validation("bad identifier")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError(OrmError::ForeignKeyViolation("useraddress_user_id_fkey".into()))
                .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError(OrmError::Pool("connection refused".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn response_carries_json_body() {
        let response = AppError(OrmError::not_found("no user left to delete")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], 404);
        assert_eq!(body["error"], "not found: no user left to delete");
    }
}
