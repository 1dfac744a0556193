//! Error handling - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use blog_core::{DomainError, RepoError};
use blog_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => {
                // Expected for stale links; not an error.
                tracing::debug!("Not found: {}", detail);
                ErrorResponse::not_found(detail)
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, key } => {
                AppError::NotFound(format!("{} '{}' not found", entity_type, key))
            }
            DomainError::MissingAnnotation(name) => {
                AppError::Internal(format!("missing annotation {}", name))
            }
            DomainError::Repo(err) => err.into(),
        }
    }
}

impl From<RepoError> for AppError {
    /// Logged once, by `error_response`.
    fn from(err: RepoError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_not_found_maps_to_404() {
        let err: AppError = DomainError::not_found("post", "missing").into();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(matches!(
            err,
            AppError::NotFound(ref detail) if detail == "post 'missing' not found"
        ));
    }

    #[actix_web::test]
    async fn test_repository_failure_is_a_generic_500() {
        let err: AppError =
            DomainError::Repo(RepoError::Query("relation \"posts\" does not exist".to_string()))
                .into();

        // The cause is kept for the log line.
        assert!(matches!(err, AppError::Internal(ref detail) if detail.contains("posts")));

        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], 500);
        assert!(!body.to_string().contains("relation"));
    }

    #[test]
    fn test_duplicate_key_is_internal() {
        let err: AppError = RepoError::Duplicate {
            entity_type: "tag",
            key: "python".to_string(),
        }
        .into();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
