use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{identity::IdentityError, store::StoreError};

pub const INVALID_PARAMETER: &str = "Invalid parameter.";

/// Error returned by every request handler.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    DuplicateIdentity(String),

    #[error("Password incorrect")]
    PasswordIncorrect,

    #[error("{0}")]
    Provider(String),

    #[error("{0}")]
    Store(String),

    #[error("Partial failure: {0}")]
    PartialFailure(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Validation failure naming the required fields, e.g. `email and password`.
    pub fn missing(required: &str) -> Self {
        AppError::InvalidInput(format!("{INVALID_PARAMETER} Required {required}."))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::PasswordIncorrect => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateIdentity(_) => StatusCode::CONFLICT,
            AppError::Provider(_) | AppError::Store(_) => StatusCode::BAD_GATEWAY,
            AppError::PartialFailure(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<IdentityError> for AppError {
    fn from(e: IdentityError) -> Self {
        match e {
            IdentityError::InvalidEmail(_) => AppError::InvalidInput(e.to_string()),
            IdentityError::Duplicate(_) => AppError::DuplicateIdentity(e.to_string()),
            IdentityError::NotFound(_) => AppError::NotFound(e.to_string()),
            IdentityError::Provider(_) => AppError::Provider(e.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => AppError::NotFound(e.to_string()),
            StoreError::Malformed(_) | StoreError::Backend(_) => AppError::Store(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            _ if status.is_server_error() => {
                tracing::error!(%status, error = %self, "request failed")
            }
            _ => tracing::warn!(%status, error = %self, "request rejected"),
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Collection;

    #[test]
    fn missing_fields_message() {
        let err = AppError::missing("email and password");
        assert_eq!(
            err.to_string(),
            "Invalid parameter. Required email and password."
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn taxonomy_maps_to_distinct_statuses() {
        assert_eq!(AppError::PasswordIncorrect.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::DuplicateIdentity("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(AppError::Provider("x".into()).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::Store("x".into()).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::PartialFailure("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn collaborator_errors_keep_their_kind() {
        let dup: AppError = IdentityError::Duplicate("a@b.com".into()).into();
        assert!(matches!(dup, AppError::DuplicateIdentity(ref m) if m.contains("a@b.com")));

        let bad: AppError = IdentityError::InvalidEmail("nope".into()).into();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let gone: AppError = StoreError::NotFound {
            collection: Collection::Timezones,
            id: "t1".into(),
        }
        .into();
        assert!(matches!(gone, AppError::NotFound(ref m) if m.contains("Timezones/t1")));

        let down: AppError = StoreError::Backend(sqlx::Error::PoolTimedOut).into();
        assert_eq!(down.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn response_body_is_the_message() {
        let resp = AppError::PasswordIncorrect.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Password incorrect");
    }
}
