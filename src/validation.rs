use axum::Json;

use crate::error::AppError;

/// A request body whose fields are all optional on the wire.
///
/// `validate` returns `None` when any required field is missing, in which
/// case the handler fails with the `REQUIRED` field list before touching a
/// collaborator.
pub trait Validate: Default {
    type Output;
    const REQUIRED: &'static str;

    fn validate(self) -> Option<Self::Output>;
}

/// A missing or unparsable body counts as every field missing.
pub fn validated<T: Validate>(body: Option<Json<T>>) -> Result<T::Output, AppError> {
    let payload = body.map(|Json(p)| p).unwrap_or_default();
    payload
        .validate()
        .ok_or_else(|| AppError::missing(T::REQUIRED))
}

/// Empty strings count as missing.
pub fn text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
