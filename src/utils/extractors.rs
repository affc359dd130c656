use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use http::HeaderMap;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{AppError, Result};

pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Invalid token format".to_string()))
}

/// Path ids arrive as strings so a malformed id gets the JSON error body
/// instead of axum's plain-text rejection.
pub fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation("Invalid ID format".to_string()))
}

/// `Json` whose rejections become validation errors, so a body of the wrong
/// shape gets the same 400 `{kind, message}` response as any other bad input.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::Validation(rejection.body_text()))?;

        Ok(Self(value))
    }
}
