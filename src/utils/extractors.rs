use axum::{
    Form, Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// Request body decoded by its declared `Content-Type`: JSON or url-encoded form.
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| {
                let essence = value.split(';').next().unwrap_or("");
                essence.trim().to_ascii_lowercase()
            })
            .ok_or_else(|| {
                AppError::MalformedInput("Missing Content-Type header".to_string())
            })?;

        match content_type.as_str() {
            JSON => {
                let Json(value) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(|e| rejected(e.status(), e.body_text()))?;
                Ok(Self(value))
            }
            FORM => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|e| rejected(e.status(), e.body_text()))?;
                Ok(Self(value))
            }
            other => Err(AppError::MalformedInput(format!(
                "Unsupported Content-Type: {}",
                other
            ))),
        }
    }
}

/// `Json<T>` whose rejections surface as `AppError`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| rejected(e.status(), e.body_text()))?;
        Ok(Self(value))
    }
}

/// `Form<T>` whose rejections surface as `AppError`.
#[derive(Debug)]
pub struct FormBody<T>(pub T);

impl<S, T> FromRequest<S> for FormBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| rejected(e.status(), e.body_text()))?;
        Ok(Self(value))
    }
}

#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| rejected(e.status(), e.body_text()))?;
        Ok(Self(value))
    }
}

/// Numeric `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct ProductId(pub i64);

impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::MalformedInput("Product id must be an integer".to_string()))?;
        Ok(Self(id))
    }
}

/// Oversized bodies keep their 413; every other rejection is the client's malformed input.
fn rejected(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::MalformedInput(message)
    }
}
