//! Request extractors with API-shaped rejections.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejections (missing content type, syntax errors,
/// wrong field types) become a 400 `{error, code}` body via [`AppError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
