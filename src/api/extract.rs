//! Request extractors whose rejections use the API error body.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` with rejections reported as [`AppError`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
