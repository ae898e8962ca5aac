//! Extractors that report rejections as [`GatewayError`] JSON bodies.

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;

use crate::error::GatewayError;

/// `axum::Json` with rejections mapped to `400 {"error": ...}`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(GatewayError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` with rejections mapped to `400 {"error": ...}`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(GatewayError))]
pub struct ApiPath<T>(pub T);
