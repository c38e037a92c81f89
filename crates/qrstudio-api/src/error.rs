//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// Well-formed input that cannot be turned into a code yet.
  #[error("unprocessable: {0}")]
  Unprocessable(String),

  #[error("unsupported media type: {0}")]
  UnsupportedMediaType(String),

  #[error("payload too large: {0}")]
  PayloadTooLarge(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("internal error: {0}")]
  Internal(String),
}

impl ApiError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    ApiError::Store(Box::new(e))
  }
}

impl From<qrstudio_core::Error> for ApiError {
  fn from(e: qrstudio_core::Error) -> Self {
    use qrstudio_core::Error as E;
    match e {
      E::ProfileNotFound(_) => ApiError::NotFound(e.to_string()),
      E::NotAnImage(_) => ApiError::UnsupportedMediaType(e.to_string()),
      E::ImageTooLarge { .. } => ApiError::PayloadTooLarge(e.to_string()),
      E::MissingName | E::InvalidSlug(_) | E::InvalidColor(_) | E::InvalidStyle(_) => {
        ApiError::BadRequest(e.to_string())
      }
    }
  }
}

impl From<qrstudio_render::Error> for ApiError {
  fn from(e: qrstudio_render::Error) -> Self {
    use qrstudio_render::Error as E;
    match e {
      E::Style(inner) => inner.into(),
      E::Incomplete | E::NotPublished => ApiError::Unprocessable(e.to_string()),
      E::InvalidColor(_) | E::Qr(_) | E::Logo(_) | E::Base64(_) | E::Image(_) => {
        ApiError::BadRequest(e.to_string())
      }
      E::Font(_) => ApiError::Internal(e.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unprocessable(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
      ApiError::UnsupportedMediaType(m) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, m.clone()),
      ApiError::PayloadTooLarge(m) => (StatusCode::PAYLOAD_TOO_LARGE, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
      ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
