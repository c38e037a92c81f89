//! JSON REST API for QR Studio.
//!
//! Exposes an axum [`Router`] backed by any
//! [`qrstudio_core::store::ProfileStore`]. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", qrstudio_api::api_router(api_state))
//! ```

pub mod codes;
pub mod error;
pub mod images;
pub mod profiles;

use std::sync::Arc;

use axum::{
  Json, Router,
  extract::DefaultBodyLimit,
  routing::{get, post},
};
use qrstudio_core::{
  store::{MAX_IMAGE_BYTES, ProfileStore},
  template::{Template, templates},
};

pub use error::ApiError;
pub use images::image_url;

/// State shared by the API handlers.
pub struct ApiState<S> {
  pub store:            Arc<S>,
  /// Origin public links are built on, e.g. `https://qr.example`.
  pub public_base_url:  String,
  pub max_upload_bytes: usize,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:            Arc::clone(&self.store),
      public_base_url:  self.public_base_url.clone(),
      max_upload_bytes: self.max_upload_bytes,
    }
  }
}

impl<S> ApiState<S> {
  pub fn new(store: Arc<S>, public_base_url: impl Into<String>) -> Self {
    Self {
      store,
      public_base_url: public_base_url.into(),
      max_upload_bytes: MAX_IMAGE_BYTES,
    }
  }
}

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: ProfileStore + 'static,
{
  // Raw upload bodies may exceed the 2 MB extractor default.
  let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes.max(1) + 1);

  Router::new()
    // Profiles
    .route("/profiles", post(profiles::upsert::<S>))
    .route("/profiles/{slug}", get(profiles::get_one::<S>))
    // Images
    .route("/images", post(images::upload::<S>).layer(upload_limit))
    // Codes
    .route("/codes/encode", post(codes::encode))
    .route("/codes/render", post(codes::render::<S>))
    .route("/templates", get(list_templates))
    .with_state(state)
}

/// `GET /templates`
async fn list_templates() -> Json<Vec<Template>> { Json(templates()) }

#[cfg(test)]
mod tests;
