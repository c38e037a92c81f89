//! Public web server for QR Studio.
//!
//! Serves the hosted business-card pages, their contact downloads and the
//! uploaded images, and mounts the JSON API from `qrstudio-api` under `/api`.

pub mod error;
pub mod etag;
pub mod handlers;
pub mod page;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use qrstudio_api::ApiState;
use qrstudio_core::store::{MAX_IMAGE_BYTES, ProfileStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{health, images, profile};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `QRSTUDIO_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:             String,
  #[serde(default = "default_port")]
  pub port:             u16,
  /// Origin used in profile links and image URLs.
  #[serde(default = "default_public_base_url")]
  pub public_base_url:  String,
  #[serde(default = "default_store_path")]
  pub store_path:       PathBuf,
  #[serde(default = "default_max_upload_bytes")]
  pub max_upload_bytes: usize,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 8080 }
fn default_public_base_url() -> String { "http://localhost:8080".to_owned() }
fn default_store_path() -> PathBuf { PathBuf::from("qrstudio.db") }
fn default_max_upload_bytes() -> usize { MAX_IMAGE_BYTES }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:             default_host(),
      port:             default_port(),
      public_base_url:  default_public_base_url(),
      store_path:       default_store_path(),
      max_upload_bytes: default_max_upload_bytes(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      config: Arc::clone(&self.config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: public pages plus `/api`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ProfileStore + 'static,
{
  let api = qrstudio_api::api_router(ApiState {
    store:            Arc::clone(&state.store),
    public_base_url:  state.config.public_base_url.clone(),
    max_upload_bytes: state.config.max_upload_bytes,
  });

  Router::new()
    .route("/p/{slug}",             get(profile::page::<S>))
    .route("/p/{slug}/contact.vcf", get(profile::contact::<S>))
    .route("/images/{name}",        get(images::serve::<S>))
    .route("/healthz",              get(health))
    .with_state(state)
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests;
