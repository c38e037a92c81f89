//! Handler for `POST /images?filename=<name>`.
//!
//! The request body is the raw image. Both the declared `Content-Type` and
//! the bytes themselves must be PNG, JPEG, GIF or WebP.

use axum::{
  Json,
  extract::{Query, State},
  http::{HeaderMap, StatusCode, header},
  response::IntoResponse,
};
use bytes::Bytes;
use qrstudio_core::store::{MAX_IMAGE_BYTES, NewImage, ProfileStore};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct UploadParams {
  /// Uploader-side file name; only the extension is kept.
  pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct Uploaded {
  pub name: String,
  pub url:  String,
}

/// `<base>/images/<name>`.
pub fn image_url(base_url: &str, name: &str) -> String {
  format!("{}/images/{name}", base_url.trim_end_matches('/'))
}

/// `POST /images?filename=<name>`
pub async fn upload<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<UploadParams>,
  headers: HeaderMap,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: ProfileStore,
{
  let content_type = headers
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .unwrap_or_default()
    .to_owned();

  let mut image = NewImage {
    bytes: body.to_vec(),
    content_type,
    original_name: params.filename,
  };
  // The store never accepts more than MAX_IMAGE_BYTES.
  image.validate(state.max_upload_bytes.min(MAX_IMAGE_BYTES))?;

  let sniffed = qrstudio_render::sniff_image(&image.bytes).ok_or_else(|| {
    ApiError::UnsupportedMediaType(format!(
      "body of declared type {} is not a PNG, JPEG, GIF or WebP image",
      image.content_type
    ))
  })?;
  image.content_type = sniffed.to_owned();

  let meta = state.store.put_image(image).await.map_err(ApiError::store)?;
  let url = image_url(&state.public_base_url, &meta.name);
  Ok((StatusCode::CREATED, Json(Uploaded { name: meta.name, url })))
}
