//! Serving uploaded images.

use axum::{
  extract::{Path, State},
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use qrstudio_core::store::ProfileStore;

use crate::{AppState, error::Error};

/// `Cache-Control` sent with stored images.
pub const CACHE_CONTROL: &str = "public, max-age=3600";

/// Stored images never run scripts or load subresources.
pub const IMAGE_CSP: &str = "default-src 'none'; sandbox";

/// `GET /images/{name}`
pub async fn serve<S>(
  State(state): State<AppState<S>>,
  Path(name): Path<String>,
) -> Result<Response, Error>
where
  S: ProfileStore,
{
  let image = state
    .store
    .get_image(&name)
    .await
    .map_err(Error::store)?
    .ok_or(Error::NotFound)?;

  Ok(
    (
      StatusCode::OK,
      [
        (header::CONTENT_TYPE, image.meta.content_type),
        (header::CACHE_CONTROL, CACHE_CONTROL.to_owned()),
        (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_owned()),
        (header::CONTENT_SECURITY_POLICY, IMAGE_CSP.to_owned()),
      ],
      image.bytes,
    )
      .into_response(),
  )
}
