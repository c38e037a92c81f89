//! Handlers for `/codes` endpoints: encoding, validation and rendering.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/codes/encode` | `{payload, profile_link?}` → `{kind, value, valid}` |
//! | `POST` | `/codes/render` | `{payload, profile_link?, style, format, resolution, preview}` → image |

use axum::{
  Json,
  extract::State,
  http::{HeaderValue, header},
  response::{IntoResponse, Response},
};
use chrono::Utc;
use qrstudio_core::{
  payload::{Payload, QrKind},
  store::ProfileStore,
  style::StyleOptions,
};
use qrstudio_render::{ExportFormat, Logo, LogoRef, Resolution, export::preview_value};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

// ─── Encode ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EncodeBody {
  pub payload:      Payload,
  #[serde(default)]
  pub profile_link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Encoded {
  pub kind:  Option<QrKind>,
  pub value: String,
  pub valid: bool,
}

/// `POST /codes/encode`
pub async fn encode(Json(body): Json<EncodeBody>) -> Json<Encoded> {
  let link = body.profile_link.as_deref();
  Json(Encoded {
    kind:  body.payload.kind(),
    value: qrstudio_encode::encode(&body.payload, link),
    valid: qrstudio_encode::is_valid(&body.payload, link),
  })
}

// ─── Render ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RenderBody {
  pub payload:      Payload,
  #[serde(default)]
  pub profile_link: Option<String>,
  #[serde(default)]
  pub style:        StyleOptions,
  #[serde(default)]
  pub format:       ExportFormat,
  #[serde(default)]
  pub resolution:   Resolution,
  /// Draw the placeholder instead of refusing an incomplete payload, and
  /// skip the download headers.
  #[serde(default)]
  pub preview:      bool,
}

/// `POST /codes/render`
pub async fn render<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<RenderBody>,
) -> Result<Response, ApiError>
where
  S: ProfileStore,
{
  body.style.validate()?;
  let logo = resolve_logo(state.store.as_ref(), body.style.logo_url.as_deref()).await?;
  let RenderBody { payload, profile_link, style, format, resolution, preview } = body;

  let rendered = tokio::task::spawn_blocking(move || {
    if preview {
      let value = qrstudio_encode::encode(&payload, profile_link.as_deref());
      qrstudio_render::render(preview_value(&value), &style, logo.as_ref(), format, resolution)
        .map(|bytes| (bytes, None))
    } else {
      qrstudio_render::export(
        &payload,
        profile_link.as_deref(),
        &style,
        logo.as_ref(),
        format,
        resolution,
        Utc::now().timestamp_millis(),
      )
      .map(|e| (e.bytes, Some(e.file_name)))
    }
  })
  .await
  .map_err(|e| {
    tracing::error!(error = %e, "render task failed");
    ApiError::Internal("rendering failed".into())
  })?;

  let (bytes, file_name) = rendered?;
  let mut response = bytes.into_response();
  let headers = response.headers_mut();
  headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(format.content_type()));
  if let Some(name) = file_name {
    let disposition = format!("attachment; filename=\"{name}\"");
    if let Ok(value) = HeaderValue::from_str(&disposition) {
      headers.insert(header::CONTENT_DISPOSITION, value);
    }
  }
  Ok(response)
}

/// Load the overlay a style points at. Hosted images come from the store;
/// external URLs are not fetched server-side.
async fn resolve_logo<S>(store: &S, reference: Option<&str>) -> Result<Option<Logo>, ApiError>
where
  S: ProfileStore,
{
  let Some(reference) = reference.filter(|r| !r.is_empty()) else {
    return Ok(None);
  };

  match LogoRef::parse(reference)? {
    LogoRef::Inline(bytes) => Ok(Some(Logo::from_bytes(&bytes)?)),
    LogoRef::Hosted(name) => {
      let image = store
        .get_image(name)
        .await
        .map_err(ApiError::store)?
        .ok_or_else(|| ApiError::BadRequest(format!("logo image {name} not found")))?;
      Ok(Some(Logo::from_bytes(&image.bytes)?))
    }
    LogoRef::External(url) => {
      tracing::warn!(%url, "not fetching external logo; rendering without it");
      Ok(None)
    }
  }
}
