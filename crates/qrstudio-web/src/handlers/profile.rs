//! The public profile page and its contact download.

use axum::{
  extract::{Path, State},
  http::{HeaderMap, HeaderValue, StatusCode, header},
  response::{Html, IntoResponse, Response},
};
use qrstudio_core::{profile::Profile, store::ProfileStore};
use qrstudio_encode::{ContactCard, vcard_file_name};

use crate::{
  AppState,
  error::Error,
  etag::{compute_etag, if_none_match},
  page::{render_not_found, render_profile},
};

/// `GET /p/{slug}`
pub async fn page<S>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: ProfileStore,
{
  let Some(profile) = state.store.get_profile(&slug).await.map_err(Error::store)? else {
    tracing::debug!(%slug, "profile page for unknown slug");
    return Ok((StatusCode::NOT_FOUND, Html(render_not_found())).into_response());
  };

  let etag = compute_etag(&profile);
  if if_none_match(&headers, &etag) {
    return Ok(not_modified(&etag));
  }

  let mut response = Html(render_profile(&profile)).into_response();
  set_etag(&mut response, &etag);
  Ok(response)
}

/// `GET /p/{slug}/contact.vcf`
pub async fn contact<S>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: ProfileStore,
{
  let profile = state
    .store
    .get_profile(&slug)
    .await
    .map_err(Error::store)?
    .ok_or(Error::NotFound)?;

  let etag = compute_etag(&profile);
  if if_none_match(&headers, &etag) {
    return Ok(not_modified(&etag));
  }

  let vcard = ContactCard::from_profile(&profile).to_vcard();
  let mut response = (
    StatusCode::OK,
    [(header::CONTENT_TYPE, "text/vcard; charset=utf-8")],
    vcard,
  )
    .into_response();
  if let Ok(value) = HeaderValue::from_str(&content_disposition(&profile)) {
    response.headers_mut().insert(header::CONTENT_DISPOSITION, value);
  }
  set_etag(&mut response, &etag);
  Ok(response)
}

/// `attachment` with an ASCII fallback name and the exact UTF-8 name in
/// `filename*` (RFC 6266).
fn content_disposition(profile: &Profile) -> String {
  let name = vcard_file_name(profile);
  let fallback: String = name
    .chars()
    .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
    .collect();
  format!(
    "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
    urlencoding::encode(&name)
  )
}

fn set_etag(response: &mut Response, etag: &str) {
  if let Ok(value) = HeaderValue::from_str(etag) {
    response.headers_mut().insert(header::ETAG, value);
  }
}

fn not_modified(etag: &str) -> Response {
  let mut response = StatusCode::NOT_MODIFIED.into_response();
  set_etag(&mut response, etag);
  response
}
