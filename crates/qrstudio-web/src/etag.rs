//! ETag computation for profile resources.
//!
//! A profile's ETag is a SHA-256 over its slug and last update time, so it
//! changes exactly when the stored record does.

use axum::http::{HeaderMap, header};
use qrstudio_core::profile::Profile;
use sha2::{Digest, Sha256};

/// Quoted strong ETag for `profile`.
pub fn compute_etag(profile: &Profile) -> String {
  let mut hasher = Sha256::new();
  hasher.update(profile.slug.as_bytes());
  hasher.update(profile.updated_at.timestamp_micros().to_le_bytes());
  format!("\"{}\"", hex::encode(hasher.finalize()))
}

/// `true` when `If-None-Match` lists `etag` (quoted or not, weak or strong)
/// or is `*`.
pub fn if_none_match(headers: &HeaderMap, etag: &str) -> bool {
  let Some(value) = headers
    .get(header::IF_NONE_MATCH)
    .and_then(|v| v.to_str().ok())
  else {
    return false;
  };
  let bare = etag.trim_matches('"');
  value.split(',').map(str::trim).any(|candidate| {
    candidate == "*"
      || candidate.trim_start_matches("W/").trim_matches('"') == bare
  })
}
