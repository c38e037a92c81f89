//! Handlers for `/profiles` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/profiles` | Body: `ProfileInput`; 201 on create, 200 on update |
//! | `GET`  | `/profiles/{slug}` | 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use qrstudio_core::{
  profile::{Profile, ProfileInput},
  store::ProfileStore,
};
use serde::Serialize;

use crate::{ApiState, error::ApiError};

/// A stored profile plus its public page URL.
#[derive(Debug, Serialize)]
pub struct Saved {
  pub profile: Profile,
  pub url:     String,
}

/// `POST /profiles`
pub async fn upsert<S>(
  State(state): State<ApiState<S>>,
  Json(input): Json<ProfileInput>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ProfileStore,
{
  input.validate()?;

  let slug = input.slug.clone().filter(|s| !s.is_empty());
  if let Some(slug) = &slug {
    let existing = state.store.get_profile(slug).await.map_err(ApiError::store)?;
    if existing.is_none() {
      return Err(ApiError::NotFound(format!("profile {slug} not found")));
    }
  }

  let profile = state.store.upsert_profile(input).await.map_err(ApiError::store)?;
  let status = if slug.is_some() { StatusCode::OK } else { StatusCode::CREATED };
  let url = profile.link(&state.public_base_url);
  Ok((status, Json(Saved { profile, url })))
}

/// `GET /profiles/{slug}`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(slug): Path<String>,
) -> Result<Json<Profile>, ApiError>
where
  S: ProfileStore,
{
  let profile = state
    .store
    .get_profile(&slug)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("profile {slug} not found")))?;
  Ok(Json(profile))
}
