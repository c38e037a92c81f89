//! Async HTTP client wrapping the QR Studio JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use qrstudio_core::profile::{Profile, ProfileInput};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

/// Connection settings for the API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// `POST /api/profiles` response.
#[derive(Debug, Deserialize)]
pub struct Saved {
  pub profile: Profile,
  pub url:     String,
}

/// `POST /api/images` response.
#[derive(Debug, Deserialize)]
pub struct Uploaded {
  pub name: String,
  pub url:  String,
}

/// Async HTTP client for the JSON REST API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  // ── Profiles ──────────────────────────────────────────────────────────────

  /// `POST /api/profiles`
  pub async fn upsert_profile(&self, input: &ProfileInput) -> Result<Saved> {
    let resp = self
      .client
      .post(self.url("/profiles"))
      .json(input)
      .send()
      .await
      .context("POST /profiles failed")?;

    let resp = check(resp, "POST /profiles").await?;
    resp.json().await.context("deserialising saved profile")
  }

  /// `GET /api/profiles/{slug}`; `None` on 404.
  pub async fn get_profile(&self, slug: &str) -> Result<Option<Profile>> {
    let resp = self
      .client
      .get(self.url(&format!("/profiles/{slug}")))
      .send()
      .await
      .context("GET /profiles failed")?;

    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    let resp = check(resp, "GET /profiles").await?;
    resp.json().await.map(Some).context("deserialising profile")
  }

  // ── Images ────────────────────────────────────────────────────────────────

  /// `POST /api/images?filename=<name>`
  pub async fn upload_image(
    &self,
    bytes: Vec<u8>,
    content_type: &str,
    filename: &str,
  ) -> Result<Uploaded> {
    let resp = self
      .client
      .post(self.url("/images"))
      .query(&[("filename", filename)])
      .header(reqwest::header::CONTENT_TYPE, content_type)
      .body(bytes)
      .send()
      .await
      .context("POST /images failed")?;

    let resp = check(resp, "POST /images").await?;
    resp.json().await.context("deserialising upload result")
  }

  /// Download any URL (hosted logos, remote images).
  pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
    let resp = self
      .client
      .get(url)
      .send()
      .await
      .with_context(|| format!("GET {url} failed"))?;
    let resp = check(resp, url).await?;
    Ok(resp.bytes().await.context("reading body")?.to_vec())
  }

  /// Absolute URL of a hosted image.
  pub fn image_url(&self, name: &str) -> String {
    format!("{}/images/{name}", self.config.base_url.trim_end_matches('/'))
  }
}

/// Turn a non-2xx response into an error carrying the API's message.
async fn check(resp: Response, what: &str) -> Result<Response> {
  if resp.status().is_success() {
    return Ok(resp);
  }
  let status = resp.status();
  let message = resp
    .json::<serde_json::Value>()
    .await
    .ok()
    .and_then(|v| v["error"].as_str().map(str::to_owned))
    .unwrap_or_default();
  Err(anyhow!("{what} → {status} {message}"))
}
