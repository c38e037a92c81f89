//! End-to-end router tests against an in-memory store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use qrstudio_core::{
  profile::{Profile, ProfileInput},
  store::{NewImage, ProfileStore},
};
use qrstudio_store_sqlite::SqliteStore;
use tower::ServiceExt as _;

use crate::{AppState, ServerConfig, router};

async fn setup() -> (Router, Arc<SqliteStore>) {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  let state = AppState {
    store:  Arc::clone(&store),
    config: Arc::new(ServerConfig {
      public_base_url: "https://qr.example".into(),
      ..ServerConfig::default()
    }),
  };
  (router(state), store)
}

async fn ada(store: &SqliteStore) -> Profile {
  store
    .upsert_profile(ProfileInput {
      first_name: "Ada".into(),
      last_name: "Lovelace".into(),
      job_title: Some("Analyst".into()),
      address: Some("London".into()),
      ..ProfileInput::default()
    })
    .await
    .unwrap()
}

async fn get(app: &Router, uri: &str, headers: &[(header::HeaderName, &str)]) -> Response {
  let mut builder = Request::builder().uri(uri);
  for (k, v) in headers {
    builder = builder.header(k, *v);
  }
  app
    .clone()
    .oneshot(builder.body(Body::empty()).unwrap())
    .await
    .unwrap()
}

async fn text(resp: Response) -> String {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn healthz_is_ok() {
  let (app, _) = setup().await;
  let resp = get(&app, "/healthz", &[]).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(text(resp).await, "ok");
}

// ── Profile page ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn profile_page_renders_with_etag() {
  let (app, store) = setup().await;
  let p = ada(&store).await;

  let resp = get(&app, &format!("/p/{}", p.slug), &[]).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(resp.headers().contains_key(header::ETAG));
  let ct = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_owned();
  assert!(ct.starts_with("text/html"), "{ct}");
  let html = text(resp).await;
  assert!(html.contains("<h1>Ada Lovelace</h1>"), "{html}");
}

#[tokio::test]
async fn matching_if_none_match_is_304() {
  let (app, store) = setup().await;
  let p = ada(&store).await;
  let uri = format!("/p/{}", p.slug);

  let first = get(&app, &uri, &[]).await;
  let etag = first.headers()[header::ETAG].to_str().unwrap().to_owned();

  let second = get(&app, &uri, &[(header::IF_NONE_MATCH, etag.as_str())]).await;
  assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
  assert_eq!(second.headers()[header::ETAG], etag.as_str());
}

#[tokio::test]
async fn update_invalidates_etag() {
  let (app, store) = setup().await;
  let p = ada(&store).await;
  let uri = format!("/p/{}", p.slug);
  let etag = get(&app, &uri, &[]).await.headers()[header::ETAG]
    .to_str()
    .unwrap()
    .to_owned();

  store
    .upsert_profile(ProfileInput {
      slug: Some(p.slug.clone()),
      first_name: "Ada".into(),
      last_name: "King".into(),
      ..ProfileInput::default()
    })
    .await
    .unwrap();

  let resp = get(&app, &uri, &[(header::IF_NONE_MATCH, etag.as_str())]).await;
  assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_slug_shows_not_found_page() {
  let (app, _) = setup().await;
  let resp = get(&app, "/p/nope1234", &[]).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert!(text(resp).await.contains("Profile not found"));
}

// ── Contact download ──────────────────────────────────────────────────────────

#[tokio::test]
async fn contact_download_is_a_vcard_attachment() {
  let (app, store) = setup().await;
  let p = ada(&store).await;

  let resp = get(&app, &format!("/p/{}/contact.vcf", p.slug), &[]).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/vcard; charset=utf-8");
  let disposition = resp.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_owned();
  assert!(
    disposition.starts_with("attachment; filename=\"Ada_Lovelace.vcf\""),
    "{disposition}"
  );

  let body = text(resp).await;
  assert!(body.starts_with("BEGIN:VCARD\nVERSION:3.0\nN:Lovelace;Ada;;;\nFN:Ada Lovelace\n"));
  assert!(body.contains("\nTITLE:Analyst\n"));
  assert!(body.contains("\nADR:;;London;;;;\n"));
  assert!(body.ends_with("END:VCARD"));
}

#[tokio::test]
async fn contact_download_for_unknown_slug_is_404() {
  let (app, _) = setup().await;
  let resp = get(&app, "/p/nope1234/contact.vcf", &[]).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ── Images ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn stored_images_are_served_with_cache_headers() {
  let (app, store) = setup().await;
  let meta = store
    .put_image(NewImage {
      bytes:         vec![1, 2, 3, 4],
      content_type:  "image/webp".into(),
      original_name: "logo.webp".into(),
    })
    .await
    .unwrap();

  let resp = get(&app, &format!("/images/{}", meta.name), &[]).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/webp");
  assert_eq!(resp.headers()[header::CACHE_CONTROL], "public, max-age=3600");
  assert_eq!(resp.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
  assert!(
    resp.headers()[header::CONTENT_SECURITY_POLICY]
      .to_str()
      .unwrap()
      .starts_with("default-src 'none'")
  );
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  assert_eq!(bytes.as_ref(), &[1, 2, 3, 4]);
}

#[tokio::test]
async fn missing_image_is_404() {
  let (app, _) = setup().await;
  let resp = get(&app, "/images/1-none.png", &[]).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ── API mount ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn api_is_mounted_with_public_base_url() {
  let (app, _) = setup().await;
  let req = Request::builder()
    .method("POST")
    .uri("/api/profiles")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(r#"{"first_name":"Ada","last_name":"Lovelace"}"#))
    .unwrap();
  let resp = app.clone().oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::CREATED);

  let saved: serde_json::Value = serde_json::from_str(&text(resp).await).unwrap();
  let slug = saved["profile"]["slug"].as_str().unwrap();
  assert_eq!(saved["url"], format!("https://qr.example/p/{slug}"));

  let page = get(&app, &format!("/p/{slug}"), &[]).await;
  assert_eq!(page.status(), StatusCode::OK);
}
