//! Router tests against an in-memory store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use qrstudio_core::store::ProfileStore as _;
use qrstudio_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::{ApiState, api_router};

const BASE: &str = "https://qr.example";

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(ApiState::new(Arc::new(store), BASE))
}

async fn send(app: &Router, req: Request<Body>) -> Response {
  app.clone().oneshot(req).await.unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
  Request::builder()
    .method("POST")
    .uri(uri)
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap()
}

fn get(uri: &str) -> Request<Body> {
  Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(resp: Response) -> Vec<u8> {
  axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap()
    .to_vec()
}

async fn body_json(resp: Response) -> Value {
  serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

// ─── Profiles ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_fetch_profile() {
  let app = app().await;

  let resp = send(
    &app,
    post_json("/profiles", json!({ "first_name": "Ada", "last_name": "Lovelace" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let saved = body_json(resp).await;
  let slug = saved["profile"]["slug"].as_str().unwrap().to_owned();
  assert_eq!(saved["url"], format!("{BASE}/p/{slug}"));
  assert_eq!(saved["profile"]["primary_color"], "#3B82F6");

  let resp = send(&app, get(&format!("/profiles/{slug}"))).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(body_json(resp).await["first_name"], "Ada");
}

#[tokio::test]
async fn update_returns_200_and_same_slug() {
  let app = app().await;
  let created = body_json(
    send(&app, post_json("/profiles", json!({ "first_name": "A", "last_name": "B" }))).await,
  )
  .await;
  let slug = created["profile"]["slug"].as_str().unwrap();

  let resp = send(
    &app,
    post_json(
      "/profiles",
      json!({ "slug": slug, "first_name": "A", "last_name": "C", "theme": "dark" }),
    ),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let updated = body_json(resp).await;
  assert_eq!(updated["profile"]["slug"], slug);
  assert_eq!(updated["profile"]["last_name"], "C");
  assert_eq!(updated["profile"]["theme"], "dark");
}

#[tokio::test]
async fn missing_name_is_400() {
  let app = app().await;
  let resp = send(&app, post_json("/profiles", json!({ "first_name": "Ada" }))).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert!(body_json(resp).await["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn update_of_unknown_slug_is_404() {
  let app = app().await;
  let resp = send(
    &app,
    post_json(
      "/profiles",
      json!({ "slug": "ghost123", "first_name": "A", "last_name": "B" }),
    ),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_profile_is_404() {
  let app = app().await;
  let resp = send(&app, get("/profiles/nope1234")).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ─── Images ──────────────────────────────────────────────────────────────────

/// JFIF header; enough for format detection.
const JPEG_HEAD: [u8; 11] = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];

fn upload(filename: &str, content_type: &str, body: Vec<u8>) -> Request<Body> {
  Request::builder()
    .method("POST")
    .uri(format!("/images?filename={filename}"))
    .header(header::CONTENT_TYPE, content_type)
    .body(Body::from(body))
    .unwrap()
}

#[tokio::test]
async fn upload_returns_public_url() {
  let app = app().await;
  let resp = send(&app, upload("me.JPG", "image/jpeg", JPEG_HEAD.to_vec())).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let out = body_json(resp).await;
  let name = out["name"].as_str().unwrap();
  assert!(name.ends_with(".jpg"), "{name}");
  assert_eq!(out["url"], format!("{BASE}/images/{name}"));
}

#[tokio::test]
async fn upload_rejects_non_images() {
  let app = app().await;
  let resp = send(&app, upload("notes.txt", "text/plain", b"hello".to_vec())).await;
  assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn upload_rejects_svg_with_script() {
  let app = app().await;
  let svg = br#"<svg xmlns="http://www.w3.org/2000/svg"><script>alert(document.cookie)</script></svg>"#;
  let resp = send(&app, upload("x.svg", "image/svg+xml", svg.to_vec())).await;
  assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

  // Lying about the type does not help either.
  let resp = send(&app, upload("x.png", "image/png", svg.to_vec())).await;
  assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn upload_stores_the_detected_type() {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  let app = api_router(ApiState::new(store.clone(), BASE));
  let png = qrstudio_render::render_png("x", &Default::default(), None, 1).unwrap();
  let resp = send(&app, upload("logo.gif", "image/gif", png)).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let name = body_json(resp).await["name"].as_str().unwrap().to_owned();

  let stored = store.get_image(&name).await.unwrap().unwrap();
  assert_eq!(stored.meta.content_type, "image/png");
}

#[tokio::test]
async fn upload_rejects_oversized_bodies() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let state = ApiState { max_upload_bytes: 16, ..ApiState::new(Arc::new(store), BASE) };
  let app = api_router(state);
  let resp = send(&app, upload("big.png", "image/png", vec![0; 64])).await;
  assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

// ─── Codes ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn encode_reports_value_and_validity() {
  let app = app().await;
  let resp = send(
    &app,
    post_json(
      "/codes/encode",
      json!({ "payload": { "kind": "wifi", "ssid": "Net", "password": "pw", "hidden": true } }),
    ),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let out = body_json(resp).await;
  assert_eq!(out["value"], "WIFI:T:WPA;S:Net;P:pw;H:true;;");
  assert_eq!(out["valid"], true);
  assert_eq!(out["kind"], "wifi");
}

#[tokio::test]
async fn encode_of_empty_payload_is_invalid() {
  let app = app().await;
  let resp = send(&app, post_json("/codes/encode", json!({ "payload": { "kind": "url" } }))).await;
  let out = body_json(resp).await;
  assert_eq!(out["value"], "");
  assert_eq!(out["valid"], false);
}

#[tokio::test]
async fn unknown_kind_encodes_to_nothing() {
  let app = app().await;
  let resp =
    send(&app, post_json("/codes/encode", json!({ "payload": { "kind": "telex" } }))).await;
  let out = body_json(resp).await;
  assert_eq!(out["value"], "");
  assert_eq!(out["kind"], Value::Null);
}

#[tokio::test]
async fn render_exports_png_attachment() {
  let app = app().await;
  let resp = send(
    &app,
    post_json(
      "/codes/render",
      json!({
        "payload": { "kind": "url", "url": "https://example.org" },
        "style": { "size": 100 },
        "format": "png",
        "resolution": "standard"
      }),
    ),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");
  let disposition = resp.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_owned();
  assert!(disposition.starts_with("attachment; filename=\"qrcode-"), "{disposition}");
  assert!(disposition.ends_with(".png\""), "{disposition}");
  assert_eq!(&body_bytes(resp).await[..4], b"\x89PNG");
}

#[tokio::test]
async fn render_refuses_incomplete_payload() {
  let app = app().await;
  let resp = send(
    &app,
    post_json("/codes/render", json!({ "payload": { "kind": "phone" } })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn preview_of_incomplete_payload_draws_placeholder() {
  let app = app().await;
  let resp = send(
    &app,
    post_json(
      "/codes/render",
      json!({ "payload": { "kind": "phone" }, "format": "svg", "preview": true }),
    ),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/svg+xml");
  assert!(!resp.headers().contains_key(header::CONTENT_DISPOSITION));
  let svg = String::from_utf8(body_bytes(resp).await).unwrap();
  assert!(svg.starts_with("<svg"));
}

#[tokio::test]
async fn render_rejects_bad_colors() {
  let app = app().await;
  let resp = send(
    &app,
    post_json(
      "/codes/render",
      json!({
        "payload": { "kind": "text", "text": "hi" },
        "style": { "foreground_color": "red" }
      }),
    ),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn render_rejects_oversized_style_numbers() {
  let app = app().await;
  for style in [
    json!({ "size": 1_500_000_000 }),
    json!({ "margin": 4_000_000_000u32 }),
    json!({ "logo_size": 500 }),
  ] {
    let resp = send(
      &app,
      post_json(
        "/codes/render",
        json!({
          "payload": { "kind": "text", "text": "hi" },
          "style": style,
          "resolution": "high"
        }),
      ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{style}");
    let error = body_json(resp).await["error"].as_str().unwrap().to_owned();
    assert!(error.contains("outside"), "{error}");
  }
}

#[tokio::test]
async fn profile_with_non_hex_accent_is_400() {
  let app = app().await;
  let resp = send(
    &app,
    post_json(
      "/profiles",
      json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "primary_color": "red;background-image:url(//tracker.example/p)"
      }),
    ),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert!(body_json(resp).await["error"].as_str().unwrap().contains("#RRGGBB"));
}

#[tokio::test]
async fn templates_are_listed() {
  let app = app().await;
  let resp = send(&app, get("/templates")).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let list = body_json(resp).await;
  assert_eq!(list.as_array().unwrap().len(), 10);
}
