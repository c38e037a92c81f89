pub mod images;
pub mod profile;

/// `GET /healthz`
pub async fn health() -> &'static str { "ok" }
