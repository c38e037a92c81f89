//! Error types for the renderer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid color {0:?}; expected #RRGGBB")]
  InvalidColor(String),

  #[error(transparent)]
  Style(#[from] qrstudio_core::Error),

  #[error("payload is incomplete; fill in the required fields first")]
  Incomplete,

  #[error("business card has not been published yet")]
  NotPublished,

  #[error("QR encoding failed: {0}")]
  Qr(#[from] qrcode::types::QrError),

  #[error("image error: {0}")]
  Image(#[from] image::ImageError),

  #[error("invalid logo reference: {0}")]
  Logo(String),

  #[error("font error: {0}")]
  Font(#[from] ab_glyph::InvalidFont),

  #[error("base64 error: {0}")]
  Base64(#[from] base64::DecodeError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
