//! The `ProfileStore` trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g.
//! `qrstudio-store-sqlite`). Higher layers (`qrstudio-api`, `qrstudio-web`)
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
  Error, Result,
  profile::{Profile, ProfileInput},
};

/// Largest accepted upload.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Raster formats accepted for upload. Vector and other active formats are
/// refused since stored images are served inline on the page origin.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] =
  ["image/png", "image/jpeg", "image/gif", "image/webp"];

// ─── Images ──────────────────────────────────────────────────────────────────

/// An image about to be stored (profile photo or logo).
#[derive(Debug, Clone)]
pub struct NewImage {
  pub bytes:         Vec<u8>,
  pub content_type:  String,
  /// Name of the file on the uploader's side; only its extension is kept.
  pub original_name: String,
}

impl NewImage {
  /// Reject anything that is not one of [`ALLOWED_IMAGE_TYPES`] or is
  /// larger than `max_bytes`.
  pub fn validate(&self, max_bytes: usize) -> Result<()> {
    if !ALLOWED_IMAGE_TYPES.contains(&self.content_type.as_str()) {
      return Err(Error::NotAnImage(self.content_type.clone()));
    }
    if self.bytes.len() > max_bytes {
      return Err(Error::ImageTooLarge {
        size: self.bytes.len(),
        max:  max_bytes,
      });
    }
    Ok(())
  }
}

/// Metadata of a stored image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageMeta {
  pub name:         String,
  pub content_type: String,
  pub size:         usize,
  pub created_at:   DateTime<Utc>,
}

/// A stored image with its bytes.
#[derive(Debug, Clone)]
pub struct StoredImage {
  pub meta:  ImageMeta,
  pub bytes: Vec<u8>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the hosted-profile backend.
///
/// Profiles are addressed by slug. Images are addressed by the generated
/// file name returned from [`ProfileStore::put_image`].
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ProfileStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Profiles ──────────────────────────────────────────────────────────

  /// Create or update a profile.
  ///
  /// Without `input.slug` a new slug is generated and a new record inserted.
  /// With a slug, the existing record is updated; an unknown slug is an
  /// error. Names are validated before anything is written.
  fn upsert_profile(
    &self,
    input: ProfileInput,
  ) -> impl Future<Output = Result<Profile, Self::Error>> + Send + '_;

  /// Retrieve a profile by slug. Returns `None` if not found.
  fn get_profile<'a>(
    &'a self,
    slug: &'a str,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + 'a;

  // ── Images ────────────────────────────────────────────────────────────

  /// Persist an image under a freshly generated unique name.
  fn put_image(
    &self,
    image: NewImage,
  ) -> impl Future<Output = Result<ImageMeta, Self::Error>> + Send + '_;

  /// Retrieve an image by name. Returns `None` if not found.
  fn get_image<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<StoredImage>, Self::Error>> + Send + 'a;
}

#[cfg(test)]
mod tests {
  use super::*;

  fn image(content_type: &str, len: usize) -> NewImage {
    NewImage {
      bytes:         vec![0; len],
      content_type:  content_type.to_owned(),
      original_name: "photo.png".to_owned(),
    }
  }

  #[test]
  fn accepts_small_images() {
    assert!(image("image/png", 10).validate(MAX_IMAGE_BYTES).is_ok());
  }

  #[test]
  fn rejects_non_images() {
    assert!(matches!(
      image("application/pdf", 10).validate(MAX_IMAGE_BYTES),
      Err(Error::NotAnImage(_))
    ));
  }

  #[test]
  fn rejects_svg() {
    assert!(matches!(
      image("image/svg+xml", 10).validate(MAX_IMAGE_BYTES),
      Err(Error::NotAnImage(_))
    ));
  }

  #[test]
  fn rejects_oversized_images() {
    assert!(matches!(
      image("image/jpeg", MAX_IMAGE_BYTES + 1).validate(MAX_IMAGE_BYTES),
      Err(Error::ImageTooLarge { .. })
    ));
  }
}
