//! Error types for `qrstudio-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("first and last name are required")]
  MissingName,

  #[error("profile not found: {0}")]
  ProfileNotFound(String),

  #[error("invalid slug: {0:?}")]
  InvalidSlug(String),

  #[error("not an image: {0:?}")]
  NotAnImage(String),

  #[error("image is {size} bytes; the limit is {max}")]
  ImageTooLarge { size: usize, max: usize },

  #[error("invalid color {0:?}; expected #RRGGBB")]
  InvalidColor(String),

  #[error("invalid style: {0}")]
  InvalidStyle(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
