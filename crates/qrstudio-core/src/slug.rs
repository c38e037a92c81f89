//! Random identifiers for profiles and uploaded images.

use rand_core::{OsRng, RngCore as _};

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of a profile slug.
pub const SLUG_LEN: usize = 8;

/// `len` random lowercase base-36 characters.
pub fn random_base36(len: usize) -> String {
  (0..len)
    .map(|_| loop {
      let b = (OsRng.next_u32() & 0xff) as u8;
      // 252 = 7 * 36; rejecting above it keeps the distribution uniform.
      if b < 252 {
        break ALPHABET[usize::from(b % 36)] as char;
      }
    })
    .collect()
}

/// A fresh profile slug.
pub fn generate_slug() -> String { random_base36(SLUG_LEN) }

/// Whether `s` looks like something [`generate_slug`] could have produced,
/// or a caller-chosen slug of the same alphabet.
pub fn is_valid_slug(s: &str) -> bool {
  !s.is_empty()
    && s.len() <= 64
    && s.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Unique name for an uploaded image: `<unix millis>-<random>.<ext>`.
///
/// The extension is whatever follows the last `.` of `original`; a name
/// without a dot is used whole.
pub fn image_file_name(original: &str, unix_millis: i64) -> String {
  let ext = original.rsplit('.').next().unwrap_or(original);
  format!("{unix_millis}-{}.{}", random_base36(11), ext.to_ascii_lowercase())
}
