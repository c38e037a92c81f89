//! Logo references and decoding.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat};

use crate::{Error, Result};

/// Where a logo reference points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoRef<'a> {
  /// Bytes carried inline in a `data:` URL.
  Inline(Vec<u8>),
  /// An image in the hosted image store, by file name.
  Hosted(&'a str),
  /// Anything else: a remote URL or a local path.
  External(&'a str),
}

impl<'a> LogoRef<'a> {
  pub fn parse(reference: &'a str) -> Result<Self> {
    if let Some(rest) = reference.strip_prefix("data:") {
      let (meta, data) = rest
        .split_once(',')
        .ok_or_else(|| Error::Logo("data URL without a comma".into()))?;
      if !meta.ends_with(";base64") {
        return Err(Error::Logo("only base64 data URLs are supported".into()));
      }
      return Ok(Self::Inline(STANDARD.decode(data.trim())?));
    }

    if let Some((_, name)) = reference.rsplit_once("/images/") {
      if !name.is_empty() && !name.contains('/') {
        return Ok(Self::Hosted(name));
      }
    }

    Ok(Self::External(reference))
  }
}

/// Content type of `bytes` judged from their magic number, for the raster
/// formats the image store accepts.
pub fn sniff_image(bytes: &[u8]) -> Option<&'static str> {
  match image::guess_format(bytes).ok()? {
    ImageFormat::Png => Some("image/png"),
    ImageFormat::Jpeg => Some("image/jpeg"),
    ImageFormat::Gif => Some("image/gif"),
    ImageFormat::WebP => Some("image/webp"),
    _ => None,
  }
}

/// A decoded overlay image.
#[derive(Debug, Clone)]
pub struct Logo {
  image: DynamicImage,
}

impl Logo {
  pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
    Ok(Self { image: image::load_from_memory(bytes)? })
  }

  pub fn image(&self) -> &DynamicImage { &self.image }

  /// Re-encode as a PNG `data:` URL for embedding in SVG.
  pub fn to_data_url(&self, side: u32) -> Result<String> {
    let resized = self.resized(side);
    let mut png = Vec::new();
    resized.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
  }

  /// Square `side`×`side` copy.
  pub fn resized(&self, side: u32) -> DynamicImage {
    self
      .image
      .resize_exact(side.max(1), side.max(1), image::imageops::FilterType::Lanczos3)
  }
}

#[cfg(test)]
mod tests {
  use image::{Rgba, RgbaImage};

  use super::*;

  fn tiny_png() -> Vec<u8> {
    let img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
    let mut out = Vec::new();
    DynamicImage::ImageRgba8(img)
      .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
      .unwrap();
    out
  }

  #[test]
  fn parses_inline_data_url() {
    let png = tiny_png();
    let url = format!("data:image/png;base64,{}", STANDARD.encode(&png));
    assert_eq!(LogoRef::parse(&url).unwrap(), LogoRef::Inline(png));
  }

  #[test]
  fn recognises_hosted_images() {
    assert_eq!(
      LogoRef::parse("https://qr.example/images/1700000000000-abc.png").unwrap(),
      LogoRef::Hosted("1700000000000-abc.png")
    );
    assert_eq!(LogoRef::parse("/images/x.png").unwrap(), LogoRef::Hosted("x.png"));
  }

  #[test]
  fn everything_else_is_external() {
    assert_eq!(
      LogoRef::parse("https://cdn.example/logo.png").unwrap(),
      LogoRef::External("https://cdn.example/logo.png")
    );
    assert_eq!(LogoRef::parse("./logo.png").unwrap(), LogoRef::External("./logo.png"));
  }

  #[test]
  fn rejects_non_base64_data_urls() {
    assert!(LogoRef::parse("data:text/plain,hello").is_err());
    assert!(LogoRef::parse("data:image/png;base64").is_err());
  }

  #[test]
  fn decodes_and_resizes() {
    let logo = Logo::from_bytes(&tiny_png()).unwrap();
    let r = logo.resized(10);
    assert_eq!((r.width(), r.height()), (10, 10));
    assert!(logo.to_data_url(8).unwrap().starts_with("data:image/png;base64,"));
  }

  #[test]
  fn sniffs_raster_formats_only() {
    assert_eq!(sniff_image(&tiny_png()), Some("image/png"));
    assert_eq!(sniff_image(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10]), Some("image/jpeg"));
    assert_eq!(sniff_image(b"GIF89a\x01\x00"), Some("image/gif"));
    assert_eq!(
      sniff_image(br#"<svg xmlns="http://www.w3.org/2000/svg"><script>alert(1)</script></svg>"#),
      None
    );
    assert_eq!(sniff_image(b""), None);
  }

  #[test]
  fn garbage_is_not_an_image() {
    assert!(Logo::from_bytes(b"not an image").is_err());
  }
}
