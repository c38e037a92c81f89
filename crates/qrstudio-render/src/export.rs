//! Export formats and the preview/export entry points.

use qrstudio_core::{payload::Payload, style::StyleOptions};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{Error, Result, logo::Logo, raster::render_png, svg::render_svg};

/// Value rendered while the form is still incomplete.
pub const PREVIEW_PLACEHOLDER: &str = "https://example.com";

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
  #[default]
  Png,
  Svg,
}

impl ExportFormat {
  pub fn extension(self) -> &'static str {
    match self {
      ExportFormat::Png => "png",
      ExportFormat::Svg => "svg",
    }
  }

  pub fn content_type(self) -> &'static str {
    match self {
      ExportFormat::Png => "image/png",
      ExportFormat::Svg => "image/svg+xml",
    }
  }
}

/// Pixel multiplier for PNG exports. SVG output ignores it.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Resolution {
  Standard,
  #[default]
  High,
  Print,
}

impl Resolution {
  pub fn scale(self) -> u32 {
    match self {
      Resolution::Standard => 1,
      Resolution::High => 2,
      Resolution::Print => 4,
    }
  }
}

/// `qrcode-<unix millis>.<ext>`.
pub fn export_file_name(format: ExportFormat, unix_millis: i64) -> String {
  format!("qrcode-{unix_millis}.{}", format.extension())
}

/// The value a live preview should draw: the encoded payload, or the
/// placeholder while it is still empty.
pub fn preview_value(encoded: &str) -> &str {
  if encoded.is_empty() { PREVIEW_PLACEHOLDER } else { encoded }
}

/// A finished export.
#[derive(Debug, Clone)]
pub struct Export {
  pub bytes:        Vec<u8>,
  pub content_type: &'static str,
  pub file_name:    String,
}

/// Render an already-encoded value in `format`.
pub fn render(
  value: &str,
  style: &StyleOptions,
  logo: Option<&Logo>,
  format: ExportFormat,
  resolution: Resolution,
) -> Result<Vec<u8>> {
  match format {
    ExportFormat::Png => render_png(value, style, logo, resolution.scale()),
    ExportFormat::Svg => render_svg(value, style, logo).map(String::into_bytes),
  }
}

/// Export a payload. Incomplete payloads are refused, as is an unpublished
/// business card.
pub fn export(
  payload: &Payload,
  profile_link: Option<&str>,
  style: &StyleOptions,
  logo: Option<&Logo>,
  format: ExportFormat,
  resolution: Resolution,
  unix_millis: i64,
) -> Result<Export> {
  if !qrstudio_encode::is_valid(payload, profile_link) {
    return Err(Error::Incomplete);
  }
  let value = qrstudio_encode::encode(payload, profile_link);
  if value.is_empty() {
    return Err(Error::NotPublished);
  }

  let bytes = render(&value, style, logo, format, resolution)?;
  tracing::info!(%format, %resolution, bytes = bytes.len(), "exported code");
  Ok(Export {
    bytes,
    content_type: format.content_type(),
    file_name: export_file_name(format, unix_millis),
  })
}
