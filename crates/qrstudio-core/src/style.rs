//! Visual configuration of a rendered code.
//!
//! Nothing here changes what a scanner reads; these values only feed the
//! renderer.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{Error, Result};

/// Shape used for each data module.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ModuleStyle {
  #[default]
  Squares,
  Dots,
  Rounded,
}

/// Rounding applied to the outer corners of the whole code.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CornerStyle {
  #[default]
  Square,
  Rounded,
  ExtraRounded,
}

/// The four standard QR error-correction levels, lowest redundancy first.
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
pub enum ErrorCorrection {
  L,
  #[default]
  M,
  Q,
  H,
}

/// Decoration drawn around the code.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FrameStyle {
  #[default]
  None,
  Simple,
  Rounded,
  Fancy,
}

/// Icon shown in the frame label.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LabelIcon {
  #[default]
  None,
  Qr,
  Link,
  Contact,
  Wifi,
  Email,
  Phone,
  Scan,
}

/// Whether the label sits above or below the code.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LabelPosition {
  Top,
  #[default]
  Bottom,
}

/// Frame and label decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameOptions {
  pub style:          FrameStyle,
  /// `#RRGGBB`.
  pub color:          String,
  pub label_text:     String,
  pub label_icon:     LabelIcon,
  pub label_position: LabelPosition,
}

impl Default for FrameOptions {
  fn default() -> Self {
    Self {
      style:          FrameStyle::None,
      color:          "#000000".to_owned(),
      label_text:     String::new(),
      label_icon:     LabelIcon::None,
      label_position: LabelPosition::Bottom,
    }
  }
}

impl FrameOptions {
  pub fn has_frame(&self) -> bool { self.style != FrameStyle::None }

  /// A label is drawn only inside a frame, and only if it has something to
  /// show.
  pub fn has_label(&self) -> bool {
    self.has_frame()
      && (!self.label_text.is_empty() || self.label_icon != LabelIcon::None)
  }
}

/// Complete visual configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
  /// `#RRGGBB`.
  pub foreground_color: String,
  /// `#RRGGBB`.
  pub background_color: String,
  pub module_style:     ModuleStyle,
  pub corner_style:     CornerStyle,
  /// Reference to the overlay image: a `data:` URL, a file path or a URL.
  pub logo_url:         Option<String>,
  /// Overlay edge length as a percentage of [`StyleOptions::size`].
  pub logo_size:        u32,
  /// Quiet zone, in modules.
  pub margin:           u32,
  pub error_correction: ErrorCorrection,
  /// Edge length of the code in pixels, before any export scaling.
  pub size:             u32,
  pub frame:            FrameOptions,
}

impl Default for StyleOptions {
  fn default() -> Self {
    Self {
      foreground_color: "#000000".to_owned(),
      background_color: "#FFFFFF".to_owned(),
      module_style:     ModuleStyle::Squares,
      corner_style:     CornerStyle::Square,
      logo_url:         None,
      logo_size:        20,
      margin:           4,
      error_correction: ErrorCorrection::M,
      size:             256,
      frame:            FrameOptions::default(),
    }
  }
}

// ─── Bounds ──────────────────────────────────────────────────────────────────

/// Accepted range of [`StyleOptions::size`], in pixels.
pub const SIZE_RANGE: RangeInclusive<u32> = 64..=2048;
/// Accepted range of [`StyleOptions::margin`], in modules.
pub const MARGIN_RANGE: RangeInclusive<u32> = 0..=10;
/// Accepted range of [`StyleOptions::logo_size`], in percent.
pub const LOGO_SIZE_RANGE: RangeInclusive<u32> = 10..=40;
/// Longest frame label, in characters.
pub const MAX_LABEL_CHARS: usize = 64;

/// Whether `s` is a `#RRGGBB` color.
pub fn is_hex_color(s: &str) -> bool {
  s.len() == 7
    && s.starts_with('#')
    && s[1..].bytes().all(|b| b.is_ascii_hexdigit())
}

impl StyleOptions {
  /// Pixel edge of the logo overlay; zero when no logo is set.
  pub fn logo_pixels(&self) -> u32 {
    if self.logo_url.is_none() {
      return 0;
    }
    let px = u64::from(self.size) * u64::from(self.logo_size) / 100;
    u32::try_from(px).unwrap_or(u32::MAX)
  }

  /// Check the numeric options and the label length against their bounds.
  pub fn validate(&self) -> Result<()> {
    fn check(name: &str, value: u32, range: &RangeInclusive<u32>) -> Result<()> {
      if range.contains(&value) {
        return Ok(());
      }
      Err(Error::InvalidStyle(format!(
        "{name} {value} is outside {}..={}",
        range.start(),
        range.end()
      )))
    }

    check("size", self.size, &SIZE_RANGE)?;
    check("margin", self.margin, &MARGIN_RANGE)?;
    check("logo_size", self.logo_size, &LOGO_SIZE_RANGE)?;

    let label_chars = self.frame.label_text.chars().count();
    if label_chars > MAX_LABEL_CHARS {
      return Err(Error::InvalidStyle(format!(
        "label has {label_chars} characters; the limit is {MAX_LABEL_CHARS}"
      )));
    }
    Ok(())
  }
}
