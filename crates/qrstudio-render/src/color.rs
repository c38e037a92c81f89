//! `#RRGGBB` colors and label contrast.

use image::Rgba;

use crate::{Error, Result};

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

impl Rgb {
  /// Parse `#RRGGBB` (case-insensitive).
  pub fn parse_hex(s: &str) -> Result<Self> {
    let hex = s
      .strip_prefix('#')
      .filter(|h| h.len() == 6 && h.bytes().all(|b| b.is_ascii_hexdigit()))
      .ok_or_else(|| Error::InvalidColor(s.to_owned()))?;
    let channel = |i: usize| {
      u8::from_str_radix(&hex[i..i + 2], 16)
        .map_err(|_| Error::InvalidColor(s.to_owned()))
    };
    Ok(Self {
      r: channel(0)?,
      g: channel(2)?,
      b: channel(4)?,
    })
  }

  pub fn to_hex(self) -> String {
    format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
  }

  pub fn to_rgba(self) -> Rgba<u8> { Rgba([self.r, self.g, self.b, 255]) }

  /// Perceived brightness in `0.0..=1.0`.
  pub fn luminance(self) -> f64 {
    (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b))
      / 255.0
  }

  /// Black on light colors, white on dark ones.
  pub fn contrast(self) -> Rgb {
    if self.luminance() > 0.5 { BLACK } else { WHITE }
  }
}

/// Label text color for a frame color, as `#RRGGBB`.
pub fn contrast_color(frame_color: &str) -> Result<String> {
  Ok(Rgb::parse_hex(frame_color)?.contrast().to_hex())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_hex_in_either_case() {
    assert_eq!(Rgb::parse_hex("#1e3A5F").unwrap(), Rgb { r: 0x1e, g: 0x3a, b: 0x5f });
  }

  #[test]
  fn rejects_malformed_colors() {
    for bad in ["1E3A5F", "#1E3A5", "#GGGGGG", "", "#1E3A5F00"] {
      assert!(Rgb::parse_hex(bad).is_err(), "{bad:?}");
    }
  }

  #[test]
  fn contrast_picks_black_on_light_frames() {
    assert_eq!(contrast_color("#FFFFFF").unwrap(), "#000000");
    assert_eq!(contrast_color("#CA8A04").unwrap(), "#000000");
  }

  #[test]
  fn contrast_picks_white_on_dark_frames() {
    assert_eq!(contrast_color("#000000").unwrap(), "#FFFFFF");
    assert_eq!(contrast_color("#1E3A5F").unwrap(), "#FFFFFF");
    assert_eq!(contrast_color("#2563EB").unwrap(), "#FFFFFF");
  }

  #[test]
  fn threshold_is_strictly_greater_than_half() {
    // 0.299*128 + 0.587*128 + 0.114*128 = 128 → 128/255 ≈ 0.502
    assert_eq!(Rgb { r: 128, g: 128, b: 128 }.contrast(), BLACK);
    // 127/255 ≈ 0.498
    assert_eq!(Rgb { r: 127, g: 127, b: 127 }.contrast(), WHITE);
  }
}
