//! Module matrix with quiet zone and logo excavation.

use qrcode::{Color, EcLevel, QrCode};
use qrstudio_core::style::ErrorCorrection;

use crate::Result;

fn ec_level(ec: ErrorCorrection) -> EcLevel {
  match ec {
    ErrorCorrection::L => EcLevel::L,
    ErrorCorrection::M => EcLevel::M,
    ErrorCorrection::Q => EcLevel::Q,
    ErrorCorrection::H => EcLevel::H,
  }
}

/// Dark/light modules of an encoded value, quiet zone included.
#[derive(Debug, Clone)]
pub struct Matrix {
  /// Cells per side, quiet zone included.
  cells: usize,
  dark:  Vec<bool>,
}

impl Matrix {
  pub fn encode(value: &str, ec: ErrorCorrection, margin: u32) -> Result<Self> {
    let code = QrCode::with_error_correction_level(value.as_bytes(), ec_level(ec))?;
    let width = code.width();
    let margin = margin as usize;
    let cells = width + 2 * margin;

    let mut dark = vec![false; cells * cells];
    for (i, color) in code.to_colors().into_iter().enumerate() {
      if color == Color::Dark {
        let (x, y) = (i % width, i / width);
        dark[(y + margin) * cells + x + margin] = true;
      }
    }
    Ok(Self { cells, dark })
  }

  pub fn cells(&self) -> usize { self.cells }

  pub fn is_dark(&self, x: usize, y: usize) -> bool {
    x < self.cells && y < self.cells && self.dark[y * self.cells + x]
  }

  /// Clear every module touched by a centered square of `logo_px` on a code
  /// drawn `code_px` wide, so the overlay never sits on half-hidden modules.
  pub fn excavate(&mut self, logo_px: u32, code_px: u32) {
    if logo_px == 0 || code_px == 0 {
      return;
    }
    let module = code_px as f64 / self.cells as f64;
    let side = f64::from(logo_px) / module;
    let start = (self.cells as f64 - side) / 2.0;
    let from = start.floor().max(0.0) as usize;
    let to = ((start + side).ceil() as usize).min(self.cells);
    for y in from..to {
      for x in from..to {
        self.dark[y * self.cells + x] = false;
      }
    }
  }

  /// Coordinates of every dark module.
  pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
    self
      .dark
      .iter()
      .enumerate()
      .filter(|(_, d)| **d)
      .map(|(i, _)| (i % self.cells, i / self.cells))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn quiet_zone_is_light() {
    let m = Matrix::encode("https://example.com", ErrorCorrection::M, 4).unwrap();
    // Version 2 code: 25 modules + 8 quiet.
    assert_eq!(m.cells(), 33);
    for i in 0..m.cells() {
      assert!(!m.is_dark(i, 0) && !m.is_dark(0, i) && !m.is_dark(i, 3));
    }
    // Top-left finder pattern corner.
    assert!(m.is_dark(4, 4));
  }

  #[test]
  fn zero_margin_starts_at_finder() {
    let m = Matrix::encode("hi", ErrorCorrection::L, 0).unwrap();
    assert_eq!(m.cells(), 21);
    assert!(m.is_dark(0, 0));
  }

  #[test]
  fn higher_correction_never_shrinks_the_code() {
    let text = "The quick brown fox jumps over the lazy dog";
    let l = Matrix::encode(text, ErrorCorrection::L, 0).unwrap();
    let h = Matrix::encode(text, ErrorCorrection::H, 0).unwrap();
    assert!(h.cells() > l.cells());
  }

  #[test]
  fn excavation_clears_center() {
    let mut m = Matrix::encode("https://example.com/some/long/path", ErrorCorrection::H, 0).unwrap();
    let center = m.cells() / 2;
    m.excavate(60, 240);
    assert!(!m.is_dark(center, center));
    assert!(m.is_dark(0, 0));
  }

  #[test]
  fn oversized_payload_is_an_error() {
    let huge = "x".repeat(8000);
    assert!(Matrix::encode(&huge, ErrorCorrection::H, 4).is_err());
  }
}
