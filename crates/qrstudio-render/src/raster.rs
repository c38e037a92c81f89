//! PNG back-end.

use std::io::Cursor;

use ab_glyph::{Font, FontRef, PxScale, ScaleFont, point};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage, imageops};
use qrstudio_core::style::{ModuleStyle, StyleOptions};

use crate::{
  Result,
  color::Rgb,
  layout::{FONT_SIZE, Label, Layout, PILL_PADDING_X, Panel, Rect},
  logo::Logo,
  matrix::Matrix,
};

/// Bold sans face used for frame labels.
static LABEL_FONT: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

/// Fraction of a module used as corner radius for `ModuleStyle::Rounded`.
const ROUNDED_MODULE: f32 = 0.3;
/// Opacity of the icon badge over the label pill.
const BADGE_ALPHA: f32 = 0.2;

/// Render `value` to a PNG at `scale` times the nominal size.
pub fn render_png(
  value: &str,
  style: &StyleOptions,
  logo: Option<&Logo>,
  scale: u32,
) -> Result<Vec<u8>> {
  let img = render_image(value, style, logo, scale)?;
  let mut out = Vec::new();
  DynamicImage::ImageRgba8(img).write_to(&mut Cursor::new(&mut out), ImageFormat::Png)?;
  Ok(out)
}

/// Same as [`render_png`] without the final encode.
pub fn render_image(
  value: &str,
  style: &StyleOptions,
  logo: Option<&Logo>,
  scale: u32,
) -> Result<RgbaImage> {
  style.validate()?;
  let layout = Layout::new(style, scale);
  let fg = Rgb::parse_hex(&style.foreground_color)?.to_rgba();
  let bg = Rgb::parse_hex(&style.background_color)?.to_rgba();

  let mut img = RgbaImage::from_pixel(layout.width, layout.height, Rgba([0, 0, 0, 0]));

  if let Some(frame) = layout.frame {
    let frame_color = Rgb::parse_hex(&style.frame.color)?;
    fill_panel(&mut img, frame, frame_color.to_rgba());
    if let Some(panel) = layout.panel {
      fill_panel(&mut img, panel, bg);
    }
    if let Some(label) = &layout.label {
      let pill = Panel { rect: label.pill, radius: label.pill.h / 2 };
      fill_panel(&mut img, pill, frame_color.to_rgba());
      let ink = frame_color.contrast().to_rgba();
      if let Some(badge) = label.badge {
        fill_circle(&mut img, badge, ink, BADGE_ALPHA);
      }
      draw_label_text(&mut img, label, style.frame.label_text.trim(), layout.scale, ink)?;
    }
  }
  fill_panel(&mut img, layout.code, bg);

  let mut matrix = Matrix::encode(value, style.error_correction, style.margin)?;
  let logo_rect = logo.and_then(|_| layout.logo(style));
  if let Some(rect) = logo_rect {
    matrix.excavate(rect.w, layout.code.rect.w);
  }
  draw_modules(&mut img, &matrix, layout.code.rect, style.module_style, fg);

  if let (Some(logo), Some(rect)) = (logo, logo_rect) {
    let resized = logo.resized(rect.w).to_rgba8();
    imageops::overlay(&mut img, &resized, i64::from(rect.x), i64::from(rect.y));
  }

  tracing::debug!(
    width = layout.width,
    height = layout.height,
    cells = matrix.cells(),
    "rendered png"
  );
  Ok(img)
}

fn draw_modules(
  img: &mut RgbaImage,
  matrix: &Matrix,
  area: Rect,
  shape: ModuleStyle,
  color: Rgba<u8>,
) {
  let module = area.w as f32 / matrix.cells() as f32;
  for (mx, my) in matrix.dark_modules() {
    let x0 = area.x as f32 + mx as f32 * module;
    let y0 = area.y as f32 + my as f32 * module;
    match shape {
      ModuleStyle::Squares => {
        fill_where(img, x0, y0, module, module, color, |_, _| true);
      }
      ModuleStyle::Dots => {
        let r = module / 2.0;
        let (cx, cy) = (x0 + r, y0 + r);
        fill_where(img, x0, y0, module, module, color, |px, py| {
          (px - cx).powi(2) + (py - cy).powi(2) <= r * r
        });
      }
      ModuleStyle::Rounded => {
        let r = module * ROUNDED_MODULE;
        fill_where(img, x0, y0, module, module, color, |px, py| {
          inside_rounded(px, py, x0, y0, module, module, r)
        });
      }
    }
  }
}

/// Fill every pixel whose center lies in the box and satisfies `inside`.
fn fill_where(
  img: &mut RgbaImage,
  x: f32,
  y: f32,
  w: f32,
  h: f32,
  color: Rgba<u8>,
  inside: impl Fn(f32, f32) -> bool,
) {
  let (iw, ih) = img.dimensions();
  let x_from = x.round().max(0.0) as u32;
  let y_from = y.round().max(0.0) as u32;
  let x_to = ((x + w).round() as u32).min(iw);
  let y_to = ((y + h).round() as u32).min(ih);
  for py in y_from..y_to {
    for px in x_from..x_to {
      if inside(px as f32 + 0.5, py as f32 + 0.5) {
        img.put_pixel(px, py, color);
      }
    }
  }
}

fn inside_rounded(px: f32, py: f32, x: f32, y: f32, w: f32, h: f32, r: f32) -> bool {
  let r = r.min(w / 2.0).min(h / 2.0);
  let cx = px.clamp(x + r, x + w - r);
  let cy = py.clamp(y + r, y + h - r);
  (px - cx).powi(2) + (py - cy).powi(2) <= r * r
}

fn fill_panel(img: &mut RgbaImage, panel: Panel, color: Rgba<u8>) {
  let Rect { x, y, w, h } = panel.rect;
  let (x, y, w, h, r) = (x as f32, y as f32, w as f32, h as f32, panel.radius as f32);
  if r == 0.0 {
    fill_where(img, x, y, w, h, color, |_, _| true);
  } else {
    fill_where(img, x, y, w, h, color, |px, py| inside_rounded(px, py, x, y, w, h, r));
  }
}

fn fill_circle(img: &mut RgbaImage, square: Rect, tint: Rgba<u8>, alpha: f32) {
  let r = square.w as f32 / 2.0;
  let (cx, cy) = (square.x as f32 + r, square.y as f32 + r);
  let (iw, ih) = img.dimensions();
  for py in square.y..square.bottom().min(ih) {
    for px in square.x..(square.x + square.w).min(iw) {
      let (fx, fy) = (px as f32 + 0.5, py as f32 + 0.5);
      if (fx - cx).powi(2) + (fy - cy).powi(2) <= r * r {
        let under = *img.get_pixel(px, py);
        img.put_pixel(px, py, blend(under, tint, alpha));
      }
    }
  }
}

/// Rasterise the label text at its baseline origin, shrunk to fit and
/// clipped to the pill.
fn draw_label_text(
  img: &mut RgbaImage,
  label: &Label,
  text: &str,
  scale: u32,
  ink: Rgba<u8>,
) -> Result<()> {
  let Some((x, y)) = label.text else {
    return Ok(());
  };
  let font = FontRef::try_from_slice(LABEL_FONT)?;
  let pill = label.pill;
  let room = (pill.x + pill.w).saturating_sub(PILL_PADDING_X * scale + x) as f32;

  let mut font_px = (FONT_SIZE * scale) as f32;
  let natural = line_width(&font, text, font_px);
  if natural > room && natural > 0.0 {
    font_px *= room / natural;
  }

  let size = PxScale::from(font_px);
  let scaled = font.as_scaled(size);
  let (iw, ih) = img.dimensions();
  let right = (pill.x + pill.w).min(iw);
  let bottom = pill.bottom().min(ih);
  let mut caret = x as f32;
  let mut prev = None;
  for c in text.chars() {
    let id = scaled.glyph_id(c);
    if let Some(prev) = prev {
      caret += scaled.kern(prev, id);
    }
    prev = Some(id);
    let glyph = id.with_scale_and_position(size, point(caret, y as f32));
    caret += scaled.h_advance(id);

    let Some(outline) = font.outline_glyph(glyph) else {
      continue;
    };
    let bounds = outline.px_bounds();
    outline.draw(|gx, gy, coverage| {
      let px = bounds.min.x as i64 + i64::from(gx);
      let py = bounds.min.y as i64 + i64::from(gy);
      if px < i64::from(pill.x) || py < i64::from(pill.y) {
        return;
      }
      let (px, py) = (px as u32, py as u32);
      if px < right && py < bottom && coverage > 0.0 {
        let under = *img.get_pixel(px, py);
        img.put_pixel(px, py, blend(under, ink, coverage.min(1.0)));
      }
    });
  }
  Ok(())
}

fn line_width(font: &FontRef<'_>, text: &str, px: f32) -> f32 {
  let scaled = font.as_scaled(PxScale::from(px));
  let mut width = 0.0;
  let mut prev = None;
  for c in text.chars() {
    let id = scaled.glyph_id(c);
    if let Some(prev) = prev {
      width += scaled.kern(prev, id);
    }
    width += scaled.h_advance(id);
    prev = Some(id);
  }
  width
}

fn blend(under: Rgba<u8>, over: Rgba<u8>, alpha: f32) -> Rgba<u8> {
  let mix = |a: u8, b: u8| (f32::from(a) * (1.0 - alpha) + f32::from(b) * alpha).round() as u8;
  Rgba([
    mix(under[0], over[0]),
    mix(under[1], over[1]),
    mix(under[2], over[2]),
    under[3],
  ])
}

#[cfg(test)]
mod tests {
  use qrstudio_core::style::{CornerStyle, FrameOptions, FrameStyle, LabelIcon};

  use super::*;

  const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
  const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

  fn style(size: u32) -> StyleOptions {
    StyleOptions { size, ..StyleOptions::default() }
  }

  #[test]
  fn output_is_a_png_of_the_scaled_size() {
    let png = render_png("https://example.com", &style(256), None, 2).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!((img.width(), img.height()), (512, 512));
  }

  #[test]
  fn quiet_zone_uses_background_and_finder_uses_foreground() {
    let s = StyleOptions {
      foreground_color: "#FF0000".into(),
      background_color: "#00FF00".into(),
      ..style(330)
    };
    // 33 cells at 10 px each.
    let img = render_image("https://example.com", &s, None, 1).unwrap();
    assert_eq!(*img.get_pixel(5, 5), Rgba([0, 255, 0, 255]));
    assert_eq!(*img.get_pixel(45, 45), Rgba([255, 0, 0, 255]));
  }

  #[test]
  fn dots_leave_module_corners_empty() {
    let s = StyleOptions { module_style: ModuleStyle::Dots, ..style(330) };
    let img = render_image("https://example.com", &s, None, 1).unwrap();
    // Module (4,4) spans 40..50; its corner pixel is outside the dot.
    assert_eq!(*img.get_pixel(40, 40), WHITE);
    assert_eq!(*img.get_pixel(45, 45), BLACK);
  }

  #[test]
  fn rounded_corners_are_transparent_without_frame() {
    let s = StyleOptions { corner_style: CornerStyle::ExtraRounded, ..style(256) };
    let img = render_image("hello", &s, None, 1).unwrap();
    assert_eq!(img.get_pixel(0, 0)[3], 0);
    assert_eq!(*img.get_pixel(128, 2), WHITE);
  }

  #[test]
  fn frame_is_painted_in_frame_color() {
    let s = StyleOptions {
      frame: FrameOptions {
        style: FrameStyle::Simple,
        color: "#1E3A5F".into(),
        label_text: "SCAN ME".into(),
        label_icon: LabelIcon::Scan,
        ..FrameOptions::default()
      },
      ..style(200)
    };
    let img = render_image("hello", &s, None, 1).unwrap();
    let layout = Layout::new(&s, 1);
    assert_eq!((img.width(), img.height()), (layout.width, layout.height));
    assert_eq!(*img.get_pixel(2, 2), Rgba([0x1E, 0x3A, 0x5F, 255]));
    // Inner panel is background colored.
    let panel = layout.panel.unwrap().rect;
    assert_eq!(*img.get_pixel(panel.x + 1, panel.y + 1), WHITE);
  }

  #[test]
  fn logo_covers_the_center() {
    let red = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(red)
      .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
      .unwrap();
    let logo = Logo::from_bytes(&bytes).unwrap();

    let s = StyleOptions {
      logo_url: Some("logo.png".into()),
      logo_size: 20,
      error_correction: qrstudio_core::style::ErrorCorrection::H,
      ..style(256)
    };
    let img = render_image("https://example.com", &s, Some(&logo), 1).unwrap();
    assert_eq!(*img.get_pixel(128, 128), Rgba([255, 0, 0, 255]));
  }

  #[test]
  fn label_text_is_drawn_in_contrast_color() {
    let framed = |label_text: &str| StyleOptions {
      frame: FrameOptions {
        style: FrameStyle::Rounded,
        color: "#000000".into(),
        label_text: label_text.into(),
        label_icon: LabelIcon::None,
        ..FrameOptions::default()
      },
      ..style(200)
    };
    let inked = |s: &StyleOptions| {
      let img = render_image("hello", s, None, 2).unwrap();
      let pill = Layout::new(s, 2).label.unwrap().pill;
      (pill.y..pill.bottom())
        .flat_map(|y| (pill.x..pill.x + pill.w).map(move |x| (x, y)))
        .filter(|&(x, y)| *img.get_pixel(x, y) == WHITE)
        .count()
    };

    assert!(inked(&framed("SCAN ME")) > 100);
    // Blank text keeps the pill but draws nothing in it.
    assert_eq!(inked(&framed("   ")), 0);
  }

  #[test]
  fn long_label_text_stays_inside_the_pill() {
    let s = StyleOptions {
      frame: FrameOptions {
        style: FrameStyle::Simple,
        color: "#000000".into(),
        label_text: "W".repeat(64),
        label_icon: LabelIcon::Qr,
        ..FrameOptions::default()
      },
      ..style(64)
    };
    let img = render_image("hello", &s, None, 1).unwrap();
    let pill = Layout::new(&s, 1).label.unwrap().pill;
    // Right of the pill is still frame color.
    for y in pill.y..pill.bottom() {
      for x in pill.x + pill.w..img.width() {
        assert_eq!(*img.get_pixel(x, y), BLACK);
      }
    }
  }

  #[test]
  fn oversized_style_is_an_error_not_a_panic() {
    let s = StyleOptions { size: 1_500_000_000, ..StyleOptions::default() };
    assert!(matches!(
      render_png("x", &s, None, 2),
      Err(crate::Error::Style(qrstudio_core::Error::InvalidStyle(_)))
    ));
    let s = StyleOptions { margin: u32::MAX, ..style(128) };
    assert!(render_image("x", &s, None, 1).is_err());
  }

  #[test]
  fn invalid_color_is_rejected() {
    let s = StyleOptions { foreground_color: "black".into(), ..style(128) };
    assert!(render_png("x", &s, None, 1).is_err());
  }
}
