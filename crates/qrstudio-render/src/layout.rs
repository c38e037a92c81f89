//! Geometry shared by the PNG and SVG back-ends.
//!
//! All lengths are in output pixels: the CSS-pixel constants below are
//! multiplied by the export scale once, here, so the back-ends never deal
//! with scaling themselves.

use qrstudio_core::style::{
  CornerStyle, FrameOptions, FrameStyle, LabelIcon, LabelPosition, StyleOptions,
};

const FRAME_PADDING: u32 = 16;
const INNER_PADDING: u32 = 8;
const LABEL_GAP: u32 = 12;
pub(crate) const PILL_PADDING_X: u32 = 16;
const PILL_PADDING_Y: u32 = 8;
const BADGE: u32 = 32;
const BADGE_GAP: u32 = 12;
/// Approximate advance of one bold 18px glyph.
const GLYPH_ADVANCE: u32 = 11;
pub(crate) const FONT_SIZE: u32 = 18;

/// Outer radius of the frame.
pub fn frame_radius(style: FrameStyle) -> u32 {
  match style {
    FrameStyle::None | FrameStyle::Simple => 0,
    FrameStyle::Rounded => 16,
    FrameStyle::Fancy => 24,
  }
}

/// Radius of the light panel the code sits on inside a frame.
pub fn inner_radius(style: FrameStyle) -> u32 {
  match style {
    FrameStyle::None | FrameStyle::Simple => 0,
    FrameStyle::Rounded => 8,
    FrameStyle::Fancy => 12,
  }
}

/// Radius of the code's own background.
pub fn corner_radius(style: CornerStyle) -> u32 {
  match style {
    CornerStyle::Square => 0,
    CornerStyle::Rounded => 12,
    CornerStyle::ExtraRounded => 24,
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
  pub x: u32,
  pub y: u32,
  pub w: u32,
  pub h: u32,
}

impl Rect {
  pub fn bottom(&self) -> u32 { self.y + self.h }
}

/// A rectangle with rounded corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
  pub rect:   Rect,
  pub radius: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
  /// The pill behind the label; fully rounded.
  pub pill:  Rect,
  /// Icon badge, as a square the circle is inscribed in.
  pub badge: Option<Rect>,
  /// Baseline origin of the text, if any.
  pub text:  Option<(u32, u32)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
  pub scale:  u32,
  pub width:  u32,
  pub height: u32,
  /// The colored frame, absent for `FrameStyle::None`.
  pub frame:  Option<Panel>,
  /// Light panel inside the frame.
  pub panel:  Option<Panel>,
  /// The code's own background, quiet zone included.
  pub code:   Panel,
  pub label:  Option<Label>,
}

impl Layout {
  /// Geometry for `style` at `scale`. Expects a style that passed
  /// [`StyleOptions::validate`].
  pub fn new(style: &StyleOptions, scale: u32) -> Self {
    let scale = scale.max(1);
    let code_px = style.size.saturating_mul(scale);
    let code_radius = corner_radius(style.corner_style) * scale;

    if !style.frame.has_frame() {
      return Self {
        scale,
        width: code_px,
        height: code_px,
        frame: None,
        panel: None,
        code: Panel {
          rect:   Rect { x: 0, y: 0, w: code_px, h: code_px },
          radius: code_radius,
        },
        label: None,
      };
    }

    let frame = &style.frame;
    let pad = FRAME_PADDING * scale;
    let inner = INNER_PADDING * scale;
    let gap = LABEL_GAP * scale;
    let panel_side = code_px + 2 * inner;
    let width = panel_side + 2 * pad;

    let label_h = if frame.has_label() { pill_height(frame) * scale } else { 0 };
    let label_block = if frame.has_label() { label_h + gap } else { 0 };
    let height = width + label_block;

    let (panel_y, label_y) = match frame.label_position {
      LabelPosition::Top => (pad + label_block, pad),
      LabelPosition::Bottom => (pad, pad + panel_side + gap),
    };

    let panel = Rect { x: pad, y: panel_y, w: panel_side, h: panel_side };
    let code = Rect {
      x: pad + inner,
      y: panel_y + inner,
      w: code_px,
      h: code_px,
    };

    let label = frame
      .has_label()
      .then(|| label_geometry(frame, scale, width, label_y, width - 2 * pad));

    Self {
      scale,
      width,
      height,
      frame: Some(Panel {
        rect:   Rect { x: 0, y: 0, w: width, h: height },
        radius: frame_radius(frame.style) * scale,
      }),
      panel: Some(Panel { rect: panel, radius: inner_radius(frame.style) * scale }),
      code: Panel { rect: code, radius: code_radius },
      label,
    }
  }

  /// Square the logo occupies, centered on the code; `None` without a logo.
  pub fn logo(&self, style: &StyleOptions) -> Option<Rect> {
    let side = style.logo_pixels() * self.scale;
    if side == 0 {
      return None;
    }
    let c = self.code.rect;
    Some(Rect {
      x: c.x + c.w.saturating_sub(side) / 2,
      y: c.y + c.h.saturating_sub(side) / 2,
      w: side,
      h: side,
    })
  }
}

fn pill_height(frame: &FrameOptions) -> u32 {
  let content = if frame.label_icon != LabelIcon::None { BADGE } else { FONT_SIZE + 10 };
  content + 2 * PILL_PADDING_Y
}

fn text_width(text: &str) -> u32 {
  u32::try_from(text.chars().count()).unwrap_or(u32::MAX / GLYPH_ADVANCE) * GLYPH_ADVANCE
}

fn label_geometry(
  frame: &FrameOptions,
  scale: u32,
  width: u32,
  y: u32,
  max_w: u32,
) -> Label {
  let has_icon = frame.label_icon != LabelIcon::None;
  let text = frame.label_text.trim();
  let has_text = !text.is_empty();

  let mut content = 0;
  if has_icon {
    content += BADGE;
  }
  if has_icon && has_text {
    content += BADGE_GAP;
  }
  if has_text {
    content += text_width(text);
  }

  let h = pill_height(frame) * scale;
  let w = ((content + 2 * PILL_PADDING_X) * scale).min(max_w);
  let x = (width - w) / 2;
  let pill = Rect { x, y, w, h };

  let content_x = x + PILL_PADDING_X * scale;
  let badge = has_icon.then(|| Rect {
    x: content_x,
    y: y + (h - BADGE * scale) / 2,
    w: BADGE * scale,
    h: BADGE * scale,
  });

  let text_pos = has_text.then(|| {
    let tx = if has_icon { content_x + (BADGE + BADGE_GAP) * scale } else { content_x };
    // Baseline sits a little below the vertical center for cap-height text.
    let ty = y + h / 2 + (FONT_SIZE * scale) * 7 / 20;
    (tx, ty)
  });

  Label { pill, badge, text: text_pos }
}
