//! SVG back-end.

use std::fmt::Write as _;

use qrstudio_core::{
  markup::escape,
  style::{ModuleStyle, StyleOptions},
};

use crate::{
  Result,
  color::Rgb,
  layout::{FONT_SIZE, Layout, Panel},
  logo::Logo,
  matrix::Matrix,
};

/// Render `value` as a standalone SVG document at nominal size.
pub fn render_svg(value: &str, style: &StyleOptions, logo: Option<&Logo>) -> Result<String> {
  style.validate()?;
  let layout = Layout::new(style, 1);
  let fg = Rgb::parse_hex(&style.foreground_color)?.to_hex();
  let bg = Rgb::parse_hex(&style.background_color)?.to_hex();

  let mut svg = String::new();
  // `write!` into a String cannot fail.
  let _ = write!(
    svg,
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
    w = layout.width,
    h = layout.height,
  );

  if let Some(frame) = layout.frame {
    let frame_color = Rgb::parse_hex(&style.frame.color)?;
    push_panel(&mut svg, frame, &frame_color.to_hex());
    if let Some(panel) = layout.panel {
      push_panel(&mut svg, panel, &bg);
    }
    if let Some(label) = &layout.label {
      let pill = Panel { rect: label.pill, radius: label.pill.h / 2 };
      push_panel(&mut svg, pill, &frame_color.to_hex());
      let ink = frame_color.contrast().to_hex();
      if let Some(b) = label.badge {
        let r = b.w / 2;
        let _ = write!(
          svg,
          r#"<circle cx="{}" cy="{}" r="{r}" fill="{ink}" fill-opacity="0.2"/>"#,
          b.x + r,
          b.y + r,
        );
      }
      if let Some((x, y)) = label.text {
        let _ = write!(
          svg,
          r#"<text x="{x}" y="{y}" font-family="sans-serif" font-size="{FONT_SIZE}" font-weight="bold" fill="{ink}">{}</text>"#,
          escape(style.frame.label_text.trim()),
        );
      }
    }
  }
  push_panel(&mut svg, layout.code, &bg);

  let mut matrix = Matrix::encode(value, style.error_correction, style.margin)?;
  let logo_rect = logo.and_then(|_| layout.logo(style));
  if let Some(rect) = logo_rect {
    matrix.excavate(rect.w, layout.code.rect.w);
  }

  let area = layout.code.rect;
  let module = f64::from(area.w) / matrix.cells() as f64;
  let at = |i: usize, origin: u32| f64::from(origin) + i as f64 * module;

  match style.module_style {
    ModuleStyle::Squares => {
      let mut path = String::new();
      for (mx, my) in matrix.dark_modules() {
        let _ = write!(path, "M{:.3} {:.3}h{module:.3}v{module:.3}h-{module:.3}z", at(mx, area.x), at(my, area.y));
      }
      let _ = write!(svg, r#"<path fill="{fg}" d="{path}"/>"#);
    }
    ModuleStyle::Dots => {
      let _ = write!(svg, r#"<g fill="{fg}">"#);
      let r = module / 2.0;
      for (mx, my) in matrix.dark_modules() {
        let _ = write!(
          svg,
          r#"<circle cx="{:.3}" cy="{:.3}" r="{r:.3}"/>"#,
          at(mx, area.x) + r,
          at(my, area.y) + r,
        );
      }
      svg.push_str("</g>");
    }
    ModuleStyle::Rounded => {
      let _ = write!(svg, r#"<g fill="{fg}">"#);
      let r = module * 0.3;
      for (mx, my) in matrix.dark_modules() {
        let _ = write!(
          svg,
          r#"<rect x="{:.3}" y="{:.3}" width="{module:.3}" height="{module:.3}" rx="{r:.3}"/>"#,
          at(mx, area.x),
          at(my, area.y),
        );
      }
      svg.push_str("</g>");
    }
  }

  if let (Some(logo), Some(rect)) = (logo, logo_rect) {
    let _ = write!(
      svg,
      r#"<image x="{}" y="{}" width="{}" height="{}" href="{}"/>"#,
      rect.x,
      rect.y,
      rect.w,
      rect.h,
      logo.to_data_url(rect.w)?,
    );
  }

  svg.push_str("</svg>");
  Ok(svg)
}

fn push_panel(svg: &mut String, panel: Panel, fill: &str) {
  let r = panel.rect;
  let _ = write!(
    svg,
    r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{fill}"/>"#,
    r.x, r.y, r.w, r.h, panel.radius,
  );
}

#[cfg(test)]
mod tests {
  use qrstudio_core::style::{FrameOptions, FrameStyle, LabelIcon};

  use super::*;

  #[test]
  fn document_has_nominal_dimensions() {
    let s = StyleOptions { size: 300, ..StyleOptions::default() };
    let svg = render_svg("hello", &s, None).unwrap();
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="300""#));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains(r##"<path fill="#000000""##));
  }

  #[test]
  fn dots_become_circles() {
    let s = StyleOptions { module_style: ModuleStyle::Dots, ..StyleOptions::default() };
    let svg = render_svg("hello", &s, None).unwrap();
    assert!(svg.contains("<circle "));
    assert!(!svg.contains("<path "));
  }

  #[test]
  fn label_text_is_escaped_and_contrasted() {
    let s = StyleOptions {
      frame: FrameOptions {
        style: FrameStyle::Rounded,
        color: "#000000".into(),
        label_text: "Tom & <Jerry>".into(),
        label_icon: LabelIcon::Qr,
        ..FrameOptions::default()
      },
      ..StyleOptions::default()
    };
    let svg = render_svg("hello", &s, None).unwrap();
    assert!(svg.contains("Tom &amp; &lt;Jerry&gt;</text>"), "{svg}");
    assert!(svg.contains(r##"fill="#FFFFFF">Tom"##), "{svg}");
    assert!(svg.contains(r#"fill-opacity="0.2""#));
  }
}
