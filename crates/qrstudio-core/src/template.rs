//! Predefined style templates.

use serde::Serialize;

use crate::style::{
  CornerStyle, ErrorCorrection, FrameOptions, FrameStyle, LabelIcon,
  LabelPosition, ModuleStyle, StyleOptions,
};

/// A named, ready-made [`StyleOptions`].
#[derive(Debug, Clone, Serialize)]
pub struct Template {
  pub id:          &'static str,
  pub name:        &'static str,
  pub description: &'static str,
  pub style:       StyleOptions,
}

impl Template {
  /// A template counts as applied when colors and module shape match.
  pub fn is_active_for(&self, current: &StyleOptions) -> bool {
    self.style.foreground_color == current.foreground_color
      && self.style.background_color == current.background_color
      && self.style.module_style == current.module_style
  }
}

struct Preset {
  id:          &'static str,
  name:        &'static str,
  description: &'static str,
  fg:          &'static str,
  bg:          &'static str,
  module:      ModuleStyle,
  corner:      CornerStyle,
  logo_size:   u32,
  margin:      u32,
  level:       ErrorCorrection,
  frame:       Option<(FrameStyle, &'static str, &'static str, LabelIcon)>,
}

const PRESETS: &[Preset] = &[
  Preset {
    id: "classic",
    name: "Classic",
    description: "Traditional black on white",
    fg: "#000000",
    bg: "#FFFFFF",
    module: ModuleStyle::Squares,
    corner: CornerStyle::Square,
    logo_size: 20,
    margin: 4,
    level: ErrorCorrection::M,
    frame: None,
  },
  Preset {
    id: "business",
    name: "Business",
    description: "Navy with a professional frame",
    fg: "#1E3A5F",
    bg: "#FFFFFF",
    module: ModuleStyle::Squares,
    corner: CornerStyle::Rounded,
    logo_size: 20,
    margin: 4,
    level: ErrorCorrection::H,
    frame: Some((FrameStyle::Rounded, "#1E3A5F", "Scannez-moi", LabelIcon::Scan)),
  },
  Preset {
    id: "modern-dots",
    name: "Modern",
    description: "Rounded dots",
    fg: "#2563EB",
    bg: "#FFFFFF",
    module: ModuleStyle::Dots,
    corner: CornerStyle::ExtraRounded,
    logo_size: 25,
    margin: 4,
    level: ErrorCorrection::H,
    frame: None,
  },
  Preset {
    id: "colorful",
    name: "Colorful",
    description: "Vibrant violet with a frame",
    fg: "#7C3AED",
    bg: "#FDF4FF",
    module: ModuleStyle::Rounded,
    corner: CornerStyle::ExtraRounded,
    logo_size: 20,
    margin: 4,
    level: ErrorCorrection::H,
    frame: Some((FrameStyle::Fancy, "#7C3AED", "", LabelIcon::Qr)),
  },
  Preset {
    id: "minimalist",
    name: "Minimalist",
    description: "Simple and clean",
    fg: "#374151",
    bg: "#F9FAFB",
    module: ModuleStyle::Squares,
    corner: CornerStyle::Square,
    logo_size: 15,
    margin: 6,
    level: ErrorCorrection::M,
    frame: None,
  },
  Preset {
    id: "nature",
    name: "Nature",
    description: "Ecological green",
    fg: "#059669",
    bg: "#ECFDF5",
    module: ModuleStyle::Rounded,
    corner: CornerStyle::Rounded,
    logo_size: 20,
    margin: 4,
    level: ErrorCorrection::H,
    frame: Some((FrameStyle::Rounded, "#059669", "Eco", LabelIcon::Link)),
  },
  Preset {
    id: "sunset",
    name: "Sunset",
    description: "Warm orange",
    fg: "#EA580C",
    bg: "#FFF7ED",
    module: ModuleStyle::Dots,
    corner: CornerStyle::ExtraRounded,
    logo_size: 20,
    margin: 4,
    level: ErrorCorrection::H,
    frame: Some((FrameStyle::Fancy, "#EA580C", "", LabelIcon::Scan)),
  },
  Preset {
    id: "dark-mode",
    name: "Dark mode",
    description: "Light modules on dark",
    fg: "#FFFFFF",
    bg: "#1F2937",
    module: ModuleStyle::Squares,
    corner: CornerStyle::Rounded,
    logo_size: 20,
    margin: 4,
    level: ErrorCorrection::H,
    frame: Some((FrameStyle::Rounded, "#111827", "Scanner", LabelIcon::Scan)),
  },
  Preset {
    id: "contact",
    name: "Contact",
    description: "Made for contact cards",
    fg: "#000000",
    bg: "#FFFFFF",
    module: ModuleStyle::Dots,
    corner: CornerStyle::Rounded,
    logo_size: 25,
    margin: 4,
    level: ErrorCorrection::H,
    frame: Some((FrameStyle::Fancy, "#000000", "Contact", LabelIcon::Contact)),
  },
  Preset {
    id: "wifi",
    name: "Wi-Fi",
    description: "Made for network credentials",
    fg: "#2563EB",
    bg: "#EFF6FF",
    module: ModuleStyle::Rounded,
    corner: CornerStyle::Rounded,
    logo_size: 20,
    margin: 4,
    level: ErrorCorrection::H,
    frame: Some((FrameStyle::Rounded, "#2563EB", "Wi-Fi", LabelIcon::Wifi)),
  },
];

impl Preset {
  fn to_template(&self) -> Template {
    let frame = match self.frame {
      Some((style, color, label, icon)) => FrameOptions {
        style,
        color: color.to_owned(),
        label_text: label.to_owned(),
        label_icon: icon,
        label_position: LabelPosition::Bottom,
      },
      None => FrameOptions::default(),
    };
    Template {
      id:          self.id,
      name:        self.name,
      description: self.description,
      style:       StyleOptions {
        foreground_color: self.fg.to_owned(),
        background_color: self.bg.to_owned(),
        module_style: self.module,
        corner_style: self.corner,
        logo_url: None,
        logo_size: self.logo_size,
        margin: self.margin,
        error_correction: self.level,
        size: 256,
        frame,
      },
    }
  }
}

/// All templates, in display order.
pub fn templates() -> Vec<Template> {
  PRESETS.iter().map(Preset::to_template).collect()
}

/// Look a template up by id.
pub fn template(id: &str) -> Option<Template> {
  PRESETS.iter().find(|p| p.id == id).map(Preset::to_template)
}

impl StyleOptions {
  /// Replace every style field with the template's, keeping the current logo.
  pub fn apply_template(&mut self, template: &Template) {
    let logo = self.logo_url.take();
    *self = template.style.clone();
    self.logo_url = logo;
  }
}
