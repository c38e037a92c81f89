//! Style flags.

use anyhow::{Result, anyhow};
use clap::Args;
use qrstudio_core::{
  style::{
    CornerStyle, ErrorCorrection, FrameStyle, LabelIcon, LabelPosition,
    ModuleStyle, StyleOptions,
  },
  template::template,
};

/// Visual options. A `--template` is applied first; individual flags then
/// override its values.
#[derive(Args, Debug, Default, Clone)]
pub struct StyleArgs {
  /// Template id (see `qrstudio templates`).
  #[arg(long)]
  pub template: Option<String>,

  /// Module color, `#RRGGBB`.
  #[arg(long, value_name = "HEX")]
  pub fg: Option<String>,
  /// Background color, `#RRGGBB`.
  #[arg(long, value_name = "HEX")]
  pub bg: Option<String>,
  /// squares, dots or rounded.
  #[arg(long)]
  pub modules: Option<ModuleStyle>,
  /// square, rounded or extra-rounded.
  #[arg(long)]
  pub corners: Option<CornerStyle>,
  /// L, M, Q or H.
  #[arg(long)]
  pub ec: Option<ErrorCorrection>,
  /// Quiet zone in modules.
  #[arg(long, value_parser = clap::value_parser!(u32).range(0..=10))]
  pub margin: Option<u32>,
  /// Edge of the code in pixels.
  #[arg(long, value_parser = clap::value_parser!(u32).range(64..=2048))]
  pub size: Option<u32>,

  /// Logo: file path, URL, hosted `/images/<name>` path or `data:` URL.
  #[arg(long)]
  pub logo: Option<String>,
  /// Logo edge as a percentage of the code size.
  #[arg(long, value_parser = clap::value_parser!(u32).range(10..=40))]
  pub logo_size: Option<u32>,

  /// none, simple, rounded or fancy.
  #[arg(long)]
  pub frame: Option<FrameStyle>,
  #[arg(long, value_name = "HEX")]
  pub frame_color: Option<String>,
  #[arg(long)]
  pub label: Option<String>,
  #[arg(long)]
  pub label_icon: Option<LabelIcon>,
  /// top or bottom.
  #[arg(long)]
  pub label_position: Option<LabelPosition>,
}

impl StyleArgs {
  pub fn apply(self, style: &mut StyleOptions) -> Result<()> {
    if let Some(id) = &self.template {
      let template = template(id).ok_or_else(|| anyhow!("unknown template {id:?}"))?;
      style.apply_template(&template);
    }

    macro_rules! set {
      ($($field:expr => $value:expr),* $(,)?) => {
        $(if let Some(v) = $value { $field = v; })*
      };
    }
    set! {
      style.foreground_color => self.fg,
      style.background_color => self.bg,
      style.module_style => self.modules,
      style.corner_style => self.corners,
      style.error_correction => self.ec,
      style.margin => self.margin,
      style.size => self.size,
      style.logo_size => self.logo_size,
      style.frame.style => self.frame,
      style.frame.color => self.frame_color,
      style.frame.label_text => self.label,
      style.frame.label_icon => self.label_icon,
      style.frame.label_position => self.label_position,
    }
    if self.logo.is_some() {
      style.logo_url = self.logo;
    }
    Ok(())
  }
}
