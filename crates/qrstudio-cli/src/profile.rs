//! Business-card flags for `qrstudio publish`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use qrstudio_core::profile::{ProfileInput, Theme};

#[derive(Args, Debug, Default, Clone)]
pub struct ProfileArgs {
  /// TOML file with profile fields; flags override it.
  #[arg(long, value_name = "FILE")]
  pub from: Option<PathBuf>,

  /// Slug of an existing card to update.
  #[arg(long)]
  pub slug: Option<String>,

  #[arg(long)]
  pub first_name: Option<String>,
  #[arg(long)]
  pub last_name: Option<String>,
  #[arg(long)]
  pub job_title: Option<String>,
  #[arg(long)]
  pub company: Option<String>,
  #[arg(long)]
  pub bio: Option<String>,
  #[arg(long)]
  pub email: Option<String>,
  #[arg(long)]
  pub phone: Option<String>,
  #[arg(long)]
  pub website: Option<String>,
  #[arg(long)]
  pub address: Option<String>,
  #[arg(long)]
  pub instagram: Option<String>,
  #[arg(long)]
  pub facebook: Option<String>,
  #[arg(long)]
  pub linkedin: Option<String>,
  #[arg(long)]
  pub twitter: Option<String>,
  #[arg(long)]
  pub youtube: Option<String>,
  #[arg(long)]
  pub tiktok: Option<String>,
  #[arg(long)]
  pub github: Option<String>,
  #[arg(long)]
  pub whatsapp: Option<String>,
  /// modern, classic, gradient, dark or minimal.
  #[arg(long)]
  pub theme: Option<Theme>,
  /// Accent color, `#RRGGBB`.
  #[arg(long, value_name = "HEX")]
  pub color: Option<String>,

  /// Local image uploaded as the profile photo.
  #[arg(long, value_name = "FILE")]
  pub photo: Option<PathBuf>,
}

impl ProfileArgs {
  /// Merge the optional TOML file with the flags. The photo is handled by
  /// the caller since it needs an upload.
  pub fn to_input(&self) -> Result<ProfileInput> {
    let mut input = match &self.from {
      Some(path) => {
        let raw = std::fs::read_to_string(path)
          .with_context(|| format!("reading profile file {}", path.display()))?;
        toml::from_str(&raw).context("parsing profile file")?
      }
      None => ProfileInput::default(),
    };

    if let Some(v) = &self.first_name {
      input.first_name = v.clone();
    }
    if let Some(v) = &self.last_name {
      input.last_name = v.clone();
    }
    if let Some(theme) = self.theme {
      input.theme = theme;
    }

    let optional = [
      (&mut input.slug, &self.slug),
      (&mut input.job_title, &self.job_title),
      (&mut input.company, &self.company),
      (&mut input.bio, &self.bio),
      (&mut input.email, &self.email),
      (&mut input.phone, &self.phone),
      (&mut input.website, &self.website),
      (&mut input.address, &self.address),
      (&mut input.instagram, &self.instagram),
      (&mut input.facebook, &self.facebook),
      (&mut input.linkedin, &self.linkedin),
      (&mut input.twitter, &self.twitter),
      (&mut input.youtube, &self.youtube),
      (&mut input.tiktok, &self.tiktok),
      (&mut input.github, &self.github),
      (&mut input.whatsapp, &self.whatsapp),
      (&mut input.primary_color, &self.color),
    ];
    for (field, flag) in optional {
      if flag.is_some() {
        field.clone_from(flag);
      }
    }

    Ok(input)
  }
}

/// Guess an image content type from a file extension.
pub fn image_content_type(path: &std::path::Path) -> &'static str {
  let ext = path
    .extension()
    .and_then(|e| e.to_str())
    .map(str::to_ascii_lowercase);
  match ext.as_deref() {
    Some("png") => "image/png",
    Some("jpg" | "jpeg") => "image/jpeg",
    Some("gif") => "image/gif",
    Some("webp") => "image/webp",
    _ => "application/octet-stream",
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use super::*;

  #[test]
  fn flags_fill_input() {
    let input = ProfileArgs {
      first_name: Some("Ada".into()),
      last_name: Some("Lovelace".into()),
      github: Some("ada".into()),
      theme: Some(Theme::Dark),
      color: Some("#112233".into()),
      ..Default::default()
    }
    .to_input()
    .unwrap();

    assert_eq!(input.first_name, "Ada");
    assert_eq!(input.github.as_deref(), Some("ada"));
    assert_eq!(input.theme, Theme::Dark);
    assert_eq!(input.primary_color.as_deref(), Some("#112233"));
    assert_eq!(input.slug, None);
  }

  #[test]
  fn content_type_from_extension() {
    assert_eq!(image_content_type(Path::new("me.JPG")), "image/jpeg");
    assert_eq!(image_content_type(Path::new("me.webp")), "image/webp");
    assert_eq!(image_content_type(Path::new("me")), "application/octet-stream");
  }
}
