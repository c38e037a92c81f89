//! Hosted business-card profiles.
//!
//! A profile is the durable side of the `vcard-plus` kind: the form submits a
//! [`ProfileInput`], the store keeps a [`Profile`], and the code itself only
//! carries the link to the public page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::{Error, Result, payload::BusinessCardFields, style::is_hex_color};

/// Default accent color of a new profile.
pub const DEFAULT_PRIMARY_COLOR: &str = "#3B82F6";

/// Page theme of a profile. Unknown stored values read back as
/// [`Theme::Modern`].
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
pub enum Theme {
  #[default]
  Modern,
  Classic,
  Gradient,
  Dark,
  Minimal,
}

impl Theme {
  /// Parse a stored theme id, falling back to the default.
  pub fn from_id(id: &str) -> Self { id.parse().unwrap_or_default() }
}

/// What the business-card form submits.
///
/// `slug` is `None` for a first save; a later save passes the slug it got
/// back to update the same record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileInput {
  pub slug:          Option<String>,
  pub first_name:    String,
  pub last_name:     String,
  pub photo_url:     Option<String>,
  pub job_title:     Option<String>,
  pub company:       Option<String>,
  pub bio:           Option<String>,
  pub email:         Option<String>,
  pub phone:         Option<String>,
  pub website:       Option<String>,
  pub address:       Option<String>,
  pub instagram:     Option<String>,
  pub facebook:      Option<String>,
  pub linkedin:      Option<String>,
  pub twitter:       Option<String>,
  pub youtube:       Option<String>,
  pub tiktok:        Option<String>,
  pub github:        Option<String>,
  pub whatsapp:      Option<String>,
  pub theme:         Theme,
  pub primary_color: Option<String>,
}

impl ProfileInput {
  /// Both names are required before anything is stored, and the accent
  /// color, when given, must be `#RRGGBB`.
  pub fn validate(&self) -> Result<()> {
    if self.first_name.is_empty() || self.last_name.is_empty() {
      return Err(Error::MissingName);
    }
    if let Some(color) = self.primary_color.as_deref().filter(|c| !c.is_empty())
      && !is_hex_color(color)
    {
      return Err(Error::InvalidColor(color.to_owned()));
    }
    Ok(())
  }

  /// The subset the encoder and validator look at.
  pub fn card_fields(&self) -> BusinessCardFields {
    BusinessCardFields {
      first_name: Some(self.first_name.clone()),
      last_name:  Some(self.last_name.clone()),
    }
  }

  /// Turn empty optional strings into `None` and fill in the default color.
  pub fn normalized(mut self) -> Self {
    for field in [
      &mut self.slug,
      &mut self.photo_url,
      &mut self.job_title,
      &mut self.company,
      &mut self.bio,
      &mut self.email,
      &mut self.phone,
      &mut self.website,
      &mut self.address,
      &mut self.instagram,
      &mut self.facebook,
      &mut self.linkedin,
      &mut self.twitter,
      &mut self.youtube,
      &mut self.tiktok,
      &mut self.github,
      &mut self.whatsapp,
      &mut self.primary_color,
    ] {
      if field.as_deref().is_some_and(str::is_empty) {
        *field = None;
      }
    }
    if self.primary_color.is_none() {
      self.primary_color = Some(DEFAULT_PRIMARY_COLOR.to_owned());
    }
    self
  }
}

/// A stored profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub id:            Uuid,
  pub slug:          String,
  pub first_name:    String,
  pub last_name:     String,
  pub photo_url:     Option<String>,
  pub job_title:     Option<String>,
  pub company:       Option<String>,
  pub bio:           Option<String>,
  pub email:         Option<String>,
  pub phone:         Option<String>,
  pub website:       Option<String>,
  pub address:       Option<String>,
  pub instagram:     Option<String>,
  pub facebook:      Option<String>,
  pub linkedin:      Option<String>,
  pub twitter:       Option<String>,
  pub youtube:       Option<String>,
  pub tiktok:        Option<String>,
  pub github:        Option<String>,
  pub whatsapp:      Option<String>,
  pub theme:         Theme,
  pub primary_color: String,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
}

impl Profile {
  /// Build the record a store persists for `input`, stamped `now`.
  ///
  /// `input.slug` is ignored; the store decides the slug.
  pub fn from_input(id: Uuid, slug: String, input: ProfileInput, now: DateTime<Utc>) -> Self {
    let input = input.normalized();
    Self {
      id,
      slug,
      first_name: input.first_name,
      last_name: input.last_name,
      photo_url: input.photo_url,
      job_title: input.job_title,
      company: input.company,
      bio: input.bio,
      email: input.email,
      phone: input.phone,
      website: input.website,
      address: input.address,
      instagram: input.instagram,
      facebook: input.facebook,
      linkedin: input.linkedin,
      twitter: input.twitter,
      youtube: input.youtube,
      tiktok: input.tiktok,
      github: input.github,
      whatsapp: input.whatsapp,
      theme: input.theme,
      primary_color: input
        .primary_color
        .unwrap_or_else(|| DEFAULT_PRIMARY_COLOR.to_owned()),
      created_at: now,
      updated_at: now,
    }
  }

  pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
    self.created_at = created_at;
    self
  }

  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  /// Up to two initials for the avatar placeholder.
  pub fn initials(&self) -> String {
    self
      .first_name
      .chars()
      .take(1)
      .chain(self.last_name.chars().take(1))
      .collect()
  }

  /// Public page URL under `base_url`.
  pub fn link(&self, base_url: &str) -> String { profile_link(base_url, &self.slug) }
}

/// `<base_url>/p/<slug>`, tolerating a trailing slash on `base_url`.
pub fn profile_link(base_url: &str, slug: &str) -> String {
  format!("{}/p/{slug}", base_url.trim_end_matches('/'))
}
