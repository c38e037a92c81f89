//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, UUIDs hyphenated lowercase, themes their
//! lowercase id.

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use qrstudio_core::{
  profile::{Profile, Theme},
  store::ImageMeta,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `profiles` row, in
/// [`crate::schema::PROFILE_COLUMNS`] order.
pub struct RawProfile {
  pub id:            String,
  pub slug:          String,
  pub first_name:    String,
  pub last_name:     String,
  pub optional:      [Option<String>; 16],
  pub theme:         String,
  pub primary_color: String,
  pub created_at:    String,
  pub updated_at:    String,
}

impl RawProfile {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    let mut optional: [Option<String>; 16] = Default::default();
    for (i, slot) in optional.iter_mut().enumerate() {
      *slot = row.get(4 + i)?;
    }
    Ok(Self {
      id: row.get(0)?,
      slug: row.get(1)?,
      first_name: row.get(2)?,
      last_name: row.get(3)?,
      optional,
      theme: row.get(20)?,
      primary_color: row.get(21)?,
      created_at: row.get(22)?,
      updated_at: row.get(23)?,
    })
  }

  pub fn into_profile(self) -> Result<Profile> {
    let [
      photo_url,
      job_title,
      company,
      bio,
      email,
      phone,
      website,
      address,
      instagram,
      facebook,
      linkedin,
      twitter,
      youtube,
      tiktok,
      github,
      whatsapp,
    ] = self.optional;

    Ok(Profile {
      id: decode_uuid(&self.id)?,
      slug: self.slug,
      first_name: self.first_name,
      last_name: self.last_name,
      photo_url,
      job_title,
      company,
      bio,
      email,
      phone,
      website,
      address,
      instagram,
      facebook,
      linkedin,
      twitter,
      youtube,
      tiktok,
      github,
      whatsapp,
      theme: Theme::from_id(&self.theme),
      primary_color: self.primary_color,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Every column of a profile, in [`crate::schema::PROFILE_COLUMNS`] order,
/// ready to bind as `?1..?24`.
pub fn profile_values(p: &Profile) -> Vec<Value> {
  let text = |s: &str| Value::Text(s.to_owned());
  let mut values = vec![
    Value::Text(encode_uuid(p.id)),
    text(&p.slug),
    text(&p.first_name),
    text(&p.last_name),
  ];
  values.extend(
    optional_columns(p)
      .into_iter()
      .map(|v| v.map_or(Value::Null, Value::Text)),
  );
  values.extend([
    text(p.theme.as_ref()),
    text(&p.primary_color),
    Value::Text(encode_dt(p.created_at)),
    Value::Text(encode_dt(p.updated_at)),
  ]);
  values
}

fn optional_columns(p: &Profile) -> [Option<String>; 16] {
  [
    p.photo_url.clone(),
    p.job_title.clone(),
    p.company.clone(),
    p.bio.clone(),
    p.email.clone(),
    p.phone.clone(),
    p.website.clone(),
    p.address.clone(),
    p.instagram.clone(),
    p.facebook.clone(),
    p.linkedin.clone(),
    p.twitter.clone(),
    p.youtube.clone(),
    p.tiktok.clone(),
    p.github.clone(),
    p.whatsapp.clone(),
  ]
}

/// Raw values read from an `images` row (without the blob).
pub struct RawImageMeta {
  pub name:         String,
  pub content_type: String,
  pub size:         i64,
  pub created_at:   String,
}

impl RawImageMeta {
  pub fn into_meta(self) -> Result<ImageMeta> {
    Ok(ImageMeta {
      name:         self.name,
      content_type: self.content_type,
      size:         usize::try_from(self.size).unwrap_or_default(),
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}
