//! [`SqliteStore`], the SQLite implementation of [`ProfileStore`].

use std::path::Path;

use chrono::Utc;
use qrstudio_core::{
  Error as CoreError,
  profile::{Profile, ProfileInput},
  slug::{generate_slug, image_file_name, is_valid_slug},
  store::{ImageMeta, MAX_IMAGE_BYTES, NewImage, ProfileStore, StoredImage},
};
use rusqlite::{ErrorCode, OptionalExtension as _, params, params_from_iter};
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{RawImageMeta, RawProfile, encode_dt, profile_values},
  schema::{PROFILE_COLUMNS, SCHEMA},
};

/// New-profile inserts retry with a fresh slug this many times.
const SLUG_ATTEMPTS: usize = 5;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A profile and image store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert `profile`; `Ok(false)` when its slug (or id) is already taken.
  async fn try_insert(&self, profile: &Profile) -> Result<bool> {
    let values = profile_values(profile);
    let inserted = self
      .conn
      .call(move |conn| {
        let placeholders = (1..=values.len())
          .map(|i| format!("?{i}"))
          .collect::<Vec<_>>()
          .join(", ");
        let sql = format!("INSERT INTO profiles ({PROFILE_COLUMNS}) VALUES ({placeholders})");
        match conn.execute(&sql, params_from_iter(values)) {
          Ok(_) => Ok(true),
          Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == ErrorCode::ConstraintViolation =>
          {
            Ok(false)
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;
    Ok(inserted)
  }

  async fn insert_new(&self, input: ProfileInput) -> Result<Profile> {
    let now = Utc::now();
    let mut profile = Profile::from_input(Uuid::new_v4(), String::new(), input, now);

    for attempt in 1..=SLUG_ATTEMPTS {
      profile.slug = generate_slug();
      if self.try_insert(&profile).await? {
        tracing::info!(slug = %profile.slug, "created profile");
        return Ok(profile);
      }
      tracing::warn!(slug = %profile.slug, attempt, "slug collision; retrying");
    }
    Err(Error::SlugExhausted(SLUG_ATTEMPTS))
  }

  async fn update_existing(&self, slug: String, input: ProfileInput) -> Result<Profile> {
    let Some(existing) = self.get_profile(&slug).await? else {
      return Err(CoreError::ProfileNotFound(slug).into());
    };

    let profile = Profile::from_input(existing.id, slug, input, Utc::now())
      .with_created_at(existing.created_at);
    let values = profile_values(&profile);

    let updated = self
      .conn
      .call(move |conn| {
        // Every column but id (?1), slug (?2) and created_at (?23).
        let assignments = PROFILE_COLUMNS
          .split(',')
          .map(str::trim)
          .enumerate()
          .filter(|(i, _)| ![0, 1, 22].contains(i))
          .map(|(i, col)| format!("{col} = ?{}", i + 1))
          .collect::<Vec<_>>()
          .join(", ");
        let sql = format!("UPDATE profiles SET {assignments} WHERE slug = ?2");
        Ok(conn.execute(&sql, params_from_iter(values))?)
      })
      .await?;

    if updated == 0 {
      return Err(CoreError::ProfileNotFound(profile.slug).into());
    }
    tracing::info!(slug = %profile.slug, "updated profile");
    Ok(profile)
  }
}

// ─── ProfileStore impl ───────────────────────────────────────────────────────

impl ProfileStore for SqliteStore {
  type Error = Error;

  async fn upsert_profile(&self, input: ProfileInput) -> Result<Profile> {
    input.validate()?;
    let mut input = input.normalized();

    match input.slug.take() {
      None => self.insert_new(input).await,
      Some(slug) if !is_valid_slug(&slug) => Err(CoreError::InvalidSlug(slug).into()),
      Some(slug) => self.update_existing(slug, input).await,
    }
  }

  async fn get_profile(&self, slug: &str) -> Result<Option<Profile>> {
    let slug = slug.to_owned();
    let raw = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE slug = ?1");
        Ok(
          conn
            .query_row(&sql, params![slug], RawProfile::from_row)
            .optional()?,
        )
      })
      .await?;
    raw.map(RawProfile::into_profile).transpose()
  }

  async fn put_image(&self, image: NewImage) -> Result<ImageMeta> {
    image.validate(MAX_IMAGE_BYTES)?;

    let now = Utc::now();
    let meta = ImageMeta {
      name:         image_file_name(&image.original_name, now.timestamp_millis()),
      content_type: image.content_type,
      size:         image.bytes.len(),
      created_at:   now,
    };

    let (name, content_type, at) =
      (meta.name.clone(), meta.content_type.clone(), encode_dt(now));
    let size = i64::try_from(meta.size).unwrap_or(i64::MAX);
    let bytes = image.bytes;
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO images (name, content_type, size, data, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          params![name, content_type, size, bytes, at],
        )?;
        Ok(())
      })
      .await?;

    tracing::info!(name = %meta.name, size = meta.size, "stored image");
    Ok(meta)
  }

  async fn get_image(&self, name: &str) -> Result<Option<StoredImage>> {
    let name = name.to_owned();
    let row = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT name, content_type, size, created_at, data
               FROM images WHERE name = ?1",
              params![name],
              |r| {
                Ok((
                  RawImageMeta {
                    name:         r.get(0)?,
                    content_type: r.get(1)?,
                    size:         r.get(2)?,
                    created_at:   r.get(3)?,
                  },
                  r.get::<_, Vec<u8>>(4)?,
                ))
              },
            )
            .optional()?,
        )
      })
      .await?;

    row
      .map(|(raw, bytes)| Ok(StoredImage { meta: raw.into_meta()?, bytes }))
      .transpose()
  }
}
