//! SQL schema for the QR Studio SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision for future migrations.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS profiles (
    id            TEXT PRIMARY KEY,
    slug          TEXT NOT NULL UNIQUE,
    first_name    TEXT NOT NULL,
    last_name     TEXT NOT NULL,
    photo_url     TEXT,
    job_title     TEXT,
    company       TEXT,
    bio           TEXT,
    email         TEXT,
    phone         TEXT,
    website       TEXT,
    address       TEXT,
    instagram     TEXT,
    facebook      TEXT,
    linkedin      TEXT,
    twitter       TEXT,
    youtube       TEXT,
    tiktok        TEXT,
    github        TEXT,
    whatsapp      TEXT,
    theme         TEXT NOT NULL DEFAULT 'modern',
    primary_color TEXT NOT NULL DEFAULT '#3B82F6',
    created_at    TEXT NOT NULL,   -- RFC 3339 UTC
    updated_at    TEXT NOT NULL    -- RFC 3339 UTC
);

-- Uploaded photos and logos. Names are generated, never user-chosen.
CREATE TABLE IF NOT EXISTS images (
    name          TEXT PRIMARY KEY,
    content_type  TEXT NOT NULL,
    size          INTEGER NOT NULL,
    data          BLOB NOT NULL,
    created_at    TEXT NOT NULL
);

PRAGMA user_version = 1;
";

/// Columns of `profiles` in the order [`crate::encode::RawProfile`] reads
/// them.
pub const PROFILE_COLUMNS: &str = "id, slug, first_name, last_name, photo_url, \
   job_title, company, bio, email, phone, website, address, instagram, \
   facebook, linkedin, twitter, youtube, tiktok, github, whatsapp, theme, \
   primary_color, created_at, updated_at";
