//! Payload encoder and validator for QR Studio.
//!
//! Turns a [`Payload`] into the exact string a scanner reads. Everything here
//! is pure and infallible.
//!
//! # Quick start
//!
//! ```
//! use qrstudio_core::payload::{Payload, WifiEncryption, WifiFields};
//! use qrstudio_encode::{encode, is_valid};
//!
//! let wifi = Payload::Wifi(WifiFields {
//!   ssid:       Some("Net".into()),
//!   password:   Some("pw".into()),
//!   encryption: WifiEncryption::Wpa,
//!   hidden:     Some(true),
//! });
//! assert_eq!(encode(&wifi, None), "WIFI:T:WPA;S:Net;P:pw;H:true;;");
//! assert!(is_valid(&wifi, None));
//! ```

mod encode;
pub mod social;
pub mod vcard;

use qrstudio_core::payload::{Payload, present};

pub use vcard::{ContactCard, vcard_file_name};

// ─── Public API ──────────────────────────────────────────────────────────────

/// Encode `payload` as scanner text.
///
/// `profile_link` is only read for the `vcard-plus` kind, which encodes to
/// the link itself (or nothing until the profile has been published).
/// Incomplete payloads encode to the empty string.
pub fn encode(payload: &Payload, profile_link: Option<&str>) -> String {
  encode::encode(payload, profile_link)
}

/// Whether `payload` is complete enough to generate a code.
///
/// For every kind but `vcard-plus` this is exactly "encodes to something".
/// A business card is also valid when both names are filled in but it has
/// not been published yet: the link is expected to appear once it is saved.
pub fn is_valid(payload: &Payload, profile_link: Option<&str>) -> bool {
  match payload {
    Payload::VcardPlus(card) => {
      profile_link.is_some_and(|l| !l.is_empty())
        || (present(&card.first_name).is_some() && present(&card.last_name).is_some())
    }
    other => !encode(other, None).is_empty(),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────


// ─── Shared test helpers ──────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod test_helpers {
  use chrono::{TimeZone, Utc};
  use qrstudio_core::profile::{Profile, Theme};
  use uuid::Uuid;

  /// A stored profile with only the names filled in.
  pub(crate) fn make_profile(first: &str, last: &str) -> Profile {
    let at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    Profile {
      id:            Uuid::new_v4(),
      slug:          "abc12345".to_owned(),
      first_name:    first.to_owned(),
      last_name:     last.to_owned(),
      photo_url:     None,
      job_title:     None,
      company:       None,
      bio:           None,
      email:         None,
      phone:         None,
      website:       None,
      address:       None,
      instagram:     None,
      facebook:      None,
      linkedin:      None,
      twitter:       None,
      youtube:       None,
      tiktok:        None,
      github:        None,
      whatsapp:      None,
      theme:         Theme::Modern,
      primary_color: "#3B82F6".to_owned(),
      created_at:    at,
      updated_at:    at,
    }
  }
}
