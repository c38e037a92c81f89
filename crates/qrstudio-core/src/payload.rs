//! Payload types: what a QR code carries.
//!
//! A [`Payload`] is a tagged union: each kind owns only the fields it reads.
//! Text fields are optional; a field is considered absent when it is `None`
//! or the empty string (see [`present`]).

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

// ─── Kind ────────────────────────────────────────────────────────────────────

/// Discriminant of a [`Payload`]; the wire name is the kebab-case tag.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum QrKind {
  #[default]
  Url,
  Text,
  Email,
  Phone,
  Sms,
  Wifi,
  Vcard,
  VcardPlus,
  Instagram,
  Facebook,
  Linkedin,
  Whatsapp,
}

impl QrKind {
  /// Human-readable label shown in kind pickers.
  pub fn label(self) -> &'static str {
    match self {
      QrKind::Url => "URL",
      QrKind::Text => "Text",
      QrKind::Email => "Email",
      QrKind::Phone => "Phone",
      QrKind::Sms => "SMS",
      QrKind::Wifi => "Wi-Fi",
      QrKind::Vcard => "Contact",
      QrKind::VcardPlus => "VCard Plus",
      QrKind::Instagram => "Instagram",
      QrKind::Facebook => "Facebook",
      QrKind::Linkedin => "LinkedIn",
      QrKind::Whatsapp => "WhatsApp",
    }
  }
}

// ─── Per-kind fields ─────────────────────────────────────────────────────────

/// A `mailto:` target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailFields {
  #[serde(default)]
  pub address: Option<String>,
  #[serde(default)]
  pub subject: Option<String>,
  #[serde(default)]
  pub body:    Option<String>,
}

/// An `sms:` target with an optional prefilled message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsFields {
  #[serde(default)]
  pub phone:   Option<String>,
  #[serde(default)]
  pub message: Option<String>,
}

/// Authentication mode written into the `T:` field of a `WIFI:` string.
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
)]
pub enum WifiEncryption {
  #[default]
  #[serde(rename = "WPA")]
  #[strum(serialize = "WPA")]
  Wpa,
  #[serde(rename = "WEP")]
  #[strum(serialize = "WEP")]
  Wep,
  #[serde(rename = "nopass")]
  #[strum(serialize = "nopass")]
  Nopass,
}

/// Wi-Fi network credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiFields {
  #[serde(default)]
  pub ssid:       Option<String>,
  #[serde(default)]
  pub password:   Option<String>,
  #[serde(default)]
  pub encryption: WifiEncryption,
  /// `None` encodes as `H:false`.
  #[serde(default)]
  pub hidden:     Option<bool>,
}

/// Inline contact card (encoded as vCard 3.0 text).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
  #[serde(default)]
  pub first_name: Option<String>,
  #[serde(default)]
  pub last_name:  Option<String>,
  #[serde(default)]
  pub phone:      Option<String>,
  #[serde(default)]
  pub email:      Option<String>,
  #[serde(default)]
  pub company:    Option<String>,
  #[serde(default)]
  pub title:      Option<String>,
  #[serde(default)]
  pub website:    Option<String>,
}

/// The part of a hosted business card the encoder looks at. The full record
/// lives in [`crate::profile::ProfileInput`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCardFields {
  #[serde(default)]
  pub first_name: Option<String>,
  #[serde(default)]
  pub last_name:  Option<String>,
}

/// A handle on a social network (or a phone number for WhatsApp).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialFields {
  #[serde(default)]
  pub username: Option<String>,
}

// ─── Payload ─────────────────────────────────────────────────────────────────

/// The content of a QR code, tagged by `kind`.
///
/// ```json
/// {"kind": "wifi", "ssid": "Net", "password": "pw", "encryption": "WPA"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Payload {
  Url {
    #[serde(default)]
    url: Option<String>,
  },
  Text {
    #[serde(default)]
    text: Option<String>,
  },
  Email(EmailFields),
  Phone {
    #[serde(default)]
    number: Option<String>,
  },
  Sms(SmsFields),
  Wifi(WifiFields),
  Vcard(ContactFields),
  VcardPlus(BusinessCardFields),
  Instagram(SocialFields),
  Facebook(SocialFields),
  Linkedin(SocialFields),
  Whatsapp(SocialFields),
  /// Any tag this build does not know. Encodes to nothing.
  #[serde(other)]
  Unknown,
}

impl Default for Payload {
  fn default() -> Self { Payload::Url { url: None } }
}

impl Payload {
  /// The kind of this payload, or `None` for [`Payload::Unknown`].
  pub fn kind(&self) -> Option<QrKind> {
    Some(match self {
      Payload::Url { .. } => QrKind::Url,
      Payload::Text { .. } => QrKind::Text,
      Payload::Email(_) => QrKind::Email,
      Payload::Phone { .. } => QrKind::Phone,
      Payload::Sms(_) => QrKind::Sms,
      Payload::Wifi(_) => QrKind::Wifi,
      Payload::Vcard(_) => QrKind::Vcard,
      Payload::VcardPlus(_) => QrKind::VcardPlus,
      Payload::Instagram(_) => QrKind::Instagram,
      Payload::Facebook(_) => QrKind::Facebook,
      Payload::Linkedin(_) => QrKind::Linkedin,
      Payload::Whatsapp(_) => QrKind::Whatsapp,
      Payload::Unknown => return None,
    })
  }
}

/// Return the field's value unless it is missing or empty.
pub fn present(field: &Option<String>) -> Option<&str> {
  field.as_deref().filter(|s| !s.is_empty())
}
