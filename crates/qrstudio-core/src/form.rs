//! Editable form state.
//!
//! The form keeps one draft per kind so that switching kinds never loses what
//! was typed, while [`FormState::payload`] only ever hands out the fields of
//! the active kind.

use serde::{Deserialize, Serialize};

use crate::{
  payload::{
    BusinessCardFields, ContactFields, EmailFields, Payload, QrKind, SmsFields,
    SocialFields, WifiFields,
  },
  style::StyleOptions,
};

/// Per-kind drafts. Social kinds keep separate handles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Drafts {
  pub url:        Option<String>,
  pub text:       Option<String>,
  pub email:      EmailFields,
  pub phone:      Option<String>,
  pub sms:        SmsFields,
  pub wifi:       WifiFields,
  pub vcard:      ContactFields,
  pub vcard_plus: BusinessCardFields,
  pub instagram:  SocialFields,
  pub facebook:   SocialFields,
  pub linkedin:   SocialFields,
  pub whatsapp:   SocialFields,
}

/// Everything a session edits: the active kind, all drafts, the style, and
/// the link handed back once a business card has been published.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
  pub kind:         QrKind,
  pub drafts:       Drafts,
  pub style:        StyleOptions,
  pub profile_link: Option<String>,
}

impl FormState {
  pub fn new() -> Self { Self::default() }

  /// Switch the active kind; drafts of other kinds are kept as they are.
  pub fn select(&mut self, kind: QrKind) { self.kind = kind; }

  /// Build the payload for the active kind.
  pub fn payload(&self) -> Payload {
    let d = &self.drafts;
    match self.kind {
      QrKind::Url => Payload::Url { url: d.url.clone() },
      QrKind::Text => Payload::Text { text: d.text.clone() },
      QrKind::Email => Payload::Email(d.email.clone()),
      QrKind::Phone => Payload::Phone { number: d.phone.clone() },
      QrKind::Sms => Payload::Sms(d.sms.clone()),
      QrKind::Wifi => Payload::Wifi(d.wifi.clone()),
      QrKind::Vcard => Payload::Vcard(d.vcard.clone()),
      QrKind::VcardPlus => Payload::VcardPlus(d.vcard_plus.clone()),
      QrKind::Instagram => Payload::Instagram(d.instagram.clone()),
      QrKind::Facebook => Payload::Facebook(d.facebook.clone()),
      QrKind::Linkedin => Payload::Linkedin(d.linkedin.clone()),
      QrKind::Whatsapp => Payload::Whatsapp(d.whatsapp.clone()),
    }
  }

  /// The profile link, but only while the business-card kind is active.
  pub fn active_profile_link(&self) -> Option<&str> {
    match self.kind {
      QrKind::VcardPlus => self.profile_link.as_deref(),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn switching_kind_keeps_other_drafts() {
    let mut form = FormState::new();
    form.drafts.url = Some("https://example.org".into());
    form.select(QrKind::Text);
    form.drafts.text = Some("hello".into());

    assert_eq!(form.payload(), Payload::Text { text: Some("hello".into()) });

    form.select(QrKind::Url);
    assert_eq!(
      form.payload(),
      Payload::Url { url: Some("https://example.org".into()) }
    );
  }

  #[test]
  fn stale_fields_do_not_leak_into_payload() {
    let mut form = FormState::new();
    form.drafts.instagram.username = Some("alice".into());
    form.select(QrKind::Facebook);
    assert_eq!(form.payload(), Payload::Facebook(SocialFields::default()));
  }

  #[test]
  fn profile_link_only_applies_to_business_card() {
    let mut form = FormState::new();
    form.profile_link = Some("https://qr.example/p/abc".into());
    assert_eq!(form.active_profile_link(), None);
    form.select(QrKind::VcardPlus);
    assert_eq!(form.active_profile_link(), Some("https://qr.example/p/abc"));
  }
}
