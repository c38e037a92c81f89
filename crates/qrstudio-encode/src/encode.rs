//! Per-kind payload encoding.

use qrstudio_core::payload::{
  EmailFields, Payload, SmsFields, SocialFields, WifiFields, present,
};

use crate::{
  social::{SocialNetwork, code_link},
  vcard::ContactCard,
};

pub(crate) fn encode(payload: &Payload, profile_link: Option<&str>) -> String {
  match payload {
    Payload::Url { url } => present(url).unwrap_or_default().to_owned(),
    Payload::Text { text } => present(text).unwrap_or_default().to_owned(),
    Payload::Email(f) => mailto(f),
    Payload::Phone { number } => {
      present(number).map(|n| format!("tel:{n}")).unwrap_or_default()
    }
    Payload::Sms(f) => sms(f),
    Payload::Wifi(f) => wifi(f),
    Payload::Vcard(f) => ContactCard::from_fields(f).to_vcard(),
    Payload::VcardPlus(_) => profile_link.unwrap_or_default().to_owned(),
    Payload::Instagram(f) => social(SocialNetwork::Instagram, f),
    Payload::Facebook(f) => social(SocialNetwork::Facebook, f),
    Payload::Linkedin(f) => social(SocialNetwork::Linkedin, f),
    Payload::Whatsapp(f) => social(SocialNetwork::Whatsapp, f),
    Payload::Unknown => String::new(),
  }
}

/// Percent-encode a query value (RFC 3986 unreserved set passes through).
fn pct(s: &str) -> String { urlencoding::encode(s).into_owned() }

fn mailto(f: &EmailFields) -> String {
  let Some(address) = present(&f.address) else {
    return String::new();
  };

  let params: Vec<String> = [("subject", &f.subject), ("body", &f.body)]
    .into_iter()
    .filter_map(|(key, value)| present(value).map(|v| format!("{key}={}", pct(v))))
    .collect();

  if params.is_empty() {
    format!("mailto:{address}")
  } else {
    format!("mailto:{address}?{}", params.join("&"))
  }
}

fn sms(f: &SmsFields) -> String {
  let Some(phone) = present(&f.phone) else {
    return String::new();
  };
  match present(&f.message) {
    Some(message) => format!("sms:{phone}?body={}", pct(message)),
    None => format!("sms:{phone}"),
  }
}

// Field order and the trailing `;;` are what scanners expect; do not reorder.
fn wifi(f: &WifiFields) -> String {
  let Some(ssid) = present(&f.ssid) else {
    return String::new();
  };
  format!(
    "WIFI:T:{};S:{ssid};P:{};H:{};;",
    f.encryption,
    f.password.as_deref().unwrap_or_default(),
    f.hidden.unwrap_or(false),
  )
}

fn social(network: SocialNetwork, f: &SocialFields) -> String {
  present(&f.username)
    .map(|u| code_link(network, u))
    .unwrap_or_default()
}
