//! vCard 3.0 text for contact-card codes and "save contact" downloads.
//!
//! Output is deliberately minimal: LF line endings, no folding, no escaping,
//! no trailing newline. Scanners read it as-is.

use qrstudio_core::{
  payload::{ContactFields, present},
  profile::Profile,
};

/// The properties a generated card can carry, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactCard<'a> {
  pub first_name: Option<&'a str>,
  pub last_name:  Option<&'a str>,
  pub phone:      Option<&'a str>,
  pub email:      Option<&'a str>,
  pub org:        Option<&'a str>,
  pub title:      Option<&'a str>,
  pub url:        Option<&'a str>,
  pub address:    Option<&'a str>,
  pub photo_url:  Option<&'a str>,
}

impl<'a> ContactCard<'a> {
  /// Card for the inline `vcard` kind.
  pub fn from_fields(f: &'a ContactFields) -> Self {
    Self {
      first_name: present(&f.first_name),
      last_name:  present(&f.last_name),
      phone:      present(&f.phone),
      email:      present(&f.email),
      org:        present(&f.company),
      title:      present(&f.title),
      url:        present(&f.website),
      address:    None,
      photo_url:  None,
    }
  }

  /// Card for a stored profile; adds address and photo.
  pub fn from_profile(p: &'a Profile) -> Self {
    Self {
      first_name: Some(p.first_name.as_str()).filter(|s| !s.is_empty()),
      last_name:  Some(p.last_name.as_str()).filter(|s| !s.is_empty()),
      phone:      present(&p.phone),
      email:      present(&p.email),
      org:        present(&p.company),
      title:      present(&p.job_title),
      url:        present(&p.website),
      address:    present(&p.address),
      photo_url:  present(&p.photo_url),
    }
  }

  /// `true` when neither name is set; such a card is never emitted.
  pub fn is_anonymous(&self) -> bool {
    self.first_name.is_none() && self.last_name.is_none()
  }

  /// The card's lines, `BEGIN:VCARD` through `END:VCARD`.
  pub fn lines(&self) -> Vec<String> {
    let first = self.first_name.unwrap_or_default();
    let last = self.last_name.unwrap_or_default();
    let full = [self.first_name, self.last_name]
      .into_iter()
      .flatten()
      .collect::<Vec<_>>()
      .join(" ");

    let mut lines = vec![
      "BEGIN:VCARD".to_owned(),
      "VERSION:3.0".to_owned(),
      format!("N:{last};{first};;;"),
      format!("FN:{full}"),
    ];

    let optional = [
      ("TEL", self.phone),
      ("EMAIL", self.email),
      ("ORG", self.org),
      ("TITLE", self.title),
      ("URL", self.url),
    ];
    for (name, value) in optional {
      if let Some(v) = value {
        lines.push(format!("{name}:{v}"));
      }
    }
    if let Some(addr) = self.address {
      lines.push(format!("ADR:;;{addr};;;;"));
    }
    if let Some(photo) = self.photo_url {
      lines.push(format!("PHOTO;TYPE=URI:{photo}"));
    }

    lines.push("END:VCARD".to_owned());
    lines
  }

  /// The full card text, or an empty string for an anonymous card.
  pub fn to_vcard(&self) -> String {
    if self.is_anonymous() {
      return String::new();
    }
    self.lines().join("\n")
  }
}

/// Download file name for a profile's card: `<first>_<last>.vcf`.
pub fn vcard_file_name(p: &Profile) -> String {
  format!("{}_{}.vcf", p.first_name, p.last_name)
}
