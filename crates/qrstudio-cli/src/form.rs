//! Payload flags and their mapping onto the editable form.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use qrstudio_core::{
  form::FormState,
  payload::{QrKind, WifiEncryption},
};

/// Flags describing what the code encodes.
///
/// A saved form (`--form`) is loaded first; `--kind` and the field flags
/// then overwrite the drafts of the active kind only.
#[derive(Args, Debug, Default, Clone)]
pub struct PayloadArgs {
  /// JSON file holding a saved form (kind, drafts, style, profile link).
  #[arg(long, value_name = "FILE")]
  pub form: Option<PathBuf>,

  /// Kind of code: url, text, email, phone, sms, wifi, vcard, vcard-plus,
  /// instagram, facebook, linkedin, whatsapp.
  #[arg(short, long)]
  pub kind: Option<QrKind>,

  #[arg(long)]
  pub url: Option<String>,
  #[arg(long)]
  pub text: Option<String>,
  /// Email address (email and vcard kinds).
  #[arg(long)]
  pub email: Option<String>,
  #[arg(long)]
  pub subject: Option<String>,
  #[arg(long)]
  pub body: Option<String>,
  /// Phone number (phone, sms and vcard kinds).
  #[arg(long)]
  pub phone: Option<String>,
  /// SMS message.
  #[arg(long)]
  pub message: Option<String>,
  #[arg(long)]
  pub ssid: Option<String>,
  #[arg(long)]
  pub password: Option<String>,
  /// WPA, WEP or nopass.
  #[arg(long)]
  pub encryption: Option<WifiEncryption>,
  /// Hidden network; `--hidden false` clears a saved flag.
  #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
  pub hidden: Option<bool>,
  #[arg(long)]
  pub first_name: Option<String>,
  #[arg(long)]
  pub last_name: Option<String>,
  #[arg(long)]
  pub company: Option<String>,
  #[arg(long)]
  pub title: Option<String>,
  #[arg(long)]
  pub website: Option<String>,
  /// Handle or number for the social kinds.
  #[arg(long)]
  pub username: Option<String>,

  /// Link of a published business card (vcard-plus kind).
  #[arg(long, value_name = "URL")]
  pub profile_link: Option<String>,
}

impl PayloadArgs {
  /// Build the form: saved file first, then flags.
  pub fn into_form(self) -> Result<FormState> {
    let mut form = match &self.form {
      Some(path) => {
        let raw = std::fs::read_to_string(path)
          .with_context(|| format!("reading form file {}", path.display()))?;
        serde_json::from_str(&raw).context("parsing form file")?
      }
      None => FormState::new(),
    };
    self.apply(&mut form);
    Ok(form)
  }

  /// Overwrite the active kind's draft with whatever flags were given.
  pub fn apply(self, form: &mut FormState) {
    if let Some(kind) = self.kind {
      form.select(kind);
    }
    if self.profile_link.is_some() {
      form.profile_link = self.profile_link;
    }

    let d = &mut form.drafts;
    match form.kind {
      QrKind::Url => set(&mut d.url, self.url),
      QrKind::Text => set(&mut d.text, self.text),
      QrKind::Email => {
        set(&mut d.email.address, self.email);
        set(&mut d.email.subject, self.subject);
        set(&mut d.email.body, self.body);
      }
      QrKind::Phone => set(&mut d.phone, self.phone),
      QrKind::Sms => {
        set(&mut d.sms.phone, self.phone);
        set(&mut d.sms.message, self.message);
      }
      QrKind::Wifi => {
        set(&mut d.wifi.ssid, self.ssid);
        set(&mut d.wifi.password, self.password);
        if let Some(encryption) = self.encryption {
          d.wifi.encryption = encryption;
        }
        if let Some(hidden) = self.hidden {
          d.wifi.hidden = Some(hidden);
        }
      }
      QrKind::Vcard => {
        let c = &mut d.vcard;
        set(&mut c.first_name, self.first_name);
        set(&mut c.last_name, self.last_name);
        set(&mut c.phone, self.phone);
        set(&mut c.email, self.email);
        set(&mut c.company, self.company);
        set(&mut c.title, self.title);
        set(&mut c.website, self.website);
      }
      QrKind::VcardPlus => {
        set(&mut d.vcard_plus.first_name, self.first_name);
        set(&mut d.vcard_plus.last_name, self.last_name);
      }
      QrKind::Instagram => set(&mut d.instagram.username, self.username),
      QrKind::Facebook => set(&mut d.facebook.username, self.username),
      QrKind::Linkedin => set(&mut d.linkedin.username, self.username),
      QrKind::Whatsapp => set(&mut d.whatsapp.username, self.username),
    }
  }
}

fn set(field: &mut Option<String>, value: Option<String>) {
  if value.is_some() {
    *field = value;
  }
}
