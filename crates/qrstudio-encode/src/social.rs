//! Deep links to social profiles.

/// Networks a handle can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialNetwork {
  Instagram,
  Facebook,
  Linkedin,
  Twitter,
  Youtube,
  Github,
  Tiktok,
  Whatsapp,
}

impl SocialNetwork {
  /// URL prefix the handle is appended to.
  pub fn prefix(self) -> &'static str {
    match self {
      SocialNetwork::Instagram => "https://instagram.com/",
      SocialNetwork::Facebook => "https://facebook.com/",
      SocialNetwork::Linkedin => "https://linkedin.com/in/",
      SocialNetwork::Twitter => "https://x.com/",
      SocialNetwork::Youtube => "https://youtube.com/@",
      SocialNetwork::Github => "https://github.com/",
      SocialNetwork::Tiktok => "https://tiktok.com/@",
      SocialNetwork::Whatsapp => "https://wa.me/",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      SocialNetwork::Instagram => "Instagram",
      SocialNetwork::Facebook => "Facebook",
      SocialNetwork::Linkedin => "LinkedIn",
      SocialNetwork::Twitter => "X (Twitter)",
      SocialNetwork::Youtube => "YouTube",
      SocialNetwork::Github => "GitHub",
      SocialNetwork::Tiktok => "TikTok",
      SocialNetwork::Whatsapp => "WhatsApp",
    }
  }
}

/// Keep only ASCII digits (WhatsApp wants a bare international number).
pub fn digits_only(s: &str) -> String {
  s.chars().filter(char::is_ascii_digit).collect()
}

/// Link used inside a code: the handle is appended verbatim, except for
/// WhatsApp where every non-digit is stripped.
pub fn code_link(network: SocialNetwork, username: &str) -> String {
  match network {
    SocialNetwork::Whatsapp => format!("{}{}", network.prefix(), digits_only(username)),
    _ => format!("{}{username}", network.prefix()),
  }
}

/// Link shown on a profile page: like [`code_link`], but the first `@` of a
/// handle is dropped so `@alice` and `alice` land on the same page.
pub fn page_link(network: SocialNetwork, handle: &str) -> String {
  match network {
    SocialNetwork::Whatsapp => code_link(network, handle),
    _ => format!("{}{}", network.prefix(), handle.replacen('@', "", 1)),
  }
}
