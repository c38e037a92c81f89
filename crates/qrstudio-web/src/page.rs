//! HTML for the public profile page and its not-found variant.

use std::fmt::Write as _;

use qrstudio_core::{
  markup::escape,
  profile::{DEFAULT_PRIMARY_COLOR, Profile, Theme},
  style::is_hex_color,
};
use qrstudio_encode::social::{SocialNetwork, page_link};

/// Page colors of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
  /// CSS `background` value; may be a gradient.
  pub page:  &'static str,
  pub card:  &'static str,
  pub text:  &'static str,
  pub muted: &'static str,
}

pub fn palette(theme: Theme) -> Palette {
  // Every theme but minimal puts a translucent card on a colored page.
  let card = "rgba(255, 255, 255, 0.1)";
  let text = "#FFFFFF";
  let muted = "rgba(255, 255, 255, 0.8)";
  match theme {
    Theme::Modern => Palette {
      page: "linear-gradient(135deg, #3B82F6 0%, #9333EA 100%)",
      card,
      text,
      muted,
    },
    Theme::Classic => Palette { page: "#1E293B", card, text, muted },
    Theme::Gradient => Palette {
      page: "linear-gradient(135deg, #EC4899 0%, #EF4444 50%, #EAB308 100%)",
      card,
      text,
      muted,
    },
    Theme::Dark => Palette {
      page: "#18181B",
      card: "rgba(39, 39, 42, 0.8)",
      text,
      muted,
    },
    Theme::Minimal => Palette {
      page:  "#FFFFFF",
      card:  "#F9FAFB",
      text:  "#111827",
      muted: "#4B5563",
    },
  }
}

/// Give scheme-less websites an `https://` prefix; anything that is not
/// http(s) afterwards is dropped.
fn web_href(url: &str) -> Option<String> {
  let url = url.trim();
  if url.starts_with("https://") || url.starts_with("http://") {
    Some(url.to_owned())
  } else if url.contains(':') {
    None
  } else {
    Some(format!("https://{url}"))
  }
}

/// Photo sources are absolute http(s) URLs or same-origin paths.
fn photo_src(url: &str) -> Option<&str> {
  (url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/'))
    .then_some(url)
}

const STYLE: &str = "\
*{box-sizing:border-box}\
body{margin:0;min-height:100vh;font-family:system-ui,-apple-system,sans-serif;display:flex;justify-content:center;padding:32px 16px}\
.card{width:100%;max-width:420px;border-radius:24px;padding:32px 24px;box-shadow:0 10px 30px rgba(0,0,0,.08);text-align:center}\
.avatar{width:112px;height:112px;border-radius:50%;margin:0 auto 16px;object-fit:cover;display:flex;align-items:center;justify-content:center;font-size:40px;font-weight:700;color:#fff}\
h1{margin:0 0 4px;font-size:26px}\
.sub,.bio{margin:0 0 12px}\
ul{list-style:none;padding:0;margin:20px 0;text-align:left}\
li{padding:10px 0;border-bottom:1px solid rgba(127,127,127,.15)}\
a{color:inherit;text-decoration:none}\
.social{display:flex;flex-wrap:wrap;gap:8px;justify-content:center;margin:16px 0}\
.social a{padding:6px 12px;border-radius:999px;font-size:14px;border:1px solid rgba(127,127,127,.3)}\
.save{display:block;margin-top:20px;padding:14px;border-radius:14px;color:#fff;font-weight:600}\
footer{margin-top:24px;font-size:12px}";

fn document(title: &str, palette: Palette, body: &str) -> String {
  format!(
    "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
     <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
     <title>{title}</title><style>{STYLE}</style></head>\
     <body style=\"background:{page}\">{body}</body></html>",
    title = escape(title),
    page = palette.page,
  )
}

/// The public page for `profile`.
pub fn render_profile(profile: &Profile) -> String {
  let colors = palette(profile.theme);
  // Anything but `#RRGGBB` falls back to the default accent.
  let accent = if is_hex_color(&profile.primary_color) {
    profile.primary_color.as_str()
  } else {
    DEFAULT_PRIMARY_COLOR
  };
  let name = escape(&profile.full_name());
  let mut html = String::new();

  // `write!` into a String cannot fail.
  let _ = write!(
    html,
    "<main class=\"card\" style=\"background:{};color:{}\">",
    colors.card, colors.text
  );

  match profile.photo_url.as_deref().and_then(photo_src) {
    Some(src) => {
      let _ = write!(
        html,
        "<img class=\"avatar\" src=\"{}\" alt=\"{name}\">",
        escape(src)
      );
    }
    None => {
      let _ = write!(
        html,
        "<div class=\"avatar\" style=\"background:{accent}\">{}</div>",
        escape(&profile.initials())
      );
    }
  }

  let _ = write!(html, "<h1>{name}</h1>");

  let subtitle = [profile.job_title.as_deref(), profile.company.as_deref()]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" • ");
  if !subtitle.is_empty() {
    let _ = write!(
      html,
      "<p class=\"sub\" style=\"color:{}\">{}</p>",
      colors.muted,
      escape(&subtitle)
    );
  }
  if let Some(bio) = &profile.bio {
    let _ = write!(html, "<p class=\"bio\">{}</p>", escape(bio));
  }

  let mut rows = Vec::new();
  if let Some(email) = &profile.email {
    rows.push((format!("mailto:{email}"), "Email", email.as_str()));
  }
  if let Some(phone) = &profile.phone {
    rows.push((format!("tel:{phone}"), "Phone", phone.as_str()));
  }
  if let Some(site) = &profile.website
    && let Some(href) = web_href(site)
  {
    rows.push((href, "Website", site.as_str()));
  }
  if !rows.is_empty() || profile.address.is_some() {
    html.push_str("<ul>");
    for (href, label, text) in rows {
      let _ = write!(
        html,
        "<li><a href=\"{}\"><span style=\"color:{}\">{label}</span><br>{}</a></li>",
        escape(&href),
        colors.muted,
        escape(text)
      );
    }
    if let Some(address) = &profile.address {
      let _ = write!(
        html,
        "<li><span style=\"color:{}\">Address</span><br>{}</li>",
        colors.muted,
        escape(address)
      );
    }
    html.push_str("</ul>");
  }

  let socials = social_links(profile);
  if !socials.is_empty() {
    html.push_str("<nav class=\"social\">");
    for (network, href) in socials {
      let _ = write!(
        html,
        "<a href=\"{}\" rel=\"noopener\" target=\"_blank\">{}</a>",
        escape(&href),
        network.label()
      );
    }
    html.push_str("</nav>");
  }

  let _ = write!(
    html,
    "<a class=\"save\" style=\"background:{accent}\" href=\"/p/{}/contact.vcf\" download>Save contact</a>",
    escape(&profile.slug)
  );
  let _ = write!(
    html,
    "<footer style=\"color:{}\">Made with QR Studio</footer></main>",
    colors.muted
  );

  document(&profile.full_name(), colors, &html)
}

/// Social links in display order, skipping handles that are not set.
pub fn social_links(profile: &Profile) -> Vec<(SocialNetwork, String)> {
  [
    (SocialNetwork::Instagram, &profile.instagram),
    (SocialNetwork::Facebook, &profile.facebook),
    (SocialNetwork::Linkedin, &profile.linkedin),
    (SocialNetwork::Twitter, &profile.twitter),
    (SocialNetwork::Youtube, &profile.youtube),
    (SocialNetwork::Github, &profile.github),
    (SocialNetwork::Tiktok, &profile.tiktok),
    (SocialNetwork::Whatsapp, &profile.whatsapp),
  ]
  .into_iter()
  .filter_map(|(network, handle)| {
    handle
      .as_deref()
      .filter(|h| !h.is_empty())
      .map(|h| (network, page_link(network, h)))
  })
  .collect()
}

/// Shown for unknown slugs.
pub fn render_not_found() -> String {
  let colors = palette(Theme::Modern);
  let body = format!(
    "<main class=\"card\" style=\"background:{};color:{}\">\
     <h1>Profile not found</h1>\
     <p class=\"sub\" style=\"color:{}\">This business card does not exist or is no longer available.</p>\
     </main>",
    colors.card, colors.text, colors.muted
  );
  document("Profile not found", colors, &body)
}
