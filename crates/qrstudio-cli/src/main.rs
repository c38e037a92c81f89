//! `qrstudio`: command-line front end for QR Studio.
//!
//! # Usage
//!
//! ```
//! qrstudio encode --kind wifi --ssid Home --password secret
//! qrstudio export --kind url --url https://example.com --template classic -o code.png
//! qrstudio publish --first-name Ada --last-name Lovelace --photo me.jpg --qr card.svg
//! qrstudio --url https://qr.example show abc12345
//! ```

mod client;
mod form;
mod profile;
mod style;

use std::{
  io::Write as _,
  path::{Path, PathBuf},
  process::ExitCode,
};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use form::PayloadArgs;
use profile::{ProfileArgs, image_content_type};
use qrstudio_core::{
  form::FormState, payload::QrKind, profile::Profile, template::templates,
};
use qrstudio_render::{
  ExportFormat, Logo, LogoRef, Resolution,
  export::{export_file_name, preview_value},
};
use serde::Deserialize;
use style::StyleArgs;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "qrstudio", version, about = "Build, style and export QR codes")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  /// Base URL of the QR Studio server (default: http://localhost:8080).
  #[arg(long, env = "QRSTUDIO_URL", global = true)]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Print the string a scanner would read.
  Encode {
    #[command(flatten)]
    payload: PayloadArgs,
    /// Print kind, value and validity as JSON.
    #[arg(long)]
    json:    bool,
  },
  /// Exit non-zero when the payload is not ready to export.
  Validate {
    #[command(flatten)]
    payload: PayloadArgs,
  },
  /// Render the code to a PNG or SVG file.
  Export {
    #[command(flatten)]
    payload: PayloadArgs,
    #[command(flatten)]
    style:   StyleArgs,
    #[command(flatten)]
    output:  OutputArgs,
    /// Render even when incomplete, using a placeholder value.
    #[arg(long)]
    preview: bool,
  },
  /// Save a hosted business card and print its link.
  Publish {
    #[command(flatten)]
    profile:    ProfileArgs,
    /// Also export a code pointing at the card to this file.
    #[arg(long, value_name = "FILE")]
    qr:         Option<PathBuf>,
    #[command(flatten)]
    style:      StyleArgs,
    /// standard, high or print (PNG only).
    #[arg(long, default_value_t)]
    resolution: Resolution,
  },
  /// Fetch a hosted business card.
  Show {
    slug: String,
    #[arg(long)]
    json: bool,
  },
  /// List the style templates.
  Templates,
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
  /// png or svg; inferred from `--output` when omitted.
  #[arg(short, long)]
  format:     Option<ExportFormat>,
  /// standard, high or print (PNG only).
  #[arg(short, long, default_value_t)]
  resolution: Resolution,
  /// Destination file, or `-` for stdout. Defaults to `qrcode-<millis>.<ext>`.
  #[arg(short, long, value_name = "FILE")]
  output:     Option<PathBuf>,
}

impl OutputArgs {
  fn format(&self) -> ExportFormat {
    self
      .format
      .or_else(|| self.output.as_deref().and_then(format_from_path))
      .unwrap_or_default()
  }
}

fn format_from_path(path: &Path) -> Option<ExportFormat> {
  path.extension()?.to_str()?.to_ascii_lowercase().parse().ok()
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:8080".to_string()),
  };
  let client = ApiClient::new(api_config)?;

  match args.command {
    Command::Encode { payload, json } => encode(payload, json),
    Command::Validate { payload } => validate(payload),
    Command::Export { payload, style, output, preview } => {
      let mut form = payload.into_form()?;
      style.apply(&mut form.style)?;
      export(&client, &form, &output, preview).await?;
      Ok(ExitCode::SUCCESS)
    }
    Command::Publish { profile, qr, style, resolution } => {
      publish(&client, profile, qr, style, resolution).await?;
      Ok(ExitCode::SUCCESS)
    }
    Command::Show { slug, json } => {
      show(&client, &slug, json).await?;
      Ok(ExitCode::SUCCESS)
    }
    Command::Templates => {
      for t in templates() {
        println!("{:<12} {:<14} {}", t.id, t.name, t.description);
      }
      Ok(ExitCode::SUCCESS)
    }
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

fn encode(payload: PayloadArgs, json: bool) -> Result<ExitCode> {
  let form = payload.into_form()?;
  let p = form.payload();
  let link = form.active_profile_link();
  let value = qrstudio_encode::encode(&p, link);

  if json {
    let out = serde_json::json!({
      "kind":  form.kind,
      "value": value,
      "valid": qrstudio_encode::is_valid(&p, link),
    });
    println!("{out}");
  } else {
    println!("{value}");
  }
  Ok(ExitCode::SUCCESS)
}

fn validate(payload: PayloadArgs) -> Result<ExitCode> {
  let form = payload.into_form()?;
  if qrstudio_encode::is_valid(&form.payload(), form.active_profile_link()) {
    println!("{}: ready", form.kind.label());
    Ok(ExitCode::SUCCESS)
  } else {
    println!("{}: incomplete", form.kind.label());
    Ok(ExitCode::FAILURE)
  }
}

async fn export(
  client: &ApiClient,
  form: &FormState,
  output: &OutputArgs,
  preview: bool,
) -> Result<()> {
  let logo = match &form.style.logo_url {
    Some(reference) => Some(load_logo(client, reference).await?),
    None => None,
  };
  let format = output.format();
  let millis = chrono::Utc::now().timestamp_millis();

  let (bytes, default_name) = if preview {
    let encoded = qrstudio_encode::encode(&form.payload(), form.active_profile_link());
    if encoded.is_empty() {
      tracing::warn!("payload is empty; rendering placeholder");
    }
    let value = preview_value(&encoded);
    let bytes = qrstudio_render::render(value, &form.style, logo.as_ref(), format, output.resolution)?;
    (bytes, export_file_name(format, millis))
  } else {
    let export = qrstudio_render::export(
      &form.payload(),
      form.active_profile_link(),
      &form.style,
      logo.as_ref(),
      format,
      output.resolution,
      millis,
    )?;
    (export.bytes, export.file_name)
  };

  let path = output.output.clone().unwrap_or_else(|| PathBuf::from(default_name));
  write_output(&path, &bytes)
}

async fn publish(
  client: &ApiClient,
  args: ProfileArgs,
  qr: Option<PathBuf>,
  style: StyleArgs,
  resolution: Resolution,
) -> Result<()> {
  let mut input = args.to_input()?;

  if let Some(path) = &args.photo {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
      .file_name()
      .and_then(|n| n.to_str())
      .unwrap_or("photo");
    let uploaded = client
      .upload_image(bytes, image_content_type(path), name)
      .await?;
    tracing::info!(name = %uploaded.name, "uploaded photo");
    input.photo_url = Some(uploaded.url);
  }

  let saved = client.upsert_profile(&input).await?;
  println!("{}", saved.url);

  if let Some(path) = qr {
    let mut form = FormState::new();
    form.select(QrKind::VcardPlus);
    form.drafts.vcard_plus = input.card_fields();
    form.profile_link = Some(saved.url);
    style.apply(&mut form.style)?;

    let output = OutputArgs {
      format: format_from_path(&path),
      resolution,
      output: Some(path),
    };
    export(client, &form, &output, false).await?;
  }
  Ok(())
}

async fn show(client: &ApiClient, slug: &str, json: bool) -> Result<()> {
  let Some(profile) = client.get_profile(slug).await? else {
    bail!("no business card with slug {slug:?}");
  };
  if json {
    println!("{}", serde_json::to_string_pretty(&profile)?);
  } else {
    print_profile(&profile);
  }
  Ok(())
}

fn print_profile(p: &Profile) {
  println!("{}", p.full_name());
  let rows = [
    ("Title", &p.job_title),
    ("Company", &p.company),
    ("Email", &p.email),
    ("Phone", &p.phone),
    ("Website", &p.website),
    ("Address", &p.address),
    ("Photo", &p.photo_url),
  ];
  for (label, value) in rows {
    if let Some(v) = value {
      println!("  {label:<8} {v}");
    }
  }
  println!("  {:<8} {}", "Theme", p.theme);
  println!("  {:<8} {}", "Updated", p.updated_at.to_rfc3339());
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Load a logo from a data URL, a remote URL, a local file or the hosted
/// image store, in that order.
async fn load_logo(client: &ApiClient, reference: &str) -> Result<Logo> {
  let remote = reference.starts_with("https://") || reference.starts_with("http://");
  let bytes = match LogoRef::parse(reference)? {
    LogoRef::Inline(bytes) => bytes,
    _ if remote => client.fetch_bytes(reference).await?,
    _ if Path::new(reference).is_file() => {
      std::fs::read(reference).with_context(|| format!("reading logo {reference}"))?
    }
    LogoRef::Hosted(name) => client.fetch_bytes(&client.image_url(name)).await?,
    LogoRef::External(_) => bail!("logo {reference:?} is neither a file nor a URL"),
  };
  Logo::from_bytes(&bytes).context("decoding logo")
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
  if path == Path::new("-") {
    std::io::stdout().write_all(bytes).context("writing to stdout")?;
    return Ok(());
  }
  std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
  eprintln!("wrote {}", path.display());
  Ok(())
}
