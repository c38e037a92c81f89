//! Draws QR codes with the style model from `qrstudio-core`.
//!
//! Two back-ends share one [`layout::Layout`]: PNG through the `image`
//! crate and SVG as plain text. Module matrices come from `qrcode`.
//!
//! ```no_run
//! use qrstudio_core::style::StyleOptions;
//! use qrstudio_render::render_png;
//!
//! let png = render_png("https://example.com", &StyleOptions::default(), None, 2)?;
//! # Ok::<(), qrstudio_render::Error>(())
//! ```

pub mod color;
mod error;
pub mod export;
pub mod layout;
pub mod logo;
mod matrix;
mod raster;
mod svg;

pub use color::contrast_color;
pub use error::{Error, Result};
pub use export::{Export, ExportFormat, PREVIEW_PLACEHOLDER, Resolution, export, render};
pub use logo::{Logo, LogoRef, sniff_image};
pub use raster::{render_image, render_png};
pub use svg::render_svg;
