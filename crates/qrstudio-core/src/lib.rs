//! Core types and trait definitions for QR Studio.
//!
//! This crate is deliberately free of HTTP, rendering and database
//! dependencies. It holds the payload model every other crate encodes, the
//! style model the renderer consumes, and the store abstraction behind the
//! hosted business cards.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod form;
pub mod markup;
pub mod payload;
pub mod profile;
pub mod slug;
pub mod store;
pub mod style;
pub mod template;

pub use error::{Error, Result};
