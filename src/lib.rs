//! Folio - asset URL normalization and link health tracking for blog content.
//!
//! - [`uploads`]: turn any shape of uploaded-asset reference into one
//!   canonical absolute URL.
//! - [`links`]: probe internal links once, remember broken ones and the pages
//!   they appear on.
//! - [`content`]: pull links out of authored HTML and rewrite image sources.

pub mod cli;
pub mod config;
pub mod content;
pub mod links;
pub mod logger;
pub mod uploads;
