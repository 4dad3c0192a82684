//! Uploaded asset URL normalization.
//!
//! Asset references come from rich-text content, API payloads and legacy
//! records in many shapes. [`UploadResolver`] turns any of them into one
//! absolute URL under the configured uploads base URL.
//!
//! ```ignore
//! let resolver = UploadResolver::from_base_url("http://cdn.example.com/uploads");
//! assert_eq!(
//!     resolver.normalize_str("../../uploads/a.png"),
//!     "http://cdn.example.com/uploads/a.png"
//! );
//! ```

mod asset;
mod resolve;

pub use asset::AssetPath;
pub use resolve::UploadResolver;

use crate::config::cfg;

/// Normalize against the current global config.
///
/// Reads the config on every call, so a replaced config takes effect
/// immediately.
pub fn normalize_upload_url(path: Option<&AssetPath>) -> String {
    UploadResolver::new(&cfg().uploads).normalize(path)
}

/// [`normalize_upload_url`] with a caller-supplied fallback for absent input.
pub fn normalize_upload_url_or(path: Option<&AssetPath>, fallback: &str) -> String {
    UploadResolver::new(&cfg().uploads).normalize_or(path, fallback)
}
