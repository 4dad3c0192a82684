//! `[uploads]` section configuration.
//!
//! Where uploaded assets are served from and what to show when an asset
//! reference is unusable.
//!
//! # Example
//!
//! ```toml
//! [uploads]
//! base_url = "https://cdn.example.com/uploads"   # Uploads base URL
//! default_image = "/images/placeholder.png"      # Fallback for invalid asset input
//! ```

use serde::{Deserialize, Serialize};

use crate::config::types::FieldPath;
use crate::config::util::validate_http_url;
use crate::config::ConfigDiagnostics;

/// Uploads base URL and fallback image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadsConfig {
    /// Absolute URL of the uploads root, `<scheme>://<host>[:<port>]/uploads`.
    pub base_url: String,

    /// Returned verbatim when the asset input has an unusable shape.
    pub default_image: String,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/uploads".into(),
            default_image: String::new(),
        }
    }
}

impl UploadsConfig {
    pub const BASE_URL: FieldPath = FieldPath::new("uploads.base_url");
    pub const DEFAULT_IMAGE: FieldPath = FieldPath::new("uploads.default_image");

    /// Validate uploads configuration.
    ///
    /// # Checks
    /// - `base_url` must be an http(s) URL with a host
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_http_url(Self::BASE_URL, &self.base_url, diag);

        if !self.base_url.trim_end_matches('/').ends_with("/uploads") {
            diag.hint(
                Self::BASE_URL,
                "base url does not end with `/uploads`, asset urls will be served from its origin",
            );
        }
    }
}
