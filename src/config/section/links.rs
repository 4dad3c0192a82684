//! `[links]` section configuration.
//!
//! Settings for the link health tracker.
//!
//! # Example
//!
//! ```toml
//! [links]
//! enable = true                        # Opt in to probing
//! site_url = "http://localhost:3000"   # Origin internal links are probed against
//! timeout = 10                         # HTTP request timeout in seconds
//! concurrency = 16                     # Max concurrent probes per batch
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;
use crate::config::types::FieldPath;
use crate::config::util::validate_http_url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Initial enabled state of the tracker. Disabled trackers never probe.
    pub enable: bool,

    /// Origin that site-relative links are resolved against.
    pub site_url: String,

    /// Timeout for HTTP requests in seconds.
    pub timeout: u64,

    /// Maximum number of probes in flight during a batch check.
    pub concurrency: usize,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            enable: false,
            site_url: "http://localhost:3000".into(),
            timeout: 10,
            concurrency: 16,
        }
    }
}

impl LinksConfig {
    pub const SITE_URL: FieldPath = FieldPath::new("links.site_url");
    pub const TIMEOUT: FieldPath = FieldPath::new("links.timeout");
    pub const CONCURRENCY: FieldPath = FieldPath::new("links.concurrency");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_http_url(Self::SITE_URL, &self.site_url, diag);

        if self.timeout == 0 {
            diag.error_with_hint(
                Self::TIMEOUT,
                "timeout must be greater than 0",
                "use a value in seconds, e.g.: 10",
            );
        }

        if self.concurrency == 0 {
            diag.error_with_hint(
                Self::CONCURRENCY,
                "concurrency must be greater than 0",
                "e.g.: 16",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_links_defaults() {
        let config = test_parse_config("");
        assert!(!config.links.enable);
        assert_eq!(config.links.site_url, "http://localhost:3000");
        assert_eq!(config.links.timeout, 10);
        assert_eq!(config.links.concurrency, 16);
    }

    #[test]
    fn test_links_custom() {
        let config = test_parse_config(
            r#"[links]
enable = true
site_url = "https://blog.example.com"
timeout = 30
concurrency = 4"#,
        );
        assert!(config.links.enable);
        assert_eq!(config.links.site_url, "https://blog.example.com");
        assert_eq!(config.links.timeout, 30);
        assert_eq!(config.links.concurrency, 4);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let links = LinksConfig {
            site_url: "ftp://example.com".into(),
            timeout: 0,
            concurrency: 0,
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        links.validate(&mut diag);
        assert_eq!(diag.len(), 3);
    }
}
