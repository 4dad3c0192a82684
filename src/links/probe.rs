//! Existence probes.
//!
//! The tracker only needs a yes/no answer per URL plus a status code for the
//! report, so the seam is a single async method. [`HttpProbe`] answers it
//! with a body-less `HEAD` request.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode, redirect};
use thiserror::Error;
use url::Url;

use crate::config::LinksConfig;

/// Why a probe did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProbeFailure {
    /// HTTP status, or 0 when no response was received.
    pub status_code: u16,
    /// Human-readable description.
    pub message: String,
}

impl ProbeFailure {
    /// Non-2xx response.
    pub fn http(status: StatusCode) -> Self {
        Self {
            status_code: status.as_u16(),
            message: format!("HTTP {status}"),
        }
    }

    /// No response at all (DNS, refused connection, timeout, bad URL).
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status_code: 0,
            message: message.into(),
        }
    }
}

/// Errors building an [`HttpProbe`].
#[derive(Debug, Error)]
pub enum ProbeSetupError {
    #[error("invalid site url `{0}`")]
    SiteUrl(String, #[source] url::ParseError),

    #[error("failed to build http client")]
    Client(#[from] reqwest::Error),
}

/// Reachability check for one URL.
///
/// Implementations decide what "reachable" means; the tracker only records
/// the outcome.
pub trait Probe: Send + Sync {
    fn probe(&self, url: &str) -> impl Future<Output = Result<(), ProbeFailure>> + Send;
}

/// `HEAD` probe against the site origin.
///
/// Site-relative URLs are resolved against `links.site_url`. Redirects are
/// followed; the final status decides. The client timeout is the only
/// timeout applied.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    site_url: Url,
}

impl HttpProbe {
    pub fn new(config: &LinksConfig) -> Result<Self, ProbeSetupError> {
        let site_url = Url::parse(config.site_url.trim())
            .map_err(|e| ProbeSetupError::SiteUrl(config.site_url.clone(), e))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .redirect(redirect::Policy::limited(5))
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, site_url })
    }

    /// Origin relative links are resolved against.
    pub fn site_url(&self) -> &Url {
        &self.site_url
    }

    /// Absolute URL a link is probed at.
    pub fn resolve(&self, url: &str) -> Result<Url, ProbeFailure> {
        self.site_url
            .join(url)
            .map_err(|e| ProbeFailure::transport(format!("invalid url: {e}")))
    }
}

impl Probe for HttpProbe {
    async fn probe(&self, url: &str) -> Result<(), ProbeFailure> {
        let target = self.resolve(url)?;

        let response = self
            .client
            .head(target)
            .send()
            .await
            .map_err(|e| ProbeFailure::transport(describe_transport_error(&e)))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ProbeFailure::http(status))
        }
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "connection failed"
    } else if err.is_redirect() {
        "too many redirects"
    } else {
        "request failed"
    };
    format!("{kind}: {err}")
}
