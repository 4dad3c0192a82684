//! In-memory link health tracker.
//!
//! # State per URL
//!
//! ```text
//! unchecked ──probe settles──► verified-ok
//!     ▲                  └───► broken (BrokenLink recorded)
//!     └── reset / clear_checked_urls
//! ```
//!
//! A URL joins the checked set only once its probe settles, so a hung probe
//! leaves it unchecked. Results that settle after a `reset` or
//! `clear_checked_urls` issued mid-probe are dropped via a generation counter.
//!
//! There is no retry or backoff: one failed probe marks the URL broken until
//! the state is cleared.

use std::sync::atomic::{AtomicBool, Ordering};

use futures::stream::{self, StreamExt};
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use super::{BrokenLink, HttpProbe, LinkKind, LinkReport, Probe, ProbeSetupError};
use crate::config::LinksConfig;
use crate::{debug, log};

/// Partition of a batch check, each side in input order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCheckOutcome {
    pub valid_urls: Vec<String>,
    pub broken_urls: Vec<String>,
}

impl LinkCheckOutcome {
    pub fn has_broken(&self) -> bool {
        !self.broken_urls.is_empty()
    }
}

#[derive(Debug, Default)]
struct TrackerState {
    checked: FxHashSet<String>,
    broken: FxHashMap<String, BrokenLink>,
    generation: u64,
}

/// Probes internal links and remembers which ones are broken.
///
/// Construct once at startup and share behind an `Arc`. Disabled by default;
/// while disabled every check answers `true` without touching the network.
#[derive(Debug)]
pub struct LinkTracker<P = HttpProbe> {
    probe: P,
    enabled: AtomicBool,
    concurrency: usize,
    state: Mutex<TrackerState>,
}

/// Default bound on in-flight probes for [`LinkTracker::check_urls`].
pub const DEFAULT_CONCURRENCY: usize = 16;

impl LinkTracker<HttpProbe> {
    /// HTTP-backed tracker with `enable`, `concurrency` and the probe's
    /// origin and timeout taken from config.
    pub fn from_config(config: &LinksConfig) -> Result<Self, ProbeSetupError> {
        let tracker = Self::new(HttpProbe::new(config)?).with_concurrency(config.concurrency);
        tracker.set_enabled(config.enable);
        Ok(tracker)
    }
}

impl<P: Probe> LinkTracker<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            enabled: AtomicBool::new(false),
            concurrency: DEFAULT_CONCURRENCY,
            state: Mutex::new(TrackerState::default()),
        }
    }

    /// Bound in-flight probes for batch checks. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Check one URL seen on `found_on`. Returns `false` only for broken links.
    ///
    /// Each URL is probed at most once until the state is cleared; repeat
    /// checks of a broken URL add `found_on` to its report. Surrounding
    /// whitespace is ignored and blank URLs are never probed.
    pub async fn check_url(&self, url: &str, found_on: &str) -> bool {
        if !self.is_enabled() {
            return true;
        }

        let url = url.trim();
        if url.is_empty() {
            return true;
        }

        let generation = {
            let mut state = self.state.lock();
            if state.checked.contains(url) {
                return match state.broken.get_mut(url) {
                    Some(link) => {
                        link.add_found_on(found_on);
                        false
                    }
                    None => true,
                };
            }
            state.generation
        };

        let kind = LinkKind::parse(url);
        if !kind.is_probed() {
            debug!("links"; "skip {:?}", kind);
            return true;
        }

        debug!("links"; "probing {}", url);
        let result = self.probe.probe(url).await;

        let newly_broken = {
            let mut state = self.state.lock();
            if state.generation != generation {
                debug!("links"; "discarding stale result for {}", url);
                return result.is_ok();
            }
            state.checked.insert(url.to_string());

            let Err(failure) = result else {
                return true;
            };
            match state.broken.get_mut(url) {
                Some(link) => {
                    link.add_found_on(found_on);
                    None
                }
                None => {
                    let link = BrokenLink::new(url, failure, found_on);
                    state.broken.insert(url.to_string(), link.clone());
                    Some(link)
                }
            }
        };

        if let Some(link) = newly_broken {
            log!("links"; "broken {} ({}) on {}", link.url, link.message, found_on);
        }
        false
    }

    /// Check every URL concurrently and partition them by result.
    pub async fn check_urls<I, S>(&self, urls: I, found_on: &str) -> LinkCheckOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls: Vec<String> = urls.into_iter().map(|u| u.as_ref().to_string()).collect();

        if !self.is_enabled() {
            return LinkCheckOutcome {
                valid_urls: urls,
                broken_urls: Vec::new(),
            };
        }

        let results: Vec<bool> = stream::iter(&urls)
            .map(|url| self.check_url(url, found_on))
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut outcome = LinkCheckOutcome::default();
        for (url, ok) in urls.into_iter().zip(results) {
            if ok {
                outcome.valid_urls.push(url);
            } else {
                outcome.broken_urls.push(url);
            }
        }
        outcome
    }

    /// All recorded broken links, oldest detection first (ties by URL).
    pub fn broken_links(&self) -> Vec<BrokenLink> {
        let mut links: Vec<BrokenLink> = self.state.lock().broken.values().cloned().collect();
        links.sort_by(|a, b| {
            a.detected_at
                .cmp(&b.detected_at)
                .then_with(|| a.url.cmp(&b.url))
        });
        links
    }

    pub fn report(&self) -> LinkReport {
        LinkReport::new(self.broken_links())
    }

    /// Number of URLs whose probe has settled.
    pub fn checked_count(&self) -> usize {
        self.state.lock().checked.len()
    }

    /// Forget broken reports. Checked URLs stay checked and now answer `true`.
    pub fn clear_broken_links(&self) {
        self.state.lock().broken.clear();
    }

    /// Make every URL eligible for probing again. Reports are kept.
    pub fn clear_checked_urls(&self) {
        let mut state = self.state.lock();
        state.checked.clear();
        state.generation += 1;
    }

    /// Clear checked URLs and broken reports.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.checked.clear();
        state.broken.clear();
        state.generation += 1;
    }
}
