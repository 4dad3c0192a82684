//! Broken link records and their report.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use owo_colors::Style;
use serde::{Deserialize, Serialize};

use super::ProbeFailure;
use crate::logger::paint;

/// One broken URL and every page it was seen on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenLink {
    pub url: String,
    /// HTTP status, 0 for transport failures.
    pub status_code: u16,
    pub message: String,
    /// Distinct pages, in the order they were reported.
    pub found_on: Vec<String>,
    /// First detection. Later sightings never move it.
    pub detected_at: DateTime<Utc>,
}

impl BrokenLink {
    pub fn new(url: impl Into<String>, failure: ProbeFailure, found_on: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_code: failure.status_code,
            message: failure.message,
            found_on: vec![found_on.into()],
            detected_at: Utc::now(),
        }
    }

    /// Record another page. Returns false if the page was already listed.
    pub fn add_found_on(&mut self, page: &str) -> bool {
        if self.found_on.iter().any(|p| p == page) {
            return false;
        }
        self.found_on.push(page.to_string());
        true
    }

    /// No HTTP response was received.
    #[inline]
    pub fn is_transport_failure(&self) -> bool {
        self.status_code == 0
    }
}

/// Snapshot of broken links for display or export.
#[derive(Debug, Default, Clone, Serialize)]
pub struct LinkReport {
    pub links: Vec<BrokenLink>,
}

impl LinkReport {
    pub fn new(links: Vec<BrokenLink>) -> Self {
        Self { links }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Broken links grouped by the page they appear on.
    ///
    /// A link found on several pages is listed under each of them.
    pub fn by_page(&self) -> BTreeMap<&str, Vec<&BrokenLink>> {
        let mut pages: BTreeMap<&str, Vec<&BrokenLink>> = BTreeMap::new();
        for link in &self.links {
            for page in &link.found_on {
                pages.entry(page.as_str()).or_default().push(link);
            }
        }
        pages
    }

    /// Pretty JSON array of the broken links.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.links)
    }

    /// Print grouped by page to stderr.
    pub fn print(&self) {
        if self.is_empty() {
            return;
        }
        eprintln!();

        let pages = self.by_page();
        let page_count = pages.len();
        let link_count = self.len();

        eprintln!(
            "{} {}",
            paint("broken links", Style::new().red().bold()),
            paint(
                format!(
                    "({page_count} page{}, {link_count} url{})",
                    plural_s(page_count),
                    plural_s(link_count)
                ),
                Style::new().dimmed()
            )
        );

        for (page, links) in pages {
            eprintln!(
                "{}{}{}",
                paint("[", Style::new().dimmed()),
                paint(page, Style::new().cyan()),
                paint("]", Style::new().dimmed())
            );
            for link in links {
                let status = if link.is_transport_failure() {
                    "---".to_string()
                } else {
                    link.status_code.to_string()
                };
                eprintln!(
                    "{} {} {} {}",
                    paint("→", Style::new().red()),
                    paint(status, Style::new().yellow()),
                    link.url,
                    paint(&link.message, Style::new().dimmed())
                );
            }
        }
    }
}

impl fmt::Display for LinkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.len();
        if total == 0 {
            write!(f, "{}", paint("no broken links", Style::new().green()))
        } else {
            write!(
                f,
                "{} {} {}",
                paint("found", Style::new().dimmed()),
                paint(total, Style::new().red().bold()),
                paint(
                    format!("broken link{}", plural_s(total)),
                    Style::new().dimmed()
                )
            )
        }
    }
}

#[inline]
const fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broken(url: &str, page: &str) -> BrokenLink {
        BrokenLink::new(
            url,
            ProbeFailure {
                status_code: 404,
                message: "HTTP 404 Not Found".into(),
            },
            page,
        )
    }

    #[test]
    fn test_add_found_on_is_distinct() {
        let mut link = broken("/blog/missing-post", "/index");
        assert!(link.add_found_on("/archive"));
        assert!(!link.add_found_on("/index"));
        assert!(!link.add_found_on("/archive"));
        assert_eq!(link.found_on, vec!["/index", "/archive"]);
    }

    #[test]
    fn test_serialize_camel_case() {
        let link = broken("/gone", "/index");
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["url"], "/gone");
        assert_eq!(json["statusCode"], 404);
        assert_eq!(json["foundOn"], serde_json::json!(["/index"]));
        assert!(json["detectedAt"].is_string());
    }

    #[test]
    fn test_by_page_groups_shared_links() {
        let mut shared = broken("/gone", "/a");
        shared.add_found_on("/b");
        let report = LinkReport::new(vec![shared, broken("/other", "/b")]);

        let pages = report.by_page();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages["/a"].len(), 1);
        assert_eq!(pages["/b"].len(), 2);
    }

    #[test]
    fn test_display() {
        owo_colors::set_override(false);
        assert_eq!(LinkReport::default().to_string(), "no broken links");
        let report = LinkReport::new(vec![broken("/x", "/"), broken("/y", "/")]);
        assert_eq!(report.to_string(), "found 2 broken links");
    }

    #[test]
    fn test_to_json_is_array() {
        let report = LinkReport::new(vec![broken("/x", "/")]);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
    }
}
