//! `folio scan`: check every page link in HTML files.

use std::fs;

use anyhow::{Context, Result};
use futures::future::join_all;

use super::ScanArgs;
use super::common::{finish_report, plural_count};
use crate::content::page_links;
use crate::links::{LinkTracker, Probe};
use crate::{debug, log};

/// Links of one file, keyed by the file name used as found-on page.
struct ScannedPage {
    page: String,
    links: Vec<String>,
}

pub async fn run_scan<P: Probe>(args: &ScanArgs, tracker: &LinkTracker<P>) -> Result<()> {
    tracker.set_enabled(true);

    let pages = args
        .files
        .iter()
        .map(|file| {
            let html = fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let links = page_links(&html);
            debug!("scan"; "{}: {}", file.display(), plural_count(links.len(), "link"));
            Ok(ScannedPage {
                page: file.display().to_string(),
                links,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let total: usize = pages.iter().map(|p| p.links.len()).sum();
    log!(
        "scan";
        "checking {} in {}",
        plural_count(total, "link"),
        plural_count(pages.len(), "file")
    );

    join_all(
        pages
            .iter()
            .map(|page| tracker.check_urls(&page.links, &page.page)),
    )
    .await;

    finish_report(&tracker.report(), args.json)
}
