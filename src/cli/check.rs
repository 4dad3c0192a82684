//! `folio check`: probe URLs found on one page.

use anyhow::Result;

use super::CheckArgs;
use super::common::{finish_report, plural_count};
use crate::links::{LinkTracker, Probe};
use crate::log;

pub async fn run_check<P: Probe>(args: &CheckArgs, tracker: &LinkTracker<P>) -> Result<()> {
    tracker.set_enabled(true);
    log!("check"; "checking {} on {}", plural_count(args.urls.len(), "url"), args.page);

    let outcome = tracker.check_urls(&args.urls, &args.page).await;
    log!(
        "check";
        "{} valid, {} broken",
        outcome.valid_urls.len(),
        outcome.broken_urls.len()
    );

    finish_report(&tracker.report(), args.json)
}
