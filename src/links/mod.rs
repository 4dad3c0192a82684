//! Link health tracking.
//!
//! Internal links found in content are probed once with `HEAD`; broken ones
//! are remembered together with every page they were seen on.
//!
//! ```ignore
//! let tracker = Arc::new(LinkTracker::from_config(&cfg().links)?);
//! tracker.set_enabled(true);
//! if !tracker.check_url("/blog/missing-post", "/index").await {
//!     tracker.report().print();
//! }
//! ```

mod kind;
mod probe;
mod report;
mod tracker;

#[cfg(test)]
mod tests;

pub use kind::{LinkKind, STATIC_ASSET_EXTENSIONS, is_external_link};
pub use probe::{HttpProbe, Probe, ProbeFailure, ProbeSetupError};
pub use report::{BrokenLink, LinkReport};
pub use tracker::{DEFAULT_CONCURRENCY, LinkCheckOutcome, LinkTracker};
