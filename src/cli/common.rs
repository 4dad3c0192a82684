//! Common utilities shared across CLI commands.

use std::io::{Write, stdout};

use anyhow::Result;

use crate::links::LinkReport;
use crate::log;

/// Format a count with a pluralized noun: `1 url`, `3 urls`.
pub fn plural_count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Emit the broken-link report and fail if it is not empty.
///
/// JSON goes to stdout so it can be piped; the human report goes to stderr.
pub fn finish_report(report: &LinkReport, json: bool) -> Result<()> {
    if json {
        let mut out = stdout().lock();
        writeln!(out, "{}", report.to_json()?)?;
    } else {
        report.print();
        log!("links"; "{}", report);
    }

    if !report.is_empty() {
        anyhow::bail!("found {}", plural_count(report.len(), "broken link"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::{BrokenLink, ProbeFailure};

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(1, "url"), "1 url");
        assert_eq!(plural_count(0, "url"), "0 urls");
        assert_eq!(plural_count(2, "broken link"), "2 broken links");
    }

    #[test]
    fn test_finish_report_fails_on_broken() {
        assert!(finish_report(&LinkReport::default(), false).is_ok());

        let report = LinkReport::new(vec![BrokenLink::new(
            "/gone",
            ProbeFailure::transport("connection failed"),
            "/index",
        )]);
        let err = finish_report(&report, true).unwrap_err();
        assert_eq!(err.to_string(), "found 1 broken link");
    }
}
