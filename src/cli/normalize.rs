//! `folio normalize`: print canonical upload URLs.

use std::io::{Write, stdout};

use anyhow::Result;

use super::NormalizeArgs;
use crate::config::FolioConfig;
use crate::uploads::{AssetPath, UploadResolver};

pub fn run_normalize(args: &NormalizeArgs, config: &FolioConfig) -> Result<()> {
    let resolver = UploadResolver::new(&config.uploads);

    let mut out = stdout().lock();
    for url in normalize_all(args, &resolver) {
        writeln!(out, "{url}")?;
    }
    Ok(())
}

/// One output line per input, in order.
fn normalize_all(args: &NormalizeArgs, resolver: &UploadResolver) -> Vec<String> {
    let fallback = args.fallback.as_deref().unwrap_or("");

    args.paths
        .iter()
        .map(|raw| {
            let path = if args.json {
                AssetPath::from_json(raw)
            } else {
                Some(AssetPath::from(raw.as_str()))
            };
            resolver.normalize_or(path.as_ref(), fallback)
        })
        .collect()
}
