//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Asset URL normalization and link health checks for blog content
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: folio.toml)
    #[arg(short = 'C', long, global = true, default_value = "folio.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print debug output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Uploads base URL, overrides `uploads.base_url`
    #[arg(long, global = true, env = "FOLIO_UPLOADS_URL", value_hint = clap::ValueHint::Url)]
    pub uploads_url: Option<String>,

    /// Fallback for unusable asset input, overrides `uploads.default_image`
    #[arg(long, global = true, env = "FOLIO_DEFAULT_IMAGE")]
    pub default_image: Option<String>,

    /// Origin internal links are probed against, overrides `links.site_url`
    #[arg(long, global = true, env = "FOLIO_SITE_URL", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Apply `--color` and `--verbose` to the process-wide output state.
    ///
    /// Runs before config loading so its debug lines honor `--verbose`.
    pub fn apply_output_options(&self) {
        match self.color {
            ColorChoice::Always => owo_colors::set_override(true),
            ColorChoice::Never => owo_colors::set_override(false),
            ColorChoice::Auto => {} // owo-colors auto-detects TTY
        }
        crate::logger::set_verbose(self.verbose);
    }
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the canonical upload URL for each path
    #[command(visible_alias = "n")]
    Normalize {
        #[command(flatten)]
        args: NormalizeArgs,
    },

    /// Probe internal URLs and report broken ones
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },

    /// Extract links from HTML files and check them
    #[command(visible_alias = "s")]
    Scan {
        #[command(flatten)]
        args: ScanArgs,
    },
}

/// Normalize command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct NormalizeArgs {
    /// Asset paths to normalize
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Returned verbatim for blank input
    #[arg(short, long, value_name = "PATH")]
    pub fallback: Option<String>,

    /// Parse each PATH as JSON (`null`, `"a.png"`, `{"url": "a.png"}`)
    #[arg(short, long)]
    pub json: bool,
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// URLs to check
    #[arg(value_name = "URL", required = true)]
    pub urls: Vec<String>,

    /// Page the URLs were found on
    #[arg(short, long, default_value = "/")]
    pub page: String,

    /// Print broken links as JSON on stdout
    #[arg(short, long)]
    pub json: bool,
}

/// Scan command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ScanArgs {
    /// HTML files to scan
    #[arg(value_name = "FILE", required = true, value_hint = clap::ValueHint::FilePath)]
    pub files: Vec<PathBuf>,

    /// Print broken links as JSON on stdout
    #[arg(short, long)]
    pub json: bool,
}
