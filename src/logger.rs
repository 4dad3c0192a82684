//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output gated behind `--verbose`
//!
//! All output goes to stderr so that command results on stdout stay pipeable.
//!
//! # Example
//!
//! ```ignore
//! log!("links"; "probing {} urls", count);
//! debug!("uploads"; "rewrote {} -> {}", raw, normalized);
//! ```

use owo_colors::{OwoColorize, Stream, Style};
use std::{
    fmt::Display,
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let line = format_line(module, message);

    let mut stderr = stderr().lock();
    writeln!(stderr, "{line}").ok();
    stderr.flush().ok();
}

/// Build a full log line: `[module] message`.
fn format_line(module: &str, message: &str) -> String {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);
    format!("{prefix} {message}")
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let style = match module_lower {
        "links" | "check" | "scan" => Style::new().bright_blue().bold(),
        "uploads" | "normalize" => Style::new().bright_green().bold(),
        "error" => Style::new().bright_red().bold(),
        _ => Style::new().bright_yellow().bold(),
    };
    paint(format!("[{module}]"), style)
}

/// Render `text` with `style` when stderr output is colored.
///
/// Honors `owo_colors::set_override`, so `--color never` yields plain text.
pub fn paint(text: impl Display, style: Style) -> String {
    text.if_supports_color(Stream::Stderr, |t| t.style(style))
        .to_string()
}

// ============================================================================
// Tests
// ============================================================================
