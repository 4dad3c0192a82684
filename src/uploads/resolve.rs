//! Asset path canonicalization.
//!
//! Rewrites run in a fixed order, each feeding the next:
//!
//! | Step | Input shape                        | Result                         |
//! |------|------------------------------------|--------------------------------|
//! | 1    | absent / empty                     | fallback                       |
//! | 2    | `{ url }` object                   | recurse, default image if bad  |
//! | 3    | any string                         | trimmed, `\` → `/`             |
//! | 4    | `http(s)://...`                    | keep `/uploads/..` or return   |
//! | 5    | `../../uploads/a.png`              | `/uploads/a.png`               |
//! | 6    | `/api/uploads/a.png`               | `/uploads/a.png`               |
//! | 6b   | `x/uploads/a.png`                  | `/uploads/a.png`               |
//! | 7    | `a.png`                            | `/uploads/a.png`               |
//! | 8    | `/uploads/a.png`                   | `<origin>/uploads/a.png`       |

use std::borrow::Cow;

use super::AssetPath;
use crate::config::UploadsConfig;
use crate::{debug, log};

/// Canonical directory every normalized asset lives under.
const UPLOADS_DIR: &str = "/uploads/";

/// Outcome of resolving one asset path, before fallbacks apply.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Resolved {
    Url(String),
    /// Absent or blank: the caller's fallback applies.
    Empty,
    /// Wrong shape: the configured default image applies.
    Unusable(&'static str),
}

/// Maps asset paths to absolute URLs under a configured uploads base URL.
///
/// Total over its input: never panics, never errors. Bad input resolves to a
/// fallback and, for unusable shapes, a logged warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResolver {
    /// Base URL with trailing `/` and one trailing `/uploads` removed.
    origin: String,
    default_image: String,
}

impl UploadResolver {
    pub fn new(config: &UploadsConfig) -> Self {
        Self {
            origin: uploads_origin(&config.base_url),
            default_image: config.default_image.trim().to_string(),
        }
    }

    /// Resolver for `base_url` with no default image.
    pub fn from_base_url(base_url: &str) -> Self {
        Self::new(&UploadsConfig {
            base_url: base_url.to_string(),
            default_image: String::new(),
        })
    }

    /// Uploads origin that normalized paths are appended to.
    #[inline]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Normalize with the empty string as fallback.
    #[inline]
    pub fn normalize(&self, path: Option<&AssetPath>) -> String {
        self.normalize_or(path, "")
    }

    /// Normalize a plain string path.
    #[inline]
    pub fn normalize_str(&self, path: &str) -> String {
        self.normalize_or(Some(&AssetPath::from(path)), "")
    }

    /// Normalize, returning `fallback` (trimmed, verbatim) for absent or
    /// blank input.
    ///
    /// The fallback is not normalized: callers pass a renderable placeholder.
    /// A blank fallback yields the empty string.
    pub fn normalize_or(&self, path: Option<&AssetPath>, fallback: &str) -> String {
        let resolved = match path {
            Some(path) => self.resolve(path),
            None => Resolved::Empty,
        };

        match resolved {
            Resolved::Url(url) => url,
            Resolved::Empty => fallback.trim().to_string(),
            Resolved::Unusable(reason) => {
                log!("warning"; "unusable asset path ({}): {:?}, using default image", reason, path);
                self.default_image.clone()
            }
        }
    }

    fn resolve(&self, path: &AssetPath) -> Resolved {
        match path {
            AssetPath::Plain(raw) => match self.canonicalize(raw) {
                Some(url) => Resolved::Url(url),
                None => Resolved::Empty,
            },
            AssetPath::Wrapped { url: None } => Resolved::Unusable("object without url"),
            AssetPath::Wrapped { url: Some(inner) } => match self.resolve(inner) {
                Resolved::Empty => Resolved::Unusable("object with empty url"),
                other => other,
            },
            AssetPath::Unsupported(_) => Resolved::Unusable("unsupported value"),
        }
    }

    /// Steps 3-8. `None` when the string is blank.
    fn canonicalize(&self, raw: &str) -> Option<String> {
        let path = raw.trim().replace('\\', "/");
        if path.is_empty() {
            return None;
        }

        if is_absolute_http(&path) {
            // Already under our origin: leave untouched so repeated calls agree
            if self.is_own_upload_url(&path) {
                return Some(path);
            }
            return match path.find(UPLOADS_DIR) {
                Some(idx) => Some(self.join(&path[idx..])),
                None => Some(path),
            };
        }

        let relative = collapse_parent_segments(&path);
        let relative = rewrite_api_prefix(relative);
        let relative = rewrite_embedded_uploads(relative);
        let relative = prefix_bare_filename(relative);

        let url = self.join(&relative);
        if url != raw {
            debug!("uploads"; "{} -> {}", raw, url);
        }
        Some(url)
    }

    #[inline]
    fn join(&self, uploads_path: &str) -> String {
        format!("{}{}", self.origin, uploads_path)
    }

    fn is_own_upload_url(&self, url: &str) -> bool {
        !self.origin.is_empty()
            && url
                .strip_prefix(self.origin.as_str())
                .is_some_and(|rest| rest.starts_with(UPLOADS_DIR))
    }
}

/// Strip trailing slashes and one trailing `/uploads` from the base URL.
fn uploads_origin(base_url: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let base = base.strip_suffix("/uploads").unwrap_or(base);
    base.trim_end_matches('/').to_string()
}

#[inline]
fn is_absolute_http(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// `../../uploads/a.png` -> `/uploads/a.png`
fn collapse_parent_segments(path: &str) -> Cow<'_, str> {
    let mut rest = path;
    while let Some(stripped) = rest.strip_prefix("../") {
        rest = stripped;
    }

    if rest.len() < path.len() && rest.starts_with("uploads/") {
        Cow::Owned(format!("/{rest}"))
    } else {
        Cow::Borrowed(path)
    }
}

/// `/api/uploads/a.png` -> `/uploads/a.png`
fn rewrite_api_prefix(path: Cow<'_, str>) -> Cow<'_, str> {
    if let Some(rest) = path.strip_prefix("/api/uploads/") {
        return Cow::Owned(format!("{UPLOADS_DIR}{rest}"));
    }
    path
}

/// `static/uploads/a.png` -> `/uploads/a.png`
fn rewrite_embedded_uploads(path: Cow<'_, str>) -> Cow<'_, str> {
    if path.starts_with(UPLOADS_DIR) {
        return path;
    }
    match path.find("uploads/") {
        Some(idx) => Cow::Owned(format!("{UPLOADS_DIR}{}", &path[idx + "uploads/".len()..])),
        None => path,
    }
}

/// `a.png` -> `/uploads/a.png`
fn prefix_bare_filename(path: Cow<'_, str>) -> Cow<'_, str> {
    if path.starts_with(UPLOADS_DIR) {
        return path;
    }

    let mut name = path.as_ref();
    loop {
        if let Some(rest) = name.strip_prefix('/') {
            name = rest;
        } else if let Some(rest) = name.strip_prefix("./") {
            name = rest;
        } else {
            break;
        }
    }
    Cow::Owned(format!("{UPLOADS_DIR}{name}"))
}
