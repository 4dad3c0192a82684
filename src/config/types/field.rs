//! Config field path used in diagnostics.

/// Dot-separated path of a config field, e.g. `uploads.base_url`.
///
/// Each section declares its fields as associated constants:
///
/// ```ignore
/// impl UploadsConfig {
///     pub const BASE_URL: FieldPath = FieldPath::new("uploads.base_url");
/// }
///
/// diag.error(UploadsConfig::BASE_URL, "required");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}
