//! Link classification for the tracker.

/// File extensions that identify static assets rather than pages.
pub const STATIC_ASSET_EXTENSIONS: [&str; 11] = [
    "css", "js", "png", "jpg", "jpeg", "svg", "gif", "webp", "woff", "woff2", "ttf",
];

/// What a link points at, as far as probing is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// Has a URL scheme (https://, mailto:, tel:, ...) or is protocol-relative (//host).
    External(&'a str),
    /// Pure fragment/anchor link (#section). Value is anchor without `#`.
    Fragment(&'a str),
    /// Path ending in a static asset extension (/main.css, /logo.png?v=2).
    StaticAsset(&'a str),
    /// Anything else: a page on this site.
    Page(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Classify a link string.
    pub fn parse(link: &'a str) -> Self {
        if is_external_link(link) || link.starts_with("//") {
            Self::External(link)
        } else if let Some(anchor) = link.strip_prefix('#') {
            Self::Fragment(anchor)
        } else if has_static_extension(link) {
            Self::StaticAsset(link)
        } else {
            Self::Page(link)
        }
    }

    /// Only page links are probed.
    #[inline]
    pub fn is_probed(&self) -> bool {
        matches!(self, Self::Page(_))
    }
}

/// Check if a link is external (has a URL scheme like http:, mailto:, etc.)
///
/// A valid scheme must:
/// - Have at least 1 character before the colon
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Extension check on the path part only (query and fragment ignored),
/// case-insensitive.
fn has_static_extension(link: &str) -> bool {
    let path = link.split(['?', '#']).next().unwrap_or(link);
    let file_name = path.rsplit('/').next().unwrap_or(path);

    file_name.rsplit_once('.').is_some_and(|(stem, ext)| {
        !stem.is_empty()
            && STATIC_ASSET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_external() {
        assert!(matches!(
            LinkKind::parse("https://example.com/blog"),
            LinkKind::External(_)
        ));
        assert!(matches!(
            LinkKind::parse("http://localhost:3000/about"),
            LinkKind::External(_)
        ));
        assert!(matches!(
            LinkKind::parse("//cdn.example.com/lib.js"),
            LinkKind::External(_)
        ));
        assert!(matches!(
            LinkKind::parse("mailto:editor@example.com"),
            LinkKind::External(_)
        ));
    }

    #[test]
    fn test_parse_fragment() {
        assert_eq!(LinkKind::parse("#comments"), LinkKind::Fragment("comments"));
        assert_eq!(LinkKind::parse("#"), LinkKind::Fragment(""));
    }

    #[test]
    fn test_parse_static_asset() {
        for link in [
            "/assets/main.css",
            "/assets/app.js",
            "/uploads/cover.PNG",
            "/img/a.jpeg?v=3",
            "/fonts/inter.woff2#x",
            "logo.svg",
            "/fonts/mono.ttf",
        ] {
            assert_eq!(LinkKind::parse(link), LinkKind::StaticAsset(link), "{link}");
        }
    }

    #[test]
    fn test_parse_page() {
        for link in [
            "/blog/missing-post",
            "/authors/jane",
            "/events/",
            "/blog/v1.2-release",
            "/downloads/report.pdf",
            "/.css",
            "relative/page",
        ] {
            assert_eq!(LinkKind::parse(link), LinkKind::Page(link), "{link}");
        }
    }

    #[test]
    fn test_is_probed() {
        assert!(LinkKind::parse("/blog/post").is_probed());
        assert!(!LinkKind::parse("/a.css").is_probed());
        assert!(!LinkKind::parse("https://x.y").is_probed());
        assert!(!LinkKind::parse("#top").is_probed());
    }

    #[test]
    fn test_is_external_link() {
        assert!(is_external_link("https://example.com"));
        assert!(is_external_link("tel:+1234567890"));
        assert!(!is_external_link("/about"));
        assert!(!is_external_link("./file.txt"));
        assert!(!is_external_link(":nothing"));
        assert!(!is_external_link("/blog?at=10:30"));
    }
}
