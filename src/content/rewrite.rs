//! Image source rewriting.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::links::is_external_link;
use crate::uploads::UploadResolver;

static IMG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*>").unwrap());

static SRC_ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(\ssrc\s*=\s*)(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// Rewrite every `<img src>` through the resolver.
///
/// Blank sources, protocol-relative `//host` sources and non-http schemes
/// (`data:`, `blob:`) are left untouched. So is everything outside `<img>`.
pub fn rewrite_image_sources(html: &str, resolver: &UploadResolver) -> String {
    IMG_REGEX
        .replace_all(html, |img: &Captures| {
            SRC_ATTR_REGEX
                .replacen(&img[0], 1, |src: &Captures| rewrite_src(src, resolver))
                .into_owned()
        })
        .into_owned()
}

fn rewrite_src(src: &Captures, resolver: &UploadResolver) -> String {
    let (quote, value) = match (src.get(2), src.get(3)) {
        (Some(m), _) => ('"', m.as_str()),
        (None, Some(m)) => ('\'', m.as_str()),
        (None, None) => return src[0].to_string(),
    };

    let trimmed = value.trim();
    let keep = trimmed.is_empty()
        || trimmed.starts_with("//")
        || (is_external_link(trimmed)
            && !trimmed.starts_with("http://")
            && !trimmed.starts_with("https://"));
    if keep {
        return src[0].to_string();
    }

    let url = resolver.normalize_str(trimmed);
    let escaped = if quote == '"' {
        url.replace('"', "&quot;")
    } else {
        url.replace('\'', "&#39;")
    };
    format!("{}{quote}{escaped}{quote}", &src[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> UploadResolver {
        UploadResolver::from_base_url("http://cdn.example.com/uploads")
    }

    #[test]
    fn test_rewrites_img_src() {
        let html = r#"<p><img src="../../uploads/a.png" alt="a"><img class='x' src='b.jpg'></p>"#;
        assert_eq!(
            rewrite_image_sources(html, &resolver()),
            r#"<p><img src="http://cdn.example.com/uploads/a.png" alt="a"><img class='x' src='http://cdn.example.com/uploads/b.jpg'></p>"#
        );
    }

    #[test]
    fn test_leaves_other_tags_alone() {
        let html = r#"<script src="app.js"></script><video src="v.mp4"></video><a href="a.png">a</a>"#;
        assert_eq!(rewrite_image_sources(html, &resolver()), html);
    }

    #[test]
    fn test_leaves_data_and_blank_sources() {
        let html = r#"<img src="data:image/png;base64,AAAA"><img src=""><IMG SRC="https://other.com/x.png">"#;
        assert_eq!(rewrite_image_sources(html, &resolver()), html);
    }

    #[test]
    fn test_protocol_relative_source_kept() {
        let html = r#"<img src="//images.other.org/pic.png"><img src=' //images.other.org/b.png'>"#;
        assert_eq!(rewrite_image_sources(html, &resolver()), html);
    }

    #[test]
    fn test_data_src_not_rewritten() {
        let html = r#"<img data-src="lazy.png" src="/uploads/a.png">"#;
        assert_eq!(
            rewrite_image_sources(html, &resolver()),
            r#"<img data-src="lazy.png" src="http://cdn.example.com/uploads/a.png">"#
        );
    }
}
