//! Link extraction from content HTML.

use std::borrow::Cow;

use rustc_hash::FxHashSet;
use serde::Serialize;

/// Attributes that carry a link.
const LINK_ATTRS: &[&str] = &["href", "src", "poster"];

/// One link-bearing attribute found in content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentLink {
    /// Lowercased tag name (`a`, `img`, `video`, ...).
    pub tag: String,
    /// Lowercased attribute name.
    pub attr: String,
    /// Attribute value with entities decoded, untrimmed otherwise.
    pub value: String,
}

impl ContentLink {
    #[inline]
    pub fn is_href(&self) -> bool {
        self.attr == "href"
    }
}

/// Every `href`, `src` and `poster` value in document order.
///
/// Links inside comments are not reported.
pub fn extract_links(html: &str) -> Vec<ContentLink> {
    let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
        return Vec::new();
    };

    let parser = dom.parser();
    let mut links = Vec::new();
    for handle in dom.children() {
        collect_links(*handle, parser, &mut links);
    }
    links
}

/// Pre-order walk so links come out in source order.
fn collect_links(handle: tl::NodeHandle, parser: &tl::Parser, links: &mut Vec<ContentLink>) {
    let Some(tl::Node::Tag(tag)) = handle.get(parser) else {
        return;
    };

    let name = tag.name().as_utf8_str().to_ascii_lowercase();
    for (key, value) in tag.attributes().iter() {
        let attr = key.to_ascii_lowercase();
        if !LINK_ATTRS.contains(&attr.as_str()) {
            continue;
        }
        let value = value.map(|v| decode_entities(&v).into_owned());
        links.push(ContentLink {
            tag: name.clone(),
            attr,
            value: value.unwrap_or_default(),
        });
    }

    for child in tag.children().top().iter() {
        collect_links(*child, parser, links);
    }
}

/// Decode named and numeric character references.
///
/// Unknown or malformed references are kept as written.
fn decode_entities(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&rest[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00A0}'),
        _ => {
            let num = entity.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Distinct non-empty `href` targets in first-seen order.
///
/// No classification happens here; the tracker skips external and asset links
/// itself.
pub fn page_links(html: &str) -> Vec<String> {
    let mut seen = FxHashSet::default();
    extract_links(html)
        .into_iter()
        .filter(ContentLink::is_href)
        .map(|link| link.value.trim().to_string())
        .filter(|href| !href.is_empty() && seen.insert(href.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = r#"<article>
<h1 id="intro">Hello</h1>
<p>See <a href="/blog/missing-post">this</a> and <A HREF='/about'>about</A>.</p>
<img class="cover" src="../../uploads/a.png" alt="a">
<video poster="uploads/p.jpg" src="/uploads/v.mp4"></video>
<a href="https://example.com/?a=1&amp;b=2">ext</a>
<a href="/about">again</a>
<a data-href="/ignored">data</a>
<a href="">empty</a>
</article>"#;

    fn hrefs(html: &str) -> Vec<String> {
        extract_links(html)
            .into_iter()
            .filter(ContentLink::is_href)
            .map(|l| l.value)
            .collect()
    }

    #[test]
    fn test_extract_links_document_order() {
        let links = extract_links(POST);
        let pairs: Vec<_> = links
            .iter()
            .map(|l| (l.tag.as_str(), l.attr.as_str(), l.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("a", "href", "/blog/missing-post"),
                ("a", "href", "/about"),
                ("img", "src", "../../uploads/a.png"),
                ("video", "poster", "uploads/p.jpg"),
                ("video", "src", "/uploads/v.mp4"),
                ("a", "href", "https://example.com/?a=1&b=2"),
                ("a", "href", "/about"),
                ("a", "href", ""),
            ]
        );
    }

    #[test]
    fn test_page_links_distinct() {
        assert_eq!(
            page_links(POST),
            vec!["/blog/missing-post", "/about", "https://example.com/?a=1&b=2"]
        );
    }

    #[test]
    fn test_text_outside_tags_ignored() {
        assert!(extract_links(r#"<p>write href="/x" in text</p>"#).is_empty());
    }

    #[test]
    fn test_unquoted_attribute_value() {
        assert_eq!(
            hrefs("<p><a href=/blog/missing-post>old</a></p>"),
            vec!["/blog/missing-post"]
        );
    }

    #[test]
    fn test_angle_bracket_inside_quoted_value() {
        assert_eq!(
            hrefs(r#"<a title="1 > 0" href="/blog/missing-post">math</a>"#),
            vec!["/blog/missing-post"]
        );
    }

    #[test]
    fn test_commented_out_links_skipped() {
        let html = r#"<p>live <a href="/about">about</a></p>
<!-- <a href="/drafts/old">draft</a> -->"#;
        assert_eq!(page_links(html), vec!["/about"]);
    }

    #[test]
    fn test_numeric_entities_decoded() {
        assert_eq!(
            hrefs(r#"<a href="/search?q=a&#38;b=1">s</a><a href="/t?x=&#x26;&lt;">t</a>"#),
            vec!["/search?q=a&b=1", "/t?x=&<"]
        );
    }

    #[test]
    fn test_decode_entities_keeps_unknown() {
        assert_eq!(decode_entities("a&b"), "a&b");
        assert_eq!(decode_entities("&copy2;&#zz;"), "&copy2;&#zz;");
        assert_eq!(decode_entities("&quot;x&apos;"), "\"x'");
    }
}
