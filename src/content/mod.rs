//! Authored content scanning.
//!
//! Rich-text HTML is where raw asset paths and internal links originate.
//! Links are read from a parsed tree, so comments and text never count.
//! Image rewriting edits the source text in place and keeps everything else
//! byte for byte.

mod rewrite;
mod scan;

pub use rewrite::rewrite_image_sources;
pub use scan::{ContentLink, extract_links, page_links};
