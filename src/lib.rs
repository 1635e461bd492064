//! tagmark: bracket-tag content markup for blog posts and forum topics
//!
//! Content is stored and exchanged as plain text with a small set of
//! bracket tags:
//!
//! ```text
//! [image]<url>[/image]
//! [quote]<text>[/quote]
//! [code]<text>[/code]
//! [code=<language>]<text>[/code]
//! [video]<url>[/video]
//! ```
//!
//! This crate parses that format into typed segments, renders segments to
//! HTML, and provides the block-based composer model that produces it.
//!
//! # Design Principles
//! - No regex: byte-level scanning with memchr
//! - No errors: malformed markup degrades to literal text
//! - Zero-copy segments: payloads borrow from the input

pub mod draft;
pub mod editor;
pub mod escape;
pub mod excerpt;
pub mod limits;
pub mod range;
pub mod render;
pub mod segment;
pub mod tag;
pub mod video;

// Re-export primary types
pub use draft::{DraftWarning, TagError, TopicDraft, TopicLimits, TopicSubmission, ValidationError, ValidationErrors};
pub use editor::{BlockEditor, BlockId, BlockKind, ContentBlock};
pub use excerpt::to_plain_text;
pub use range::Range;
pub use render::HtmlWriter;
pub use segment::{Segment, SegmentKind, Segments, parse, parse_opt, segments};

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Render videos as embedded players. When off, videos render as links.
    pub embed_videos: bool,
    /// Attach a load-failure handler that hides broken images.
    pub hide_broken_images: bool,
    /// Show the language label above labelled code blocks.
    pub code_language_header: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            embed_videos: true,
            hide_broken_images: true,
            code_language_header: true,
        }
    }
}

/// Render content to HTML.
///
/// This is the primary API for detail pages.
///
/// # Example
/// ```
/// let html = tagmark::to_html("Hello\n\n[quote]Hi there[/quote]");
/// assert!(html.contains("<p>Hello</p>"));
/// assert!(html.contains("<blockquote class=\"tm-quote\">Hi there</blockquote>"));
/// ```
pub fn to_html(input: &str) -> String {
    to_html_with_options(input, &Options::default())
}

/// Render content to HTML with options.
pub fn to_html_with_options(input: &str, options: &Options) -> String {
    let mut writer = HtmlWriter::with_capacity_for(input.len());
    render::render_segments(parse(input), &mut writer, options);
    writer.into_string()
}

/// Render content to HTML, writing into a provided buffer.
///
/// The buffer is cleared first; its capacity is reused.
pub fn to_html_into(input: &str, out: &mut Vec<u8>) {
    to_html_into_with_options(input, out, &Options::default());
}

/// Render content to HTML into a provided buffer with options.
pub fn to_html_into_with_options(input: &str, out: &mut Vec<u8>, options: &Options) {
    out.clear();
    out.reserve(input.len() + input.len() / 2);
    let mut writer = HtmlWriter::from_vec(std::mem::take(out));
    render::render_segments(parse(input), &mut writer, options);
    *out = writer.into_vec();
}

/// Render optional content; `None` renders nothing.
pub fn to_html_opt(input: Option<&str>) -> String {
    input.map(to_html).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(to_html(""), "");
        assert_eq!(to_html_opt(None), "");
    }

    #[test]
    fn test_into_buffer_reuse() {
        let mut buf = b"stale".to_vec();
        to_html_into("hi", &mut buf);
        assert_eq!(buf, b"<p>hi</p>\n");
        to_html_into("[quote]q[/quote]", &mut buf);
        assert_eq!(buf, b"<blockquote class=\"tm-quote\">q</blockquote>\n");
    }
}
