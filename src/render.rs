//! HTML rendering of parsed segments.
//!
//! Every segment maps to a self-contained HTML fragment. Output order is
//! segment order; blank segments produce nothing.

use crate::escape;
use crate::segment::Segment;
use crate::video::embed_url;
use crate::Options;

/// Hides an image whose URL fails to load.
const IMAGE_FALLBACK: &str = "this.style.display='none'";

/// HTML output writer with a reusable buffer.
///
/// # Example
/// ```
/// use tagmark::HtmlWriter;
///
/// let mut writer = HtmlWriter::with_capacity_for(16);
/// writer.write_str("<p>");
/// writer.write_escaped_text("Hello <World>");
/// writer.write_str("</p>");
///
/// assert_eq!(writer.into_string(), "<p>Hello &lt;World&gt;</p>");
/// ```
#[derive(Debug, Default)]
pub struct HtmlWriter {
    out: Vec<u8>,
}

impl HtmlWriter {
    #[inline]
    pub fn new() -> Self {
        Self {
            out: Vec::with_capacity(1024),
        }
    }

    /// Create with capacity based on expected input size.
    ///
    /// Tag markup expands into wrapper elements, so reserve half again.
    #[inline]
    pub fn with_capacity_for(input_len: usize) -> Self {
        Self {
            out: Vec::with_capacity(input_len + input_len / 2),
        }
    }

    /// Wrap an existing buffer, keeping its contents.
    #[inline]
    pub fn from_vec(out: Vec<u8>) -> Self {
        Self { out }
    }

    /// Write a static string without escaping.
    #[inline]
    pub fn write_str(&mut self, s: &'static str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    /// Write text content with HTML escaping.
    #[inline]
    pub fn write_escaped_text(&mut self, text: &str) {
        escape::escape_text_into(&mut self.out, text.as_bytes());
    }

    /// Write a double-quoted attribute value with escaping.
    #[inline]
    pub fn write_escaped_attr(&mut self, value: &str) {
        escape::escape_attr_into(&mut self.out, value);
    }

    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.out
    }

    /// Consume the writer and return the HTML.
    pub fn into_string(self) -> String {
        // Input is &str and escaping is ASCII-only, so the buffer is UTF-8.
        String::from_utf8(self.out)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
    }
}

/// Render every segment in order.
pub fn render_segments<'a, I>(segments: I, writer: &mut HtmlWriter, options: &Options)
where
    I: IntoIterator<Item = Segment<'a>>,
{
    for segment in segments {
        render_segment(&segment, writer, options);
    }
}

/// Render one segment. Blank segments write nothing.
pub fn render_segment(segment: &Segment<'_>, writer: &mut HtmlWriter, options: &Options) {
    if segment.is_blank() {
        return;
    }
    match *segment {
        Segment::Text(text) => render_text(text, writer),
        Segment::Image(url) => render_image(url.trim(), writer, options),
        Segment::Quote(text) => {
            writer.write_str("<blockquote class=\"tm-quote\">");
            writer.write_escaped_text(text);
            writer.write_str("</blockquote>\n");
        }
        Segment::Code { language, body } => render_code(language, body, writer, options),
        Segment::Video(url) => render_video(url.trim(), writer, options),
    }
}

/// One paragraph per line; blank lines keep their spacing as `<br />`.
fn render_text(text: &str, writer: &mut HtmlWriter) {
    for line in text.lines() {
        if line.trim().is_empty() {
            writer.write_str("<br />\n");
        } else {
            writer.write_str("<p>");
            writer.write_escaped_text(line);
            writer.write_str("</p>\n");
        }
    }
}

/// URLs with a scheme other than http(s) are shown as text, never linked.
fn render_blocked_url(url: &str, writer: &mut HtmlWriter) {
    log::debug!("refusing to link url with unsafe scheme");
    writer.write_str("<p class=\"tm-blocked-url\">");
    writer.write_escaped_text(url);
    writer.write_str("</p>\n");
}

fn render_image(url: &str, writer: &mut HtmlWriter, options: &Options) {
    if !escape::is_safe_url(url) {
        return render_blocked_url(url, writer);
    }
    writer.write_str("<figure class=\"tm-image\"><img src=\"");
    writer.write_escaped_attr(url);
    writer.write_str("\" alt=\"\" loading=\"lazy\"");
    if options.hide_broken_images {
        writer.write_str(" onerror=\"");
        writer.write_str(IMAGE_FALLBACK);
        writer.write_str("\"");
    }
    writer.write_str(" /></figure>\n");
}

fn render_code(language: Option<&str>, body: &str, writer: &mut HtmlWriter, options: &Options) {
    writer.write_str("<div class=\"tm-code\">");
    match language {
        Some(lang) => {
            if options.code_language_header {
                writer.write_str("<div class=\"tm-code-lang\">");
                writer.write_escaped_text(lang);
                writer.write_str("</div>");
            }
            writer.write_str("<pre><code class=\"language-");
            writer.write_escaped_attr(lang);
            writer.write_str("\">");
        }
        None => writer.write_str("<pre><code>"),
    }
    writer.write_escaped_text(body);
    writer.write_str("</code></pre></div>\n");
}

fn render_video(url: &str, writer: &mut HtmlWriter, options: &Options) {
    let src = embed_url(url);
    if !escape::is_safe_url(&src) {
        return render_blocked_url(url, writer);
    }
    if !options.embed_videos {
        writer.write_str("<p class=\"tm-video-link\"><a href=\"");
        writer.write_escaped_attr(&src);
        writer.write_str("\" rel=\"noopener noreferrer\">");
        writer.write_escaped_text(url);
        writer.write_str("</a></p>\n");
        return;
    }
    // 16:9 box; the iframe fills it.
    writer.write_str(
        "<div class=\"tm-video\" style=\"position:relative;padding-bottom:56.25%;height:0;overflow:hidden\">",
    );
    writer.write_str("<iframe src=\"");
    writer.write_escaped_attr(&src);
    writer.write_str(
        "\" style=\"position:absolute;top:0;left:0;width:100%;height:100%\" frameborder=\"0\" allow=\"autoplay; encrypted-media; picture-in-picture\" allowfullscreen></iframe></div>\n",
    );
}
