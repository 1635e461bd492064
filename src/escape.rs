//! HTML escaping utilities.
//!
//! Text escaping is fast-path optimized: memchr finds the next escapable
//! byte, and the bytes in between are bulk-copied.

use memchr::{memchr, memchr3};

/// Escape HTML text content into output buffer.
///
/// Escapes `<`, `>`, `&` and `"` to their HTML entity equivalents.
///
/// # Example
/// ```
/// use tagmark::escape::escape_text_into;
///
/// let mut out = Vec::new();
/// escape_text_into(&mut out, b"<script>");
/// assert_eq!(out, b"&lt;script&gt;");
/// ```
pub fn escape_text_into(out: &mut Vec<u8>, input: &[u8]) {
    let mut pos = 0;
    while let Some(rel) = next_text_escape(&input[pos..]) {
        let at = pos + rel;
        out.extend_from_slice(&input[pos..at]);
        out.extend_from_slice(match input[at] {
            b'<' => b"&lt;",
            b'>' => b"&gt;",
            b'&' => b"&amp;",
            _ => b"&quot;",
        });
        pos = at + 1;
    }
    out.extend_from_slice(&input[pos..]);
}

/// Escape a value for a double-quoted HTML attribute.
///
/// # Example
/// ```
/// use tagmark::escape::escape_attr_into;
///
/// let mut out = Vec::new();
/// escape_attr_into(&mut out, "a.png\" onload=\"x");
/// assert!(!out.contains(&b'"'));
/// ```
#[inline]
pub fn escape_attr_into(out: &mut Vec<u8>, input: &str) {
    html_escape::encode_double_quoted_attribute_to_vec(input, out);
}

/// Check whether a URL is safe to place in `src` or `href`.
///
/// Allows `http:`, `https:`, scheme-relative (`//host/...`) and relative
/// URLs. Any other scheme (`javascript:`, `data:`, `vbscript:`, ...) is
/// rejected. Browsers drop tabs and newlines inside a scheme, so those are
/// ignored when reading it.
///
/// # Example
/// ```
/// use tagmark::escape::is_safe_url;
///
/// assert!(is_safe_url("https://example.com/a.png"));
/// assert!(is_safe_url("/uploads/a.png"));
/// assert!(!is_safe_url("javascript:alert(1)"));
/// ```
pub fn is_safe_url(url: &str) -> bool {
    let url = url.trim();
    let Some(colon) = url.find(':') else {
        return true;
    };
    let prefix = &url[..colon];
    if prefix.contains(['/', '?', '#']) {
        // The colon is in the path, query or fragment; no scheme.
        return true;
    }
    let scheme: String = prefix
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();
    scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
}

#[inline]
fn next_text_escape(input: &[u8]) -> Option<usize> {
    match (memchr3(b'<', b'>', b'&', input), memchr(b'"', input)) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(input: &str) -> String {
        let mut out = Vec::new();
        escape_text_into(&mut out, input.as_bytes());
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_escape_text_basic() {
        assert_eq!(text("hello"), "hello");
        assert_eq!(text("a < b"), "a &lt; b");
        assert_eq!(text("a > b"), "a &gt; b");
        assert_eq!(text("a & b"), "a &amp; b");
        assert_eq!(text("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn test_escape_consecutive_and_boundaries() {
        assert_eq!(text("<<>>"), "&lt;&lt;&gt;&gt;");
        assert_eq!(text("<start"), "&lt;start");
        assert_eq!(text("end>"), "end&gt;");
        assert_eq!(text(""), "");
    }

    #[test]
    fn test_escape_unicode() {
        assert_eq!(text("日本語 <b>"), "日本語 &lt;b&gt;");
    }

    #[test]
    fn test_safe_urls() {
        assert!(is_safe_url("http://x/a.png"));
        assert!(is_safe_url("HTTPS://x/a.png"));
        assert!(is_safe_url("//cdn.example.com/a.png"));
        assert!(is_safe_url("a.png"));
        assert!(is_safe_url("/img/a.png?t=12:30"));
        assert!(is_safe_url(""));
    }

    #[test]
    fn test_unsafe_urls() {
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url("  JavaScript:alert(1)"));
        assert!(!is_safe_url("java\tscript:alert(1)"));
        assert!(!is_safe_url("data:text/html;base64,PHNjcmlwdD4="));
        assert!(!is_safe_url("vbscript:msgbox"));
        assert!(!is_safe_url("file:///etc/passwd"));
    }

    #[test]
    fn test_escape_attr_quotes() {
        let mut out = Vec::new();
        escape_attr_into(&mut out, "x\"y");
        assert_eq!(out, b"x&quot;y");
    }
}
