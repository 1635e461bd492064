//! Plain-text excerpts for list pages and link previews.

use crate::segment::{Segment, parse};

/// Render content as a single line of plain text, cut at `max_chars`.
///
/// Text, quote and code payloads are kept; images and videos are dropped.
/// Whitespace runs collapse to one space. A cut excerpt ends with `…`.
///
/// # Example
/// ```
/// let text = tagmark::to_plain_text("Intro\n\n[image]a.png[/image]\n[quote]so  true[/quote]", 100);
/// assert_eq!(text, "Intro so true");
/// ```
pub fn to_plain_text(input: &str, max_chars: usize) -> String {
    let mut out = String::with_capacity(input.len().min(max_chars.saturating_mul(4)));
    let mut count = 0;

    let words = parse(input)
        .filter_map(|segment| match segment {
            Segment::Text(s) | Segment::Quote(s) => Some(s),
            Segment::Code { body, .. } => Some(body),
            Segment::Image(_) | Segment::Video(_) => None,
        })
        .flat_map(str::split_whitespace);

    for word in words {
        let needed = word.chars().count() + usize::from(count > 0);
        if count + needed > max_chars {
            let room = max_chars.saturating_sub(count + usize::from(count > 0));
            if room > 0 {
                if count > 0 {
                    out.push(' ');
                }
                out.extend(word.chars().take(room));
            }
            out.push('…');
            return out;
        }
        if count > 0 {
            out.push(' ');
        }
        out.push_str(word);
        count += needed;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_media_and_collapses_whitespace() {
        let input = "Look:\n\n[video]https://youtu.be/x[/video]\n[code=rust]fn  main()[/code]";
        assert_eq!(to_plain_text(input, 100), "Look: fn main()");
    }

    #[test]
    fn cuts_with_ellipsis() {
        assert_eq!(to_plain_text("one two three", 7), "one two…");
        assert_eq!(to_plain_text("one two three", 9), "one two t…");
        assert_eq!(to_plain_text("abcdef", 3), "abc…");
    }

    #[test]
    fn exact_fit_has_no_ellipsis() {
        assert_eq!(to_plain_text("one two", 7), "one two");
    }

    #[test]
    fn unbounded_limit() {
        assert_eq!(to_plain_text("hello   world", usize::MAX), "hello world");
    }

    #[test]
    fn empty() {
        assert_eq!(to_plain_text("", 10), "");
        assert_eq!(to_plain_text("[image]a[/image]", 10), "");
    }
}
