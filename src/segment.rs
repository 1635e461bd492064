//! Content segmenter: splits a content string into typed segments.
//!
//! The scanner jumps between `[` bytes, recognizes opening tags, and pairs
//! each opener with the nearest closer of the same kind. Plain text between
//! tagged spans becomes `Text` segments.
//!
//! # Example
//! ```
//! use tagmark::{parse, Segment};
//!
//! let segs: Vec<_> = parse("Hello\n\n[image]http://x/y.png[/image]\n\nWorld").collect();
//! assert_eq!(
//!     segs,
//!     vec![
//!         Segment::Text("Hello"),
//!         Segment::Image("http://x/y.png"),
//!         Segment::Text("World"),
//!     ]
//! );
//! ```
//!
//! # Rules
//!
//! - Tags are lowercase and do not nest. A tag body is opaque text.
//! - Matching is non-greedy: `[image]a[/image][image]b[/image]` is two images.
//! - An opener without a closer stays literal text, and so does any
//!   unknown bracket sequence. The scanner never fails.
//! - Text pieces are trimmed; whitespace-only pieces are dropped.

use std::iter::FusedIterator;

use memchr::{memchr, memmem};
use serde::{Deserialize, Serialize};

use crate::Range;
use crate::tag::{OpenTag, TagKind, parse_open_tag};

/// Kind of a parsed segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Text,
    Image,
    Quote,
    Code,
    Video,
}

/// A typed piece of content. All payloads borrow from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Plain text, trimmed, with internal newlines kept.
    Text(&'a str),
    /// Image URL.
    Image(&'a str),
    /// Quoted text.
    Quote(&'a str),
    /// Code body with an optional language label.
    Code {
        language: Option<&'a str>,
        body: &'a str,
    },
    /// Video URL, as written (see [`crate::video::embed_url`]).
    Video(&'a str),
}

impl<'a> Segment<'a> {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Text(_) => SegmentKind::Text,
            Segment::Image(_) => SegmentKind::Image,
            Segment::Quote(_) => SegmentKind::Quote,
            Segment::Code { .. } => SegmentKind::Code,
            Segment::Video(_) => SegmentKind::Video,
        }
    }

    /// The text, URL or code body carried by this segment.
    pub fn payload(&self) -> &'a str {
        match *self {
            Segment::Text(s) | Segment::Image(s) | Segment::Quote(s) | Segment::Video(s) => s,
            Segment::Code { body, .. } => body,
        }
    }

    /// Language label, for labelled code segments only.
    pub fn language(&self) -> Option<&'a str> {
        match *self {
            Segment::Code { language, .. } => language,
            _ => None,
        }
    }

    /// True when the payload is empty after trimming.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.payload().trim().is_empty()
    }

    /// The segment written back in bracket-tag form.
    ///
    /// Tagged segments reparse to the same kind and payload. Text is
    /// returned as is.
    pub fn to_source(&self) -> String {
        let (open, close) = match *self {
            Segment::Text(text) => return text.to_owned(),
            Segment::Image(_) => (TagKind::Image.opener(), TagKind::Image.closer()),
            Segment::Quote(_) => (TagKind::Quote.opener(), TagKind::Quote.closer()),
            Segment::Video(_) => (TagKind::Video.opener(), TagKind::Video.closer()),
            Segment::Code {
                language: Some(lang),
                body,
            } => return format!("[code={lang}]{body}{}", TagKind::Code.closer()),
            Segment::Code { language: None, .. } => (TagKind::Code.opener(), TagKind::Code.closer()),
        };
        let payload = self.payload();
        let mut out = String::with_capacity(open.len() + payload.len() + close.len());
        out.push_str(open);
        out.push_str(payload);
        out.push_str(close);
        out
    }

    fn from_tag(open: OpenTag<'a>, body: &'a str) -> Self {
        match open.kind {
            TagKind::Image => Segment::Image(body),
            TagKind::Quote => Segment::Quote(body),
            TagKind::Code => Segment::Code {
                language: open.language,
                body,
            },
            TagKind::Video => Segment::Video(body),
        }
    }
}

/// Parse a content string into a lazy sequence of segments.
///
/// The iterator is `Clone`; cloning it before consuming restarts the
/// sequence from the same point.
///
/// Segments work on input of any size. Source spans from
/// [`Segments::spanned`] are `u32` offsets and saturate past 4GB.
pub fn parse(input: &str) -> Segments<'_> {
    Segments::new(input)
}

/// Parse optional content; `None` behaves like an empty string.
pub fn parse_opt(input: Option<&str>) -> Segments<'_> {
    Segments::new(input.unwrap_or(""))
}

/// Parse a content string and collect all segments.
pub fn segments(input: &str) -> Vec<Segment<'_>> {
    parse(input).collect()
}

/// Lazy segment iterator returned by [`parse`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    input: &'a str,
    pos: usize,
    pending: Option<(Segment<'a>, Range)>,
    closers: CloserCache,
}

/// A tagged span found by the scanner.
struct TagMatch<'a> {
    start: usize,
    end: usize,
    segment: Segment<'a>,
}

impl<'a> Segments<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            pending: None,
            closers: CloserCache::default(),
        }
    }

    /// Yield each segment together with its source span.
    ///
    /// Tagged segments span their tags; text segments span the untrimmed
    /// text piece between tags. Offsets past `u32::MAX` saturate, so spans
    /// are only exact for input under 4GB.
    pub fn spanned(self) -> Spanned<'a> {
        Spanned(self)
    }

    fn next_spanned(&mut self) -> Option<(Segment<'a>, Range)> {
        if let Some(pending) = self.pending.take() {
            return Some(pending);
        }

        let len = self.input.len();
        while self.pos < len {
            let text_start = self.pos;
            match self.find_tag(text_start) {
                Some(found) => {
                    self.pos = found.end;
                    let tagged = (found.segment, Range::from_usize(found.start, found.end));
                    let text = self.input[text_start..found.start].trim();
                    if text.is_empty() {
                        return Some(tagged);
                    }
                    self.pending = Some(tagged);
                    return Some((Segment::Text(text), Range::from_usize(text_start, found.start)));
                }
                None => {
                    self.pos = len;
                    let text = self.input[text_start..].trim();
                    if !text.is_empty() {
                        return Some((Segment::Text(text), Range::from_usize(text_start, len)));
                    }
                }
            }
        }
        None
    }

    /// Find the next complete tagged span at or after `from`.
    fn find_tag(&mut self, from: usize) -> Option<TagMatch<'a>> {
        let bytes = self.input.as_bytes();
        let mut at = from;
        while let Some(rel) = memchr(b'[', &bytes[at..]) {
            let start = at + rel;
            if let Some(open) = parse_open_tag(&self.input[start..]) {
                let body_start = start + open.len;
                if let Some(close) = self.closers.find(bytes, open.kind, body_start) {
                    return Some(TagMatch {
                        start,
                        end: close + open.kind.closer().len(),
                        segment: Segment::from_tag(open, &self.input[body_start..close]),
                    });
                }
                log::trace!(
                    "unterminated [{}] at byte {}, keeping it as text",
                    open.kind.name(),
                    start
                );
            }
            at = start + 1;
        }
        None
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_spanned().map(|(segment, _)| segment)
    }
}

impl FusedIterator for Segments<'_> {}

/// Iterator over `(segment, span)` pairs, see [`Segments::spanned`].
#[derive(Debug, Clone)]
pub struct Spanned<'a>(Segments<'a>);

impl<'a> Iterator for Spanned<'a> {
    type Item = (Segment<'a>, Range);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next_spanned()
    }
}

impl FusedIterator for Spanned<'_> {}

/// Nearest known closer position per tag kind.
///
/// Searches only move forward during a scan, so a cached closer at or after
/// the search start is still the nearest one, and a missing closer stays
/// missing. This keeps input full of unterminated openers linear.
#[derive(Debug, Clone, Copy, Default)]
struct CloserCache {
    slots: [Closer; 4],
}

#[derive(Debug, Clone, Copy, Default)]
enum Closer {
    #[default]
    Unknown,
    At(usize),
    Missing,
}

impl CloserCache {
    fn find(&mut self, bytes: &[u8], kind: TagKind, from: usize) -> Option<usize> {
        let slot = &mut self.slots[kind.index()];
        match *slot {
            Closer::At(pos) if pos >= from => return Some(pos),
            Closer::Missing => return None,
            _ => {}
        }
        match memmem::find(&bytes[from..], kind.closer().as_bytes()) {
            Some(rel) => {
                *slot = Closer::At(from + rel);
                Some(from + rel)
            }
            None => {
                *slot = Closer::Missing;
                None
            }
        }
    }
}
