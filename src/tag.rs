//! Opening-tag recognition for the bracket-tag vocabulary.
//!
//! Only lowercase tags are recognized:
//! ```text
//! [image]  [quote]  [code]  [code=lang]  [video]
//! ```
//! Anything else starting with `[` is literal text.

use memchr::{memchr, memmem};

use crate::limits::MAX_LANGUAGE_LABEL_LEN;

/// The four tag kinds that wrap a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Image,
    Quote,
    Code,
    Video,
}

impl TagKind {
    pub const ALL: [TagKind; 4] = [TagKind::Image, TagKind::Quote, TagKind::Code, TagKind::Video];

    /// Tag name as written between the brackets.
    pub const fn name(self) -> &'static str {
        match self {
            TagKind::Image => "image",
            TagKind::Quote => "quote",
            TagKind::Code => "code",
            TagKind::Video => "video",
        }
    }

    /// Closing tag, e.g. `[/image]`.
    pub const fn closer(self) -> &'static str {
        match self {
            TagKind::Image => "[/image]",
            TagKind::Quote => "[/quote]",
            TagKind::Code => "[/code]",
            TagKind::Video => "[/video]",
        }
    }

    /// Opening tag without attributes, e.g. `[image]`.
    pub const fn opener(self) -> &'static str {
        match self {
            TagKind::Image => "[image]",
            TagKind::Quote => "[quote]",
            TagKind::Code => "[code]",
            TagKind::Video => "[video]",
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    fn from_name(name: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name().as_bytes() == name)
    }
}

/// A recognized opening tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenTag<'a> {
    pub kind: TagKind,
    /// Language label from `[code=lang]`.
    pub language: Option<&'a str>,
    /// Length of the opening tag in bytes, brackets included.
    pub len: usize,
}

/// Try to recognize an opening tag at the start of `input`.
///
/// `input` must start at a `[`. Returns `None` for anything that is not one
/// of the known openers.
///
/// # Example
/// ```
/// use tagmark::tag::{parse_open_tag, TagKind};
///
/// let tag = parse_open_tag("[code=rust]fn main() {}[/code]").unwrap();
/// assert_eq!(tag.kind, TagKind::Code);
/// assert_eq!(tag.language, Some("rust"));
/// assert_eq!(tag.len, 11);
/// ```
pub fn parse_open_tag(input: &str) -> Option<OpenTag<'_>> {
    let bytes = input.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }

    let name_end = 1 + bytes[1..]
        .iter()
        .position(|b| !b.is_ascii_lowercase())
        .unwrap_or(bytes.len() - 1);
    let kind = TagKind::from_name(&bytes[1..name_end])?;

    match bytes.get(name_end) {
        Some(b']') => Some(OpenTag {
            kind,
            language: None,
            len: name_end + 1,
        }),
        Some(b'=') if kind == TagKind::Code => {
            let label_start = name_end + 1;
            let label_len = bytes[label_start..]
                .iter()
                .take(MAX_LANGUAGE_LABEL_LEN + 1)
                .position(|&b| b == b']')?;
            let label = &input[label_start..label_start + label_len];
            if label.is_empty() || !label.bytes().all(is_label_byte) {
                return None;
            }
            Some(OpenTag {
                kind,
                language: Some(label),
                len: label_start + label_len + 1,
            })
        }
        _ => None,
    }
}

/// Check whether `text` has an opening tag with no closer after it.
///
/// Such an opener is harmless on its own, but pairs with a closer that is
/// appended later (for example the next block of a serialized editor).
///
/// # Example
/// ```
/// use tagmark::tag::has_unclosed_opener;
///
/// assert!(has_unclosed_opener("Type [image] to add pictures"));
/// assert!(!has_unclosed_opener("[quote]hi[/quote] and [b]"));
/// ```
pub fn has_unclosed_opener(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut at = 0;
    while let Some(rel) = memchr(b'[', &bytes[at..]) {
        let start = at + rel;
        at = start + 1;
        if let Some(open) = parse_open_tag(&text[start..]) {
            let body = start + open.len;
            let closer = open.kind.closer();
            match memmem::find(&bytes[body..], closer.as_bytes()) {
                Some(close) => at = body + close + closer.len(),
                None => return true,
            }
        }
    }
    false
}

#[inline]
fn is_label_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'+' | b'#' | b'.' | b'-')
}
