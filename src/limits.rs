//! Length limits for markup and topic drafts.

/// Maximum length of a `[code=...]` language label, in bytes.
/// Longer labels make the opener literal text.
pub const MAX_LANGUAGE_LABEL_LEN: usize = 32;

/// Maximum topic title length, in characters (after trimming).
pub const MAX_TITLE_CHARS: usize = 200;

/// Minimum tag length, in characters (after trimming).
pub const MIN_TAG_CHARS: usize = 2;

/// Maximum tag length, in characters (after trimming).
pub const MAX_TAG_CHARS: usize = 20;

/// Maximum number of tags on a topic.
pub const MAX_TAGS: usize = 10;

/// Default excerpt length for list pages, in characters.
pub const DEFAULT_EXCERPT_CHARS: usize = 200;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_reasonable() {
        const { assert!(MIN_TAG_CHARS >= 1) };
        const { assert!(MIN_TAG_CHARS <= MAX_TAG_CHARS) };
        const { assert!(MAX_TAGS >= 1) };
        const { assert!(MAX_LANGUAGE_LABEL_LEN >= 8) };
        const { assert!(MAX_TITLE_CHARS >= 16) };
    }
}
