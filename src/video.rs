//! Video URL normalization.
//!
//! Watch-page URLs for YouTube and Vimeo are rewritten to their embeddable
//! player URLs. Anything unrecognized passes through unchanged.

use std::borrow::Cow;

const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed/";
const VIMEO_EMBED: &str = "https://player.vimeo.com/video/";

/// Rewrite a video URL to its embeddable-player form.
///
/// Recognized forms, with or without scheme and `www.`:
/// - `youtube.com/watch?v=ID` (also `m.youtube.com`)
/// - `youtu.be/ID`
/// - `vimeo.com/ID` with a numeric ID
///
/// # Example
/// ```
/// use tagmark::video::embed_url;
///
/// assert_eq!(
///     embed_url("https://youtu.be/abc123?t=5"),
///     "https://www.youtube.com/embed/abc123"
/// );
/// assert_eq!(embed_url("https://example.com/clip.mp4"), "https://example.com/clip.mp4");
/// ```
pub fn embed_url(url: &str) -> Cow<'_, str> {
    let trimmed = url.trim();
    match video_id(trimmed) {
        Some(VideoId::YouTube(id)) => Cow::Owned(format!("{YOUTUBE_EMBED}{id}")),
        Some(VideoId::Vimeo(id)) => Cow::Owned(format!("{VIMEO_EMBED}{id}")),
        None => Cow::Borrowed(url),
    }
}

/// A recognized video host and its ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoId<'a> {
    YouTube(&'a str),
    Vimeo(&'a str),
}

/// Extract the host-specific video ID from a watch-page URL.
pub fn video_id(url: &str) -> Option<VideoId<'_>> {
    let rest = strip_scheme(url);
    let (host, path) = rest.split_at(rest.find(['/', '?', '#']).unwrap_or(rest.len()));
    let host = host.strip_prefix("www.").unwrap_or(host);

    match host.to_ascii_lowercase().as_str() {
        "youtube.com" | "m.youtube.com" => {
            let query = path.strip_prefix("/watch?")?;
            let query = query.split('#').next().unwrap_or(query);
            query
                .split('&')
                .find_map(|pair| pair.strip_prefix("v="))
                .filter(|id| is_youtube_id(id))
                .map(VideoId::YouTube)
        }
        "youtu.be" => {
            let id = first_path_segment(path)?;
            is_youtube_id(id).then_some(VideoId::YouTube(id))
        }
        "vimeo.com" => {
            let id = first_path_segment(path)?;
            (!id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())).then_some(VideoId::Vimeo(id))
        }
        _ => None,
    }
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .or_else(|| url.strip_prefix("//"))
        .unwrap_or(url)
}

/// First path segment, without query or fragment.
fn first_path_segment(path: &str) -> Option<&str> {
    let path = path.strip_prefix('/')?;
    let end = path.find(['/', '?', '#']).unwrap_or(path.len());
    Some(&path[..end])
}

fn is_youtube_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
