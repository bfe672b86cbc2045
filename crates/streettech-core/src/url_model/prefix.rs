//! Anchored match of the accepted YouTube URL shapes.

const SCHEMES: [&str; 2] = ["https://", "http://"];
const WWW: &str = "www.";

/// Path prefixes that precede the video identifier.
pub const VIDEO_PREFIXES: [&str; 3] = ["youtube.com/watch?v=", "youtu.be/", "youtube.com/embed/"];

/// Returns the remainder of `raw` after an optional scheme, an optional `www.`
/// and one of [`VIDEO_PREFIXES`], all anchored at the start of the input.
///
/// Matching is case-sensitive. Returns `None` when no shape matches.
pub fn strip_video_prefix(raw: &str) -> Option<&str> {
    let rest = SCHEMES
        .iter()
        .find_map(|s| raw.strip_prefix(s))
        .unwrap_or(raw);
    let rest = rest.strip_prefix(WWW).unwrap_or(rest);
    VIDEO_PREFIXES.iter().find_map(|p| rest.strip_prefix(p))
}
