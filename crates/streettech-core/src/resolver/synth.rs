//! Synthesized metadata for a resolved identifier.

use crate::error::DownloaderError;
use crate::quality::Quality;
use crate::url_model::VideoId;
use crate::video::{thumbnail_url, VideoInfo};

const DURATION: &str = "5:30";
const VIEWS: &str = "1,234,567";
const UPLOAD_DATE: &str = "2024-01-15";

/// True if `id` survives URL parsing as exactly one unescaped path segment
/// of the thumbnail URL. Separators, dot segments, whitespace and
/// percent signs all fail.
fn is_single_segment(id: &VideoId, thumbnail: &str) -> bool {
    let Ok(parsed) = url::Url::parse(thumbnail) else {
        return false;
    };
    let Some(segments) = parsed.path_segments() else {
        return false;
    };
    let segments: Vec<&str> = segments.collect();
    !id.as_str().contains('%')
        && segments == ["vi", id.as_str(), "maxresdefault.jpg"]
}

/// Builds the metadata record for `id`. Fails with `ResolutionFailed` if the
/// identifier cannot be embedded unchanged in the thumbnail URL.
pub fn synthesize(id: &VideoId) -> Result<VideoInfo, DownloaderError> {
    let thumbnail = thumbnail_url(id);
    if !is_single_segment(id, &thumbnail) {
        tracing::warn!(video_id = %id, "identifier does not fit a thumbnail url");
        return Err(DownloaderError::ResolutionFailed);
    }
    Ok(VideoInfo {
        id: id.clone(),
        title: format!("YouTube video {}", id),
        duration: DURATION.to_string(),
        views: Some(VIEWS.to_string()),
        upload_date: Some(UPLOAD_DATE.to_string()),
        thumbnail,
        available_qualities: Quality::ALL.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url_model::validate;

    #[test]
    fn derived_from_identifier() {
        let id = validate("https://youtu.be/abc123").unwrap();
        let info = synthesize(&id).unwrap();
        assert_eq!(info.id, id);
        assert!(info.title.contains("abc123"));
        assert_eq!(info.duration, "5:30");
        assert_eq!(
            info.thumbnail,
            "https://img.youtube.com/vi/abc123/maxresdefault.jpg"
        );
        assert_eq!(info.available_qualities.len(), 6);
    }

    #[test]
    fn identifiers_that_do_not_round_trip_fail() {
        for raw in [
            "youtu.be/a/b",
            "youtu.be/a b",
            "youtu.be/a%41",
            "youtu.be/a\\b",
            "youtu.be/..",
            "youtu.be/a\tb",
        ] {
            let id = validate(raw).unwrap();
            assert_eq!(synthesize(&id), Err(DownloaderError::ResolutionFailed), "{raw:?}");
        }
    }

    #[test]
    fn url_safe_punctuation_is_kept() {
        let id = validate("youtu.be/dQw4w9WgXcQ-_.~").unwrap();
        let info = synthesize(&id).unwrap();
        assert_eq!(
            info.thumbnail,
            "https://img.youtube.com/vi/dQw4w9WgXcQ-_.~/maxresdefault.jpg"
        );
    }

    #[test]
    fn deterministic() {
        let id = validate("youtu.be/xyz").unwrap();
        assert_eq!(synthesize(&id).unwrap(), synthesize(&id).unwrap());
    }
}
