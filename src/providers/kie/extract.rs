//! Result URL extraction
//!
//! The upstream result payload is loosely typed: depending on the model,
//! the video URL lives under `resultUrls[0]`, `videoUrl`, or `url`.
//! Extraction is an ordered list of pure strategies, first match wins.
//!
//! A payload that fails to parse yields no URL rather than an error:
//! the job state is still meaningful without it.

use serde_json::Value;

type ExtractStrategy = fn(&Value) -> Option<String>;

/// Strategies in precedence order.
const STRATEGIES: &[ExtractStrategy] = &[first_result_url, video_url_field, url_field];

fn first_result_url(result: &Value) -> Option<String> {
    result
        .get("resultUrls")?
        .get(0)?
        .as_str()
        .map(str::to_string)
}

fn video_url_field(result: &Value) -> Option<String> {
    result.get("videoUrl")?.as_str().map(str::to_string)
}

fn url_field(result: &Value) -> Option<String> {
    result.get("url")?.as_str().map(str::to_string)
}

/// Extract a video URL from a JSON-encoded result payload.
pub(super) fn extract_video_url(result_json: &str) -> Option<String> {
    let result: Value = match serde_json::from_str(result_json) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(%error, "failed to parse result payload, treating as no URL yet");
            return None;
        }
    };

    STRATEGIES.iter().find_map(|strategy| strategy(&result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_urls_list_wins_over_direct_fields() {
        let json = r#"{"resultUrls": ["https://x/video.mp4"], "videoUrl": "https://x/other.mp4"}"#;
        assert_eq!(
            extract_video_url(json),
            Some("https://x/video.mp4".to_string())
        );
    }

    #[test]
    fn empty_result_urls_falls_through_to_video_url() {
        let json = r#"{"resultUrls": [], "videoUrl": "https://x/other.mp4"}"#;
        assert_eq!(
            extract_video_url(json),
            Some("https://x/other.mp4".to_string())
        );
    }

    #[test]
    fn generic_url_field_is_the_last_resort() {
        let json = r#"{"url": "https://x/fallback.mp4"}"#;
        assert_eq!(
            extract_video_url(json),
            Some("https://x/fallback.mp4".to_string())
        );
    }

    #[test]
    fn malformed_payload_yields_none() {
        assert_eq!(extract_video_url("not-json"), None);
        assert_eq!(extract_video_url("{}"), None);
    }
}
