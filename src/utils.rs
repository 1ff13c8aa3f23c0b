use crate::error::ScrapeError;
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;

/// Checks that the input is an http(s) URL and parses it
pub fn validate_url(input: &str) -> Result<Url, ScrapeError> {
    let input = input.trim();
    if !input.starts_with("http://") && !input.starts_with("https://") {
        return Err(ScrapeError::InvalidUrl(input.to_string()));
    }
    Url::parse(input).map_err(|_| ScrapeError::InvalidUrl(input.to_string()))
}

/// Seconds since the Unix epoch, used to name export files
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Cuts a string to at most `max_chars` characters, appending `...` when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut cut: String = text.chars().take(max_chars).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}
