use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::{Deserialize, Serialize};

pub const BUCKET_HEADER: &str = "x-ratelimit-bucket";
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RESET_AFTER_HEADER: &str = "x-ratelimit-reset-after";

/// Rate-limit state reported by RoVer on a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    pub bucket: Option<String>,
    pub remaining: Option<u32>,
    pub reset_after: Option<Duration>,
    pub retry_after: Option<Duration>,
}

impl RateLimitInfo {
    /// Read the rate-limit headers. Absent or unparsable values stay `None`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            bucket: header_str(headers, BUCKET_HEADER).map(str::to_string),
            remaining: header_str(headers, REMAINING_HEADER).and_then(|v| v.parse().ok()),
            reset_after: header_str(headers, RESET_AFTER_HEADER).and_then(parse_seconds),
            retry_after: header_str(headers, RETRY_AFTER.as_str())
                .and_then(|v| parse_retry_after(v, Utc::now())),
        }
    }

    /// True when the bucket has no requests left.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim)
}

/// Seconds, possibly fractional (`"1.5"`).
fn parse_seconds(v: &str) -> Option<Duration> {
    let secs: f64 = v.parse().ok()?;
    if secs.is_finite() && secs >= 0.0 {
        Some(Duration::from_secs_f64(secs))
    } else {
        None
    }
}

/// `Retry-After` is either delay-seconds or an HTTP-date. A date already
/// in the past means "retry now".
fn parse_retry_after(v: &str, now: DateTime<Utc>) -> Option<Duration> {
    if let Some(secs) = parse_seconds(v) {
        return Some(secs);
    }
    let at = DateTime::parse_from_rfc2822(v).ok()?.with_timezone(&Utc);
    Some((at - now).to_std().unwrap_or(Duration::ZERO))
}
