//! Shared HTTP response helpers for the REST store.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, non-success → [`StoreError::Api`]) so request code stays focused
//! on building URLs and mapping bodies.

use tess_core::service::RecordCount;

use crate::error::StoreError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success (including `206 Partial Content`).
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(StoreError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(StoreError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 1 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(1)
}

/// Raw `Content-Range` header value, if present and readable.
pub fn content_range(resp: &reqwest::Response) -> Option<String> {
    resp.headers()
        .get(reqwest::header::CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Read the match count from a `Content-Range` value (`0-4/7`, `*/0`).
///
/// An unknown total (`0-4/*`) or a missing header yields an inexact count of
/// `returned` items.
pub fn parse_content_range(header: Option<&str>, returned: usize) -> RecordCount {
    header
        .and_then(|value| value.rsplit_once('/'))
        .and_then(|(_, total)| total.trim().parse::<u64>().ok())
        .map_or_else(
            || RecordCount::at_least(returned as u64),
            RecordCount::exact,
        )
}
