use std::time::Duration;

use thiserror::Error;

/// Everything that can go wrong between the upstream feed and a rendered
/// page. None of these are retried; the request handler converts any of
/// them into a single 500 error page carrying the message text.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("HTTP {status}: {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("invalid RSS format: {0}")]
    Malformed(String),
}
