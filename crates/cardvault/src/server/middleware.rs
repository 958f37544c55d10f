//! Request limits applied to the router.
//!
//! Tracing, timeout enforcement, and response compression layers are attached
//! in [`super::router::build`]; this module holds the values they are sized by.

use std::time::Duration;

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default request body limit; uploads are the only large bodies.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Transport limits for the HTTP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Requests running longer than this are answered with `408`.
    pub request_timeout: Duration,
    /// Bodies larger than this are rejected before reaching a handler.
    pub max_upload_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            request_timeout: REQUEST_TIMEOUT,
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}
