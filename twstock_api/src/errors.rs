//! Error types for the exchange API client.

/// Errors that can occur when requesting a daily quote report.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or invalid URL).
    #[error("Request failed")]
    RequestFailed,
    /// The exchange returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The body was not the JSON shape the feed documents.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
}
