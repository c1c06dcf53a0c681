//! Error types for the Notion API client.

use thiserror::Error;

/// Errors returned by calls to the Notion API.
#[derive(Debug, Error)]
pub enum NotionError {
    /// Transport failure or unreadable response body
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Notion answered with a non-success status
    #[error("Notion API error ({status}) {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Failed to decode Notion response: {0}")]
    Decode(#[from] serde_json::Error),
}
