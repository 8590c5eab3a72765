//! Gateway error types.

use thiserror::Error;

/// Errors that can occur talking to the workforce backend.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {0}")]
    Status(u16),

    #[error("Upstream rejected the request: {0}")]
    Rejected(String),

    #[error("Invalid response from upstream: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Whether the error reports an upstream-side rejection rather than a
    /// transport problem. Both are treated alike by the editor loads.
    pub fn is_rejection(&self) -> bool {
        matches!(self, GatewayError::Rejected(_))
    }
}
