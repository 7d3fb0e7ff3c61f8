use thiserror::Error;

use crate::http_client::HttpError;

/// Failure surfaced by the request pipeline.
///
/// The pipeline observes and annotates failures but never recovers them;
/// every variant is re-raised to the caller unmodified.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend-reported failure with an HTTP status code. The message
    /// prefers the body's structured `message` field when present.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Transport failure with no response: timeout, connectivity.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The request body could not be serialized; nothing was sent.
    #[error("request body could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// The HTTP status code, when the backend produced a response.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Serialization(_) => None,
        }
    }

    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}
