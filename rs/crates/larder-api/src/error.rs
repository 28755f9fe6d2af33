use std::time::Duration;

use thiserror::Error;

/// Faults raised while talking to a remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The timer won the race against the network call.
    #[error("Request took too long! Timeout after {} second(s)", .0.as_secs_f64())]
    Timeout(Duration),

    /// The server answered with a non-success status.
    #[error("{message} ({status})")]
    Http { status: u16, message: String },

    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
