//! Error types for the resource layer.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Everything that can go wrong while reading or writing a resource.
///
/// The first four variants come from the remote call path and are never
/// retried. `InvalidId` and `NotFound` are raised at the boundary where
/// identifier text enters the system.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Network failure or timeout.
    #[error("error making request: {0}")]
    Transport(#[from] reqwest::Error),

    /// The datastore answered outside the 2xx range.
    #[error("received non-success status code: {0}")]
    Status(u16),

    /// The request body could not be serialized.
    #[error("error marshalling request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body was not the JSON we expected.
    #[error("error parsing response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("invalid {kind} ID: {value}")]
    InvalidId { kind: &'static str, value: String },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
}

impl ServiceError {
    /// Whether this error was produced by the remote call path.
    ///
    /// Consumers map remote errors to a server-side failure and the
    /// others to a client-side one.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Status(_) | Self::Encode(_) | Self::Decode(_)
        )
    }
}
