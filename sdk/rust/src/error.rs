use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    /// The gateway itself could not be reached.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with its relay failure envelope.
    #[error("gateway could not reach the API: {message}")]
    Gateway { message: String },

    /// The API answered with a non-success status.
    #[error("API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidArgument(String),
}
