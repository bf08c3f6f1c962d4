use thiserror::Error;

/// Error surface of the REST bindings.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, timeout). Retryable.
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("failed to parse API response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
