/// Errors from talking to the trip planner.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not complete (connection, TLS, body read, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The planner answered with a non-success status.
    #[error("planner rejected the request ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// HTTP status code of the response.
        status: u16,
        /// Human-readable message from the response body, if it had one.
        message: Option<String>,
    },

    /// The response body was not the JSON we expected.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A success response carried no usable trip identifier.
    #[error("response did not include a trip identifier")]
    MissingTripId,
}
