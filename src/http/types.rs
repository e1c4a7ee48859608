//! REST error types

use thiserror::Error;

/// Errors from exchange REST calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connect, timeout, TLS, proxy)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// Body was not the expected JSON shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Exchange returned an error code inside a 2xx envelope
    #[error("Exchange error {code}: {msg}")]
    Exchange { code: String, msg: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Status {
            status: 429,
            body: "Too many requests".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 429: Too many requests");

        let err = ApiError::Exchange {
            code: "40034".to_string(),
            msg: "Parameter does not exist".to_string(),
        };
        assert_eq!(err.to_string(), "Exchange error 40034: Parameter does not exist");
    }
}
