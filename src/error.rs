//! Errors raised while talking to the platform API

/// A failed listing or detail fetch
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a usable response (DNS, refused connection,
    /// timeout, truncated body)
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status
    #[error("HTTP {code} from {url}")]
    Status { code: u16, url: String },

    /// The body is not JSON of the expected shape
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ureq::Error> for FetchError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, resp) => FetchError::Status {
                code,
                url: resp.get_url().to_string(),
            },
            other => FetchError::Request(other.to_string()),
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        FetchError::Request(e.to_string())
    }
}
