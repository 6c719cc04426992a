use thiserror::Error;

/// Errors returned by the portal API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client, or a non-2xx
    /// HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The portal returned a non-empty `errors` array in its envelope.
    #[error("portal API error {code}: {message}")]
    Api { code: String, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL (or a path joined onto it) is not valid.
    #[error("invalid URL: {0}")]
    BadUrl(String),
}
