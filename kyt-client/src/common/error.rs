//! Top-level error type for the KYT client

/// Errors occurring while configuring the KYT client or calling the KYT API
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// One of the credentials required to sign requests was empty or missing
    #[error("Configuration error: `{0}` must be a non-empty string")]
    Configuration(&'static str),

    /// Network error. Covers everything the HTTP transport raises, e.g.
    /// connection refused, timeouts and TLS failures
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be parsed as a JSON object
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The response object has no `data` field, or it is `null`
    #[error("Response is missing the `data` field")]
    MissingData,

    /// Mismatch between the record data model and the `data` object returned by the KYT API
    #[error("Invalid API response structure: {0}")]
    InvalidApiResponse(#[source] serde_json::Error),

    /// The operation has no known endpoint contract yet
    #[error("`{0}` is not implemented")]
    Unimplemented(&'static str),
}

impl Error {
    /// Whether the error came from decoding the response `data` into a record
    pub fn is_deserialization(&self) -> bool {
        matches!(self, Error::MissingData | Error::InvalidApiResponse(_))
    }
}
