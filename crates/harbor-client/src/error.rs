use thiserror::Error;

/// Error returned by every client call.
///
/// `Remote` is the only server-level failure: the server answered with an
/// `{"error": ...}` envelope and the message is carried verbatim. The client
/// does not classify remote causes further (not-found, forbidden, and
/// validation failures are indistinguishable on this wire). Everything below
/// the envelope is `Transport`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("server error: {0}")]
    Remote(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("missing configuration: {0}")]
    Config(String),
}

/// Failures beneath the envelope: the request never completed, or the
/// response body could not be read as the expected shape.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is not a success/error envelope: {0}")]
    MalformedEnvelope(String),
}

pub type Result<T> = std::result::Result<T, Error>;
