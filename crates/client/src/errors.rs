use thiserror::Error;

/// Failure classes for backend calls.
///
/// `Network` covers transport failures (the request never completed),
/// `Status` non-2xx responses, `Api` a `success: false` envelope inside an
/// otherwise-OK response, and `Decode` an unreadable body. The message in
/// `Status` and `Api` is the server-provided one where available, suitable
/// for surfacing directly to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),
    #[error("http {status}: {message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Api(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("cache error: {0}")]
    Cache(String),
    #[error("not authenticated")]
    Unauthenticated,
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Status { status: 401, .. })
    }
}
