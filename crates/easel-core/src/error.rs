/// Errors surfaced by platform collaborators
///
/// Deliberately transport-agnostic so the ports in [`crate::store`] stay
/// free of any particular HTTP client. The concrete client maps its own
/// failures into these variants.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The platform returned a non-success status
    #[error("platform returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error body, verbatim or extracted
        message: String,
    },

    /// The request never produced a response
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A URL could not be constructed or parsed
    #[error("invalid URL: {0}")]
    Url(String),
}
