//! Error types for header access.

use cachectl::ValidationErrors;
use http::header::{InvalidHeaderValue, ToStrError};
use thiserror::Error;

/// Error reading or writing a `Cache-Control` header.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The header value contains bytes outside visible ASCII.
    #[error("cache-control header is not visible ASCII: {0}")]
    NotVisibleAscii(#[from] ToStrError),

    /// The header value was readable but failed validation.
    #[error("invalid cache-control header: {0}")]
    Invalid(#[from] ValidationErrors),

    /// A generated value could not be turned into a header value.
    #[error("generated cache-control value {value:?} is not a valid header value")]
    InvalidHeaderValue {
        /// The generated text.
        value: String,
        /// Underlying conversion error.
        #[source]
        error: InvalidHeaderValue,
    },
}
