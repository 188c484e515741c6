//! HTTP integration for [`cachectl`].
//!
//! Reads, explains and writes the `Cache-Control` header of
//! [`http`] requests and responses. See [`CacheControlExt`].

pub mod error;
pub mod headers;

pub use error::HttpError;
pub use headers::{CacheControlExt, HasHeaders};
