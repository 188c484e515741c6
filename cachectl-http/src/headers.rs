//! `Cache-Control` access on `http` types.
//!
//! [`CacheControlExt`] is implemented for everything that exposes a
//! [`HeaderMap`] through [`HasHeaders`]: the map itself, requests, responses
//! and their `Parts`.
//!
//! Only the first `Cache-Control` field is read. The value is expected to be
//! the single decoded field value; framing rules are not enforced.
//!
//! # Example
//!
//! ```
//! use cachectl::{Cacheability, DirectiveKind, GenerationConfig, TimeUnit, TimedDirective};
//! use cachectl_http::CacheControlExt;
//! use http::Response;
//!
//! let mut response = Response::new(());
//! let config = GenerationConfig::default()
//!     .cacheability(Cacheability::Public)
//!     .max_age(TimedDirective::new(10, TimeUnit::Minutes));
//! response.set_cache_control(&config).unwrap();
//!
//! let parsed = response.cache_control().unwrap();
//! assert_eq!(parsed.seconds(DirectiveKind::MaxAge), Some(600));
//! ```

use cachectl::{CacheControl, GenerationConfig};
use http::header::CACHE_CONTROL;
use http::{HeaderMap, HeaderValue, Request, Response, request, response};
use tracing::debug;

use crate::error::HttpError;

/// Trait for subjects that carry HTTP headers.
pub trait HasHeaders {
    /// Shared access to the headers.
    fn headers(&self) -> &HeaderMap;
    /// Mutable access to the headers.
    fn headers_mut(&mut self) -> &mut HeaderMap;
}

impl HasHeaders for HeaderMap {
    fn headers(&self) -> &HeaderMap {
        self
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        self
    }
}

impl<B> HasHeaders for Request<B> {
    fn headers(&self) -> &HeaderMap {
        Request::headers(self)
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        Request::headers_mut(self)
    }
}

impl<B> HasHeaders for Response<B> {
    fn headers(&self) -> &HeaderMap {
        Response::headers(self)
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        Response::headers_mut(self)
    }
}

impl HasHeaders for request::Parts {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

impl HasHeaders for response::Parts {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

/// Extension methods for reading and writing `Cache-Control`.
pub trait CacheControlExt: HasHeaders {
    /// Raw `Cache-Control` text, or `None` if the header is absent.
    fn cache_control_str(&self) -> Result<Option<&str>, HttpError> {
        match self.headers().get(CACHE_CONTROL) {
            Some(value) => Ok(Some(value.to_str()?)),
            None => Ok(None),
        }
    }

    /// Parses and validates `Cache-Control`.
    ///
    /// A missing header yields an empty [`CacheControl`].
    fn cache_control(&self) -> Result<CacheControl, HttpError> {
        let raw = self.cache_control_str()?.unwrap_or_default();
        Ok(cachectl::parse(raw)?)
    }

    /// Parses `Cache-Control` without validating it.
    fn cache_control_lenient(&self) -> Result<CacheControl, HttpError> {
        let raw = self.cache_control_str()?.unwrap_or_default();
        Ok(cachectl::parse_lenient(raw))
    }

    /// Explains `Cache-Control` in prose; see [`cachectl::explain_header`].
    fn explain_cache_control(&self) -> Result<String, HttpError> {
        let raw = self.cache_control_str()?.unwrap_or_default();
        Ok(cachectl::explain_header(raw))
    }

    /// Replaces `Cache-Control` with the value generated from `config`.
    ///
    /// The header is removed when the configuration produces no directives.
    fn set_cache_control(&mut self, config: &GenerationConfig) -> Result<(), HttpError> {
        let value = cachectl::generate(config);
        if value.is_empty() {
            debug!("removing empty cache-control header");
            self.headers_mut().remove(CACHE_CONTROL);
            return Ok(());
        }
        let header = HeaderValue::from_str(&value)
            .map_err(|error| HttpError::InvalidHeaderValue { value, error })?;
        self.headers_mut().insert(CACHE_CONTROL, header);
        Ok(())
    }
}

impl<T> CacheControlExt for T where T: HasHeaders + ?Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use cachectl::DirectiveKind;

    #[test]
    fn test_missing_header_is_empty() {
        let headers = HeaderMap::new();
        assert!(headers.cache_control().unwrap().is_empty());
        assert_eq!(headers.cache_control_str().unwrap(), None);
    }

    #[test]
    fn test_reads_first_value_only() {
        let mut headers = HeaderMap::new();
        headers.append(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.append(CACHE_CONTROL, HeaderValue::from_static("public, private"));
        let parsed = headers.cache_control().unwrap();
        assert!(parsed.contains(DirectiveKind::NoCache));
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_opaque_bytes_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CACHE_CONTROL,
            HeaderValue::from_bytes(b"max-age=\xff").unwrap(),
        );
        assert!(matches!(
            headers.cache_control(),
            Err(HttpError::NotVisibleAscii(_))
        ));
    }

    #[test]
    fn test_invalid_header() {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store, public"));
        match headers.cache_control() {
            Err(HttpError::Invalid(errors)) => assert_eq!(errors.len(), 1),
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert_eq!(headers.cache_control_lenient().unwrap().len(), 2);
    }

    #[test]
    fn test_set_removes_when_empty() {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("public"));
        headers
            .set_cache_control(&GenerationConfig::default())
            .unwrap();
        assert!(headers.get(CACHE_CONTROL).is_none());
    }
}
