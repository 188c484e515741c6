//! Static table of the known `Cache-Control` directives.
//!
//! The registry is a closed mapping from [`DirectiveKind`] to a
//! [`DirectiveDefinition`]. It answers three questions about any name:
//!
//! - is it recognized ([`is_known`])
//! - does it carry a delta-seconds value ([`is_numeric`])
//! - what does it mean ([`definition`])
//!
//! Unrecognized names are a valid answer, not a failure: [`definition`]
//! returns [`UNKNOWN_DEFINITION`] for them.
//!
//! # Example
//!
//! ```
//! use cachectl::registry::{self, Category, DirectiveKind};
//!
//! assert!(registry::is_known("max-age"));
//! assert!(registry::is_numeric("Max-Age"));
//! assert!(!registry::is_known("x-vendor"));
//!
//! let kind = DirectiveKind::lookup("no-cache").unwrap();
//! assert_eq!(kind.definition().category, Category::Validation);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Semantic grouping of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Who may store the response and whether it may be stored at all.
    General,
    /// How long a stored response stays fresh or usable while stale.
    Expiration,
    /// When a stored response has to be confirmed with the origin.
    Validation,
    /// Everything else, including unknown directives.
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::General => "General",
            Category::Expiration => "Expiration",
            Category::Validation => "Validation",
            Category::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Where a directive is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Applicability {
    /// Only in request headers.
    Request,
    /// Only in response headers.
    Response,
    /// In both request and response headers.
    Both,
}

impl Applicability {
    /// Returns `true` if the directive may appear on a request.
    #[inline]
    pub fn allows_request(&self) -> bool {
        matches!(self, Applicability::Request | Applicability::Both)
    }

    /// Returns `true` if the directive may appear on a response.
    #[inline]
    pub fn allows_response(&self) -> bool {
        matches!(self, Applicability::Response | Applicability::Both)
    }
}

impl fmt::Display for Applicability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Applicability::Request => "Request",
            Applicability::Response => "Response",
            Applicability::Both => "Both",
        };
        f.write_str(name)
    }
}

/// Meaning and classification of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DirectiveDefinition {
    /// Human-readable explanation of the directive.
    pub description: &'static str,
    /// Semantic grouping.
    pub category: Category,
    /// Whether the directive belongs on requests, responses or both.
    pub applicability: Applicability,
}

/// Definition used for every name the registry does not know.
pub const UNKNOWN_DEFINITION: DirectiveDefinition = DirectiveDefinition {
    description: "Unknown directive",
    category: Category::Other,
    applicability: Applicability::Both,
};

const PUBLIC: DirectiveDefinition = DirectiveDefinition {
    description: "The response may be stored by any cache, including shared caches",
    category: Category::General,
    applicability: Applicability::Response,
};

const PRIVATE: DirectiveDefinition = DirectiveDefinition {
    description: "The response is intended for a single user and must not be stored by shared caches",
    category: Category::General,
    applicability: Applicability::Response,
};

const NO_CACHE: DirectiveDefinition = DirectiveDefinition {
    description: "The response may be stored, but must be revalidated with the origin server before each reuse",
    category: Category::Validation,
    applicability: Applicability::Both,
};

const NO_STORE: DirectiveDefinition = DirectiveDefinition {
    description: "The response must not be stored in any cache",
    category: Category::General,
    applicability: Applicability::Both,
};

const MAX_AGE: DirectiveDefinition = DirectiveDefinition {
    description: "Maximum time the response is considered fresh",
    category: Category::Expiration,
    applicability: Applicability::Both,
};

const S_MAXAGE: DirectiveDefinition = DirectiveDefinition {
    description: "Overrides max-age for shared caches such as CDNs and proxies",
    category: Category::Expiration,
    applicability: Applicability::Response,
};

const MUST_REVALIDATE: DirectiveDefinition = DirectiveDefinition {
    description: "Once stale, the response must not be used without successful revalidation with the origin server",
    category: Category::Validation,
    applicability: Applicability::Response,
};

const PROXY_REVALIDATE: DirectiveDefinition = DirectiveDefinition {
    description: "Like must-revalidate, but applies only to shared caches",
    category: Category::Validation,
    applicability: Applicability::Response,
};

const NO_TRANSFORM: DirectiveDefinition = DirectiveDefinition {
    description: "Intermediaries must not transform the payload",
    category: Category::Other,
    applicability: Applicability::Both,
};

const IMMUTABLE: DirectiveDefinition = DirectiveDefinition {
    description: "The response will not change while fresh, so it need not be revalidated",
    category: Category::Expiration,
    applicability: Applicability::Response,
};

const STALE_WHILE_REVALIDATE: DirectiveDefinition = DirectiveDefinition {
    description: "A stale response may be served while it is revalidated in the background",
    category: Category::Expiration,
    applicability: Applicability::Response,
};

const STALE_IF_ERROR: DirectiveDefinition = DirectiveDefinition {
    description: "A stale response may be served if the origin server responds with an error",
    category: Category::Expiration,
    applicability: Applicability::Both,
};

const MIN_FRESH: DirectiveDefinition = DirectiveDefinition {
    description: "The client wants a response that stays fresh for at least this long",
    category: Category::Expiration,
    applicability: Applicability::Request,
};

const MAX_STALE: DirectiveDefinition = DirectiveDefinition {
    description: "The client accepts a response that has been stale for up to this long",
    category: Category::Expiration,
    applicability: Applicability::Request,
};

const ONLY_IF_CACHED: DirectiveDefinition = DirectiveDefinition {
    description: "The client only wants a stored response and will not contact the origin server",
    category: Category::Other,
    applicability: Applicability::Request,
};

/// A directive the registry knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectiveKind {
    /// `public`
    Public,
    /// `private`
    Private,
    /// `no-cache`
    NoCache,
    /// `no-store`
    NoStore,
    /// `max-age=<seconds>`
    MaxAge,
    /// `s-maxage=<seconds>`
    #[serde(rename = "s-maxage")]
    SMaxAge,
    /// `must-revalidate`
    MustRevalidate,
    /// `proxy-revalidate`
    ProxyRevalidate,
    /// `no-transform`
    NoTransform,
    /// `immutable`
    Immutable,
    /// `stale-while-revalidate=<seconds>`
    StaleWhileRevalidate,
    /// `stale-if-error=<seconds>`
    StaleIfError,
    /// `min-fresh=<seconds>`
    MinFresh,
    /// `max-stale=<seconds>`
    MaxStale,
    /// `only-if-cached`
    OnlyIfCached,
}

impl DirectiveKind {
    /// Every known directive, in registry order.
    pub const ALL: [DirectiveKind; 15] = [
        DirectiveKind::Public,
        DirectiveKind::Private,
        DirectiveKind::NoCache,
        DirectiveKind::NoStore,
        DirectiveKind::MaxAge,
        DirectiveKind::SMaxAge,
        DirectiveKind::MustRevalidate,
        DirectiveKind::ProxyRevalidate,
        DirectiveKind::NoTransform,
        DirectiveKind::Immutable,
        DirectiveKind::StaleWhileRevalidate,
        DirectiveKind::StaleIfError,
        DirectiveKind::MinFresh,
        DirectiveKind::MaxStale,
        DirectiveKind::OnlyIfCached,
    ];

    /// Canonical lowercase token.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DirectiveKind::Public => "public",
            DirectiveKind::Private => "private",
            DirectiveKind::NoCache => "no-cache",
            DirectiveKind::NoStore => "no-store",
            DirectiveKind::MaxAge => "max-age",
            DirectiveKind::SMaxAge => "s-maxage",
            DirectiveKind::MustRevalidate => "must-revalidate",
            DirectiveKind::ProxyRevalidate => "proxy-revalidate",
            DirectiveKind::NoTransform => "no-transform",
            DirectiveKind::Immutable => "immutable",
            DirectiveKind::StaleWhileRevalidate => "stale-while-revalidate",
            DirectiveKind::StaleIfError => "stale-if-error",
            DirectiveKind::MinFresh => "min-fresh",
            DirectiveKind::MaxStale => "max-stale",
            DirectiveKind::OnlyIfCached => "only-if-cached",
        }
    }

    /// Finds the directive for `name`, ignoring ASCII case.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }

    /// Returns `true` for directives whose argument is a number of seconds.
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            DirectiveKind::MaxAge
                | DirectiveKind::SMaxAge
                | DirectiveKind::StaleWhileRevalidate
                | DirectiveKind::StaleIfError
                | DirectiveKind::MinFresh
                | DirectiveKind::MaxStale
        )
    }

    /// Returns the static definition of this directive.
    pub const fn definition(&self) -> &'static DirectiveDefinition {
        match self {
            DirectiveKind::Public => &PUBLIC,
            DirectiveKind::Private => &PRIVATE,
            DirectiveKind::NoCache => &NO_CACHE,
            DirectiveKind::NoStore => &NO_STORE,
            DirectiveKind::MaxAge => &MAX_AGE,
            DirectiveKind::SMaxAge => &S_MAXAGE,
            DirectiveKind::MustRevalidate => &MUST_REVALIDATE,
            DirectiveKind::ProxyRevalidate => &PROXY_REVALIDATE,
            DirectiveKind::NoTransform => &NO_TRANSFORM,
            DirectiveKind::Immutable => &IMMUTABLE,
            DirectiveKind::StaleWhileRevalidate => &STALE_WHILE_REVALIDATE,
            DirectiveKind::StaleIfError => &STALE_IF_ERROR,
            DirectiveKind::MinFresh => &MIN_FRESH,
            DirectiveKind::MaxStale => &MAX_STALE,
            DirectiveKind::OnlyIfCached => &ONLY_IF_CACHED,
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`DirectiveKind`] from an unknown name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown cache directive: {0}")]
pub struct UnknownDirective(pub String);

impl FromStr for DirectiveKind {
    type Err = UnknownDirective;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| UnknownDirective(s.to_string()))
    }
}

/// Returns `true` if `name` is a known directive.
pub fn is_known(name: &str) -> bool {
    DirectiveKind::lookup(name).is_some()
}

/// Returns `true` if `name` is a known directive carrying a number of seconds.
pub fn is_numeric(name: &str) -> bool {
    DirectiveKind::lookup(name).is_some_and(|kind| kind.is_numeric())
}

/// Returns the definition for `name`, or [`UNKNOWN_DEFINITION`].
pub fn definition(name: &str) -> &'static DirectiveDefinition {
    DirectiveKind::lookup(name)
        .map(|kind| kind.definition())
        .unwrap_or(&UNKNOWN_DEFINITION)
}
