//! Building a `Cache-Control` value from caching intents.
//!
//! [`GenerationConfig`] mirrors the shape of a settings form: a cacheability
//! selector, independent flags and four timed directives that can be switched
//! on and off individually. Field names serialize in camelCase so a form's
//! JSON state deserializes directly.
//!
//! Token order is fixed:
//!
//! 1. `no-store` alone when it is set, otherwise the scope (`public` or
//!    `private`) followed by `no-cache`, `must-revalidate`,
//!    `proxy-revalidate` and `immutable`
//! 2. enabled timed directives as `name=seconds`
//! 3. `no-transform`, which `no-store` does not suppress
//!
//! # Example
//!
//! ```
//! use cachectl::{Cacheability, GenerationConfig, TimeUnit, TimedDirective, generate};
//!
//! let config = GenerationConfig::default()
//!     .cacheability(Cacheability::Public)
//!     .max_age(TimedDirective::new(1, TimeUnit::Hours))
//!     .immutable(true);
//! assert_eq!(generate(&config), "public, immutable, max-age=3600");
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::directive::ParsedDirective;
use crate::parser::CacheControl;
use crate::registry::DirectiveKind;

/// Who may store the response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cacheability {
    /// Emit `public`.
    Public,
    /// Emit `private`.
    Private,
    /// Emit neither.
    #[default]
    None,
}

impl Cacheability {
    /// The directive this selector emits, if any.
    pub fn directive(&self) -> Option<DirectiveKind> {
        match self {
            Cacheability::Public => Some(DirectiveKind::Public),
            Cacheability::Private => Some(DirectiveKind::Private),
            Cacheability::None => None,
        }
    }
}

/// Unit of a [`TimedDirective`] amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// One second.
    #[default]
    Seconds,
    /// Sixty seconds.
    Minutes,
    /// 3 600 seconds.
    Hours,
    /// 86 400 seconds.
    Days,
}

impl TimeUnit {
    /// Length of one unit in seconds.
    pub const fn seconds(&self) -> u64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 3_600,
            TimeUnit::Days => 86_400,
        }
    }
}

/// A delta-seconds directive expressed as an amount of some unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimedDirective {
    /// How many units.
    pub amount: u32,
    /// Which unit.
    pub unit: TimeUnit,
    /// Whether the directive is emitted at all.
    pub enabled: bool,
}

impl TimedDirective {
    /// An enabled directive of `amount` units.
    pub fn new(amount: u32, unit: TimeUnit) -> Self {
        Self {
            amount,
            unit,
            enabled: true,
        }
    }

    /// A switched-off directive.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// An enabled directive using the largest unit that divides `duration`
    /// exactly. Sub-second precision is dropped and the amount saturates at
    /// `u32::MAX` seconds.
    pub fn from_duration(duration: Duration) -> Self {
        let seconds = duration.as_secs();
        let unit = [TimeUnit::Days, TimeUnit::Hours, TimeUnit::Minutes]
            .into_iter()
            .find(|unit| seconds > 0 && seconds % unit.seconds() == 0)
            .unwrap_or(TimeUnit::Seconds);
        let amount = u32::try_from(seconds / unit.seconds()).unwrap_or(u32::MAX);
        Self::new(amount, unit)
    }

    /// Total length in seconds.
    pub fn seconds(&self) -> u64 {
        u64::from(self.amount).saturating_mul(self.unit.seconds())
    }

    /// Total length as a [`Duration`].
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.seconds())
    }
}

/// Caching intents to turn into a `Cache-Control` value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Scope selector.
    pub cacheability: Cacheability,
    /// Emit only `no-store` (and `no-transform` if set).
    pub no_store: bool,
    /// Emit `no-cache`.
    pub no_cache: bool,
    /// Emit `must-revalidate`.
    pub must_revalidate: bool,
    /// Emit `proxy-revalidate`.
    pub proxy_revalidate: bool,
    /// Emit `no-transform`.
    pub no_transform: bool,
    /// Emit `immutable`.
    pub immutable: bool,
    /// `max-age`.
    pub max_age: TimedDirective,
    /// `s-maxage`.
    #[serde(rename = "sMaxAge")]
    pub s_max_age: TimedDirective,
    /// `stale-while-revalidate`.
    pub stale_while_revalidate: TimedDirective,
    /// `stale-if-error`.
    pub stale_if_error: TimedDirective,
}

impl GenerationConfig {
    /// Sets the scope selector.
    pub fn cacheability(mut self, cacheability: Cacheability) -> Self {
        self.cacheability = cacheability;
        self
    }

    /// Sets `no-store`.
    pub fn no_store(mut self, enabled: bool) -> Self {
        self.no_store = enabled;
        self
    }

    /// Sets `no-cache`.
    pub fn no_cache(mut self, enabled: bool) -> Self {
        self.no_cache = enabled;
        self
    }

    /// Sets `must-revalidate`.
    pub fn must_revalidate(mut self, enabled: bool) -> Self {
        self.must_revalidate = enabled;
        self
    }

    /// Sets `proxy-revalidate`.
    pub fn proxy_revalidate(mut self, enabled: bool) -> Self {
        self.proxy_revalidate = enabled;
        self
    }

    /// Sets `no-transform`.
    pub fn no_transform(mut self, enabled: bool) -> Self {
        self.no_transform = enabled;
        self
    }

    /// Sets `immutable`.
    pub fn immutable(mut self, enabled: bool) -> Self {
        self.immutable = enabled;
        self
    }

    /// Sets `max-age`.
    pub fn max_age(mut self, timed: TimedDirective) -> Self {
        self.max_age = timed;
        self
    }

    /// Sets `s-maxage`.
    pub fn s_max_age(mut self, timed: TimedDirective) -> Self {
        self.s_max_age = timed;
        self
    }

    /// Sets `stale-while-revalidate`.
    pub fn stale_while_revalidate(mut self, timed: TimedDirective) -> Self {
        self.stale_while_revalidate = timed;
        self
    }

    /// Sets `stale-if-error`.
    pub fn stale_if_error(mut self, timed: TimedDirective) -> Self {
        self.stale_if_error = timed;
        self
    }

    /// The directives this configuration produces, in emission order.
    pub fn tokens(&self) -> Vec<ParsedDirective> {
        let mut tokens = Vec::new();

        if self.no_store {
            tokens.push(ParsedDirective::flag(DirectiveKind::NoStore));
        } else {
            if let Some(scope) = self.cacheability.directive() {
                tokens.push(ParsedDirective::flag(scope));
            }

            let flags = [
                (self.no_cache, DirectiveKind::NoCache),
                (self.must_revalidate, DirectiveKind::MustRevalidate),
                (self.proxy_revalidate, DirectiveKind::ProxyRevalidate),
                (self.immutable, DirectiveKind::Immutable),
            ];
            tokens.extend(
                flags
                    .into_iter()
                    .filter(|(enabled, _)| *enabled)
                    .map(|(_, kind)| ParsedDirective::flag(kind)),
            );

            let timed = [
                (&self.max_age, DirectiveKind::MaxAge),
                (&self.s_max_age, DirectiveKind::SMaxAge),
                (&self.stale_while_revalidate, DirectiveKind::StaleWhileRevalidate),
                (&self.stale_if_error, DirectiveKind::StaleIfError),
            ];
            for (directive, kind) in timed {
                if directive.enabled {
                    // u32 amounts times at most 86 400 always fit in i64.
                    let seconds = i64::try_from(directive.seconds()).unwrap_or(i64::MAX);
                    tokens.push(ParsedDirective::with_seconds(kind, seconds));
                }
            }
        }

        if self.no_transform {
            tokens.push(ParsedDirective::flag(DirectiveKind::NoTransform));
        }
        tokens
    }

    /// The directives this configuration produces, as a header.
    pub fn to_cache_control(&self) -> CacheControl {
        CacheControl::new(self.tokens())
    }
}

/// Renders `config` as a `Cache-Control` value.
pub fn generate(config: &GenerationConfig) -> String {
    let header = config.to_cache_control().to_string();
    trace!(header = header.as_str(), "generated cache-control header");
    header
}
