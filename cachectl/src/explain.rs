//! Prose explanations of parsed directives.
//!
//! Every directive gets one line of the form
//! `name[=value]: description[ (duration)]`. When two or more directives are
//! present a [`Summary`] is appended after a blank line.
//!
//! The summary is chosen from an ordered list, first match wins, so that
//! prohibitions and contradictions always dominate freshness details:
//!
//! 1. `no-store` present
//! 2. `no-cache` together with `max-age`
//! 3. `public` together with `private`
//! 4. `max-age` without `no-cache` and without `must-revalidate`
//! 5. anything else

use std::fmt;

use crate::directive::{DirectiveValue, ParsedDirective};
use crate::duration::HumanDuration;
use crate::parser::{self, CacheControl};
use crate::registry::DirectiveKind;

/// `max-age` values up to this many seconds count as brief.
pub const BRIEF_MAX_AGE: i64 = 60;

/// Overall reading of a header with two or more directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Summary {
    /// `no-store` disables caching and overrides everything else.
    NoStore,
    /// Stored, but revalidated before every use.
    AlwaysRevalidate,
    /// `public` and `private` contradict; `private` wins.
    ScopeConflict,
    /// `max-age` is zero or negative.
    ImmediatelyStale,
    /// `max-age` is positive but short.
    BrieflyFresh(i64),
    /// `max-age` is long enough to matter.
    Fresh(i64),
    /// Nothing more specific applies.
    Combined,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::NoStore => f.write_str(
                "Caching is disabled entirely: no-store forbids storing the response, so all other directives are ignored.",
            ),
            Summary::AlwaysRevalidate => f.write_str(
                "The response may be cached, but must be revalidated with the origin server before every use.",
            ),
            Summary::ScopeConflict => f.write_str(
                "public and private contradict each other; private takes precedence, so only the user's browser may cache the response.",
            ),
            Summary::ImmediatelyStale => f.write_str(
                "The response is stale as soon as it is received and must be revalidated before reuse.",
            ),
            Summary::BrieflyFresh(seconds) => write!(
                f,
                "The response may be cached briefly ({}) and reused without revalidation.",
                HumanDuration(*seconds)
            ),
            Summary::Fresh(seconds) => write!(
                f,
                "The response may be cached and reused without revalidation for {} until it becomes stale.",
                HumanDuration(*seconds)
            ),
            Summary::Combined => f.write_str("This header combines multiple caching directives."),
        }
    }
}

/// Picks the summary for `directives`; `None` for fewer than two.
pub fn summarize(directives: &[ParsedDirective]) -> Option<Summary> {
    if directives.len() < 2 {
        return None;
    }

    let has = |kind| directives.iter().any(|d: &ParsedDirective| d.is(kind));
    let max_age = directives.iter().find(|d| d.is(DirectiveKind::MaxAge));

    let summary = if has(DirectiveKind::NoStore) {
        Summary::NoStore
    } else if has(DirectiveKind::NoCache) && max_age.is_some() {
        Summary::AlwaysRevalidate
    } else if has(DirectiveKind::Public) && has(DirectiveKind::Private) {
        Summary::ScopeConflict
    } else {
        match max_age.and_then(ParsedDirective::seconds) {
            Some(seconds)
                if !has(DirectiveKind::NoCache) && !has(DirectiveKind::MustRevalidate) =>
            {
                if seconds <= 0 {
                    Summary::ImmediatelyStale
                } else if seconds <= BRIEF_MAX_AGE {
                    Summary::BrieflyFresh(seconds)
                } else {
                    Summary::Fresh(seconds)
                }
            }
            _ => Summary::Combined,
        }
    };
    Some(summary)
}

/// One line describing a single directive.
pub fn explain_directive(directive: &ParsedDirective) -> String {
    let mut line = directive.to_string();
    line.push_str(": ");
    line.push_str(directive.description());
    if let Some(DirectiveValue::Seconds(seconds)) = directive.value() {
        line.push_str(&format!(" ({})", HumanDuration(*seconds)));
    }
    line
}

/// Explains every directive, newline-joined, followed by the summary.
pub fn explain_directives(directives: &[ParsedDirective]) -> String {
    let mut text = directives
        .iter()
        .map(explain_directive)
        .collect::<Vec<_>>()
        .join("\n");
    if let Some(summary) = summarize(directives) {
        text.push_str("\n\nSummary: ");
        text.push_str(&summary.to_string());
    }
    text
}

/// Explains an already parsed header.
pub fn explain(header: &CacheControl) -> String {
    explain_directives(header.directives())
}

/// Parses `header` and explains it, or describes why it is invalid.
pub fn explain_header(header: &str) -> String {
    match parser::parse(header) {
        Ok(parsed) => explain_directives(parsed.directives()),
        Err(errors) => format!("Invalid header: {errors}"),
    }
}
