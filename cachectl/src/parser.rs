//! Parsing and validation of `Cache-Control` values.
//!
//! Two entry points share the same tokenizer:
//!
//! - [`parse`] validates the result and returns either the directives or every
//!   rule violation found. Partial results are never returned on failure.
//! - [`parse_lenient`] never fails and returns whatever could be understood,
//!   which lets a presentation layer explain the readable parts of a broken
//!   header.
//!
//! Unknown directives are preserved and are not an error by themselves.
//! Duplicate directives are preserved in input order.
//!
//! # Example
//!
//! ```
//! use cachectl::{DirectiveKind, parse};
//!
//! let header = parse("public, max-age=3600").unwrap();
//! assert_eq!(header.len(), 2);
//! assert_eq!(header.seconds(DirectiveKind::MaxAge), Some(3600));
//!
//! let errors = parse("public, private").unwrap_err();
//! assert_eq!(errors.messages(), vec!["public and private are mutually exclusive"]);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, trace};

use crate::directive::ParsedDirective;
use crate::error::{ValidationError, ValidationErrors};
use crate::explain::{self, Summary};
use crate::registry::DirectiveKind;

/// An ordered list of directives taken from one `Cache-Control` value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CacheControl {
    directives: Vec<ParsedDirective>,
}

impl CacheControl {
    /// Wraps an existing directive list.
    pub fn new(directives: Vec<ParsedDirective>) -> Self {
        Self { directives }
    }

    /// Directives in input order.
    pub fn directives(&self) -> &[ParsedDirective] {
        &self.directives
    }

    /// Iterates over directives in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParsedDirective> {
        self.directives.iter()
    }

    /// Number of directives, duplicates included.
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Returns `true` if no directive was stated.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Returns `true` if `kind` appears at least once.
    pub fn contains(&self, kind: DirectiveKind) -> bool {
        self.directives.iter().any(|d| d.is(kind))
    }

    /// First occurrence of `kind`.
    pub fn get(&self, kind: DirectiveKind) -> Option<&ParsedDirective> {
        self.directives.iter().find(|d| d.is(kind))
    }

    /// Seconds carried by the first occurrence of `kind`.
    pub fn seconds(&self, kind: DirectiveKind) -> Option<i64> {
        self.get(kind).and_then(ParsedDirective::seconds)
    }

    /// Applies the validation rules, collecting every violation.
    ///
    /// Conflicts are reported first, then malformed segments in input order.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        let has_scope = self.contains(DirectiveKind::Public) || self.contains(DirectiveKind::Private);
        if self.contains(DirectiveKind::NoStore) && has_scope {
            errors.push(ValidationError::NoStoreWithScope);
        }
        if self.contains(DirectiveKind::Public) && self.contains(DirectiveKind::Private) {
            errors.push(ValidationError::PublicAndPrivate);
        }
        errors.extend(self.directives.iter().filter_map(ParsedDirective::error));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::new(errors))
        }
    }

    /// Explains every directive, followed by a summary when there is one.
    pub fn explain(&self) -> String {
        explain::explain(self)
    }

    /// Overall reading of the header; `None` for fewer than two directives.
    pub fn summary(&self) -> Option<Summary> {
        explain::summarize(&self.directives)
    }

    /// Consumes the header and returns its directives.
    pub fn into_directives(self) -> Vec<ParsedDirective> {
        self.directives
    }
}

impl fmt::Display for CacheControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, directive) in self.directives.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{directive}")?;
        }
        Ok(())
    }
}

impl FromStr for CacheControl {
    type Err = ValidationErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl<'a> IntoIterator for &'a CacheControl {
    type Item = &'a ParsedDirective;
    type IntoIter = std::slice::Iter<'a, ParsedDirective>;

    fn into_iter(self) -> Self::IntoIter {
        self.directives.iter()
    }
}

impl IntoIterator for CacheControl {
    type Item = ParsedDirective;
    type IntoIter = std::vec::IntoIter<ParsedDirective>;

    fn into_iter(self) -> Self::IntoIter {
        self.directives.into_iter()
    }
}

impl FromIterator<ParsedDirective> for CacheControl {
    fn from_iter<T: IntoIterator<Item = ParsedDirective>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Parses and validates a `Cache-Control` value.
///
/// An empty or blank value is valid and yields no directives.
pub fn parse(header: &str) -> Result<CacheControl, ValidationErrors> {
    let span = tracing::debug_span!(
        "cachectl.parse",
        header.len = header.len(),
        directives = tracing::field::Empty,
        valid = tracing::field::Empty,
    );
    let _enter = span.enter();

    let parsed = tokenize(header);
    span.record("directives", parsed.len());

    match parsed.validate() {
        Ok(()) => {
            span.record("valid", true);
            Ok(parsed)
        }
        Err(errors) => {
            span.record("valid", false);
            debug!(errors = errors.len(), "cache-control header failed validation");
            Err(errors)
        }
    }
}

/// Parses a `Cache-Control` value without validating it.
pub fn parse_lenient(header: &str) -> CacheControl {
    let _span = tracing::trace_span!("cachectl.parse_lenient", header.len = header.len()).entered();
    tokenize(header)
}

fn tokenize(header: &str) -> CacheControl {
    header
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let directive = ParsedDirective::from_segment(segment);
            trace!(
                name = directive.name(),
                known = directive.kind().is_some(),
                "parsed directive"
            );
            directive
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::DirectiveValue;

    #[test]
    fn test_empty_is_valid() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   ").unwrap().is_empty());
        assert!(parse(" , ,").unwrap().is_empty());
    }

    #[test]
    fn test_order_and_values() {
        let header = parse("public, max-age=3600").unwrap();
        let directives = header.directives();
        assert_eq!(directives[0].name(), "public");
        assert_eq!(directives[0].value(), None);
        assert_eq!(directives[1].name(), "max-age");
        assert_eq!(directives[1].value(), Some(&DirectiveValue::Seconds(3600)));
    }

    #[test]
    fn test_trailing_commas_dropped() {
        let header = parse("no-cache,, must-revalidate ,").unwrap();
        assert_eq!(header.len(), 2);
    }

    #[test]
    fn test_duplicates_preserved() {
        let header = parse("max-age=10, max-age=20").unwrap();
        assert_eq!(header.len(), 2);
        assert_eq!(header.seconds(DirectiveKind::MaxAge), Some(10));
    }

    #[test]
    fn test_empty_numeric_value() {
        let errors = parse("public, max-age=").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].directive(), Some(DirectiveKind::MaxAge));
    }

    #[test]
    fn test_bare_garbage_token() {
        let errors = parse("AAAAAAAAA").unwrap_err();
        assert_eq!(errors.messages(), vec!["malformed directive: AAAAAAAAA"]);
    }

    #[test]
    fn test_unknown_pair_is_valid() {
        let header = parse("foo=bar").unwrap();
        assert_eq!(header.len(), 1);
        assert_eq!(header.directives()[0].kind(), None);
    }

    #[test]
    fn test_conflicts() {
        assert_eq!(
            parse("no-store, public").unwrap_err().into_inner(),
            vec![ValidationError::NoStoreWithScope]
        );
        assert_eq!(
            parse("public, private").unwrap_err().into_inner(),
            vec![ValidationError::PublicAndPrivate]
        );
    }

    #[test]
    fn test_errors_accumulate() {
        let errors = parse("no-store, public, private, max-age=soon").unwrap_err();
        assert_eq!(
            errors.into_inner(),
            vec![
                ValidationError::NoStoreWithScope,
                ValidationError::PublicAndPrivate,
                ValidationError::InvalidNumber {
                    directive: "max-age".into(),
                    value: "soon".into(),
                },
            ]
        );
    }

    #[test]
    fn test_lenient_keeps_invalid_input() {
        let header = parse_lenient("public, private, max-age=");
        assert_eq!(header.len(), 3);
        assert!(header.validate().is_err());
    }

    #[test]
    fn test_display_is_canonical() {
        let header = parse("  public ,max-age = 60,,").unwrap();
        assert_eq!(header.to_string(), "public, max-age=60");
    }

    #[test]
    fn test_from_str() {
        let header: CacheControl = "no-cache".parse().unwrap();
        assert!(header.contains(DirectiveKind::NoCache));
        assert!("public, private".parse::<CacheControl>().is_err());
    }
}
