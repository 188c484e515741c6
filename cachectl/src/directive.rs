//! A single directive as it appeared in a header.

use std::fmt;
use std::num::IntErrorKind;

use serde::Serialize;
use serde::ser::SerializeStruct;
use smol_str::SmolStr;

use crate::error::ValidationError;
use crate::registry::{self, Applicability, Category, DirectiveDefinition, DirectiveKind};

/// Interpreted argument of a directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DirectiveValue {
    /// A delta-seconds value of a numeric directive.
    Seconds(i64),
    /// The argument of a non-numeric or unknown directive, kept verbatim.
    Text(SmolStr),
}

impl fmt::Display for DirectiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveValue::Seconds(seconds) => write!(f, "{seconds}"),
            DirectiveValue::Text(text) => f.write_str(text),
        }
    }
}

/// One comma-separated segment of a `Cache-Control` value.
///
/// The name is kept exactly as written (after trimming). Names the registry
/// does not know are kept as well and carry the
/// [`UNKNOWN_DEFINITION`](registry::UNKNOWN_DEFINITION).
///
/// A numeric directive only ever carries [`DirectiveValue::Seconds`]; when its
/// argument is missing or not a number the value is `None` and the directive
/// reports itself as [malformed](ParsedDirective::is_malformed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDirective {
    name: SmolStr,
    kind: Option<DirectiveKind>,
    value: Option<DirectiveValue>,
    raw_value: Option<SmolStr>,
}

impl ParsedDirective {
    /// Builds a directive from a name and the optional text after `=`.
    ///
    /// Both parts are trimmed.
    pub fn new(name: &str, raw_value: Option<&str>) -> Self {
        let name = name.trim();
        let raw_value = raw_value.map(str::trim);
        let kind = DirectiveKind::lookup(name);

        let value = match (kind, raw_value) {
            (_, None) => None,
            (Some(kind), Some(raw)) if kind.is_numeric() => {
                parse_seconds(raw).map(DirectiveValue::Seconds)
            }
            (_, Some(raw)) => Some(DirectiveValue::Text(SmolStr::new(raw))),
        };

        Self {
            name: SmolStr::new(name),
            kind,
            value,
            raw_value: raw_value.map(SmolStr::new),
        }
    }

    /// Splits a `name[=value]` segment on its first `=`.
    pub fn from_segment(segment: &str) -> Self {
        match segment.split_once('=') {
            Some((name, raw)) => Self::new(name, Some(raw)),
            None => Self::new(segment, None),
        }
    }

    /// A known directive without an argument.
    pub fn flag(kind: DirectiveKind) -> Self {
        Self {
            name: SmolStr::new_static(kind.as_str()),
            kind: Some(kind),
            value: None,
            raw_value: None,
        }
    }

    /// A known directive with a delta-seconds argument.
    pub fn with_seconds(kind: DirectiveKind, seconds: i64) -> Self {
        Self {
            name: SmolStr::new_static(kind.as_str()),
            kind: Some(kind),
            value: Some(DirectiveValue::Seconds(seconds)),
            raw_value: Some(SmolStr::from(seconds.to_string())),
        }
    }

    /// Name as written in the header.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The registry entry, or `None` for unknown names.
    pub fn kind(&self) -> Option<DirectiveKind> {
        self.kind
    }

    /// Returns `true` if this is the given directive.
    pub fn is(&self, kind: DirectiveKind) -> bool {
        self.kind == Some(kind)
    }

    /// Interpreted argument.
    pub fn value(&self) -> Option<&DirectiveValue> {
        self.value.as_ref()
    }

    /// Argument as a number of seconds, if it is one.
    pub fn seconds(&self) -> Option<i64> {
        match self.value {
            Some(DirectiveValue::Seconds(seconds)) => Some(seconds),
            _ => None,
        }
    }

    /// Trimmed text after `=`, if there was an `=`.
    pub fn raw_value(&self) -> Option<&str> {
        self.raw_value.as_deref()
    }

    /// Registry definition, or the synthetic unknown definition.
    pub fn definition(&self) -> &'static DirectiveDefinition {
        self.kind
            .map(|kind| kind.definition())
            .unwrap_or(&registry::UNKNOWN_DEFINITION)
    }

    /// Human-readable explanation.
    pub fn description(&self) -> &'static str {
        self.definition().description
    }

    /// Semantic grouping.
    pub fn category(&self) -> Category {
        self.definition().category
    }

    /// Request/response applicability.
    pub fn applicability(&self) -> Applicability {
        self.definition().applicability
    }

    /// Returns `true` if this segment violates a syntax rule on its own.
    pub fn is_malformed(&self) -> bool {
        self.error().is_some()
    }

    /// The syntax rule this segment violates on its own, if any.
    ///
    /// Unknown `name=value` pairs are accepted. A bare token must be a known
    /// directive, and a numeric directive must carry a whole number.
    pub fn error(&self) -> Option<ValidationError> {
        match self.kind {
            Some(kind) if kind.is_numeric() => match (&self.value, &self.raw_value) {
                (Some(DirectiveValue::Seconds(_)), _) => None,
                (_, Some(raw)) if !raw.is_empty() => Some(ValidationError::InvalidNumber {
                    directive: self.name.clone(),
                    value: raw.clone(),
                }),
                _ => Some(ValidationError::MissingValue {
                    directive: self.name.clone(),
                }),
            },
            Some(_) => None,
            None if self.name.is_empty() || self.raw_value.is_none() => {
                Some(ValidationError::MalformedDirective(SmolStr::from(self.to_string())))
            }
            None => None,
        }
    }
}

/// Reads a delta-seconds argument. Integers too large for `i64` saturate.
fn parse_seconds(raw: &str) -> Option<i64> {
    match raw.parse::<i64>() {
        Ok(seconds) => Some(seconds),
        Err(error) => match error.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

impl fmt::Display for ParsedDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(raw) = &self.raw_value {
            write!(f, "={raw}")?;
        }
        Ok(())
    }
}

impl Serialize for ParsedDirective {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let definition = self.definition();
        let mut state = serializer.serialize_struct("ParsedDirective", 5)?;
        state.serialize_field("name", self.name.as_str())?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("description", definition.description)?;
        state.serialize_field("category", &definition.category)?;
        state.serialize_field("applicability", &definition.applicability)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_value() {
        let directive = ParsedDirective::from_segment("max-age = 3600");
        assert_eq!(directive.name(), "max-age");
        assert_eq!(directive.kind(), Some(DirectiveKind::MaxAge));
        assert_eq!(directive.seconds(), Some(3600));
        assert!(!directive.is_malformed());
    }

    #[test]
    fn test_numeric_missing_value() {
        let bare = ParsedDirective::from_segment("max-age");
        assert_eq!(bare.value(), None);
        assert_eq!(
            bare.error(),
            Some(ValidationError::MissingValue {
                directive: "max-age".into()
            })
        );

        let empty = ParsedDirective::from_segment("max-age=");
        assert_eq!(empty.raw_value(), Some(""));
        assert_eq!(
            empty.error(),
            Some(ValidationError::MissingValue {
                directive: "max-age".into()
            })
        );
    }

    #[test]
    fn test_numeric_garbage_value() {
        let directive = ParsedDirective::from_segment("s-maxage=1.5");
        assert_eq!(directive.value(), None);
        assert_eq!(
            directive.error(),
            Some(ValidationError::InvalidNumber {
                directive: "s-maxage".into(),
                value: "1.5".into(),
            })
        );
    }

    #[test]
    fn test_negative_seconds_parse() {
        let directive = ParsedDirective::from_segment("max-age=-10");
        assert_eq!(directive.seconds(), Some(-10));
        assert!(!directive.is_malformed());
    }

    #[test]
    fn test_oversized_seconds_saturate() {
        let directive = ParsedDirective::from_segment("max-age=99999999999999999999");
        assert_eq!(directive.seconds(), Some(i64::MAX));
        assert_eq!(directive.raw_value(), Some("99999999999999999999"));
        assert!(!directive.is_malformed());

        let negative = ParsedDirective::from_segment("stale-if-error=-99999999999999999999");
        assert_eq!(negative.seconds(), Some(i64::MIN));
        assert!(!negative.is_malformed());

        let garbage = ParsedDirective::from_segment("max-age=9999999999999999999x");
        assert_eq!(garbage.seconds(), None);
        assert!(garbage.is_malformed());
    }

    #[test]
    fn test_non_numeric_keeps_text() {
        let directive = ParsedDirective::from_segment("private=\"set-cookie\"");
        assert_eq!(
            directive.value(),
            Some(&DirectiveValue::Text("\"set-cookie\"".into()))
        );
        assert!(!directive.is_malformed());
    }

    #[test]
    fn test_unknown_with_value_is_accepted() {
        let directive = ParsedDirective::from_segment("foo=bar");
        assert_eq!(directive.kind(), None);
        assert_eq!(directive.description(), "Unknown directive");
        assert_eq!(directive.category(), Category::Other);
        assert_eq!(directive.applicability(), Applicability::Both);
        assert!(!directive.is_malformed());
    }

    #[test]
    fn test_bare_unknown_is_malformed() {
        let directive = ParsedDirective::from_segment("AAAAAAAAA");
        assert_eq!(
            directive.error(),
            Some(ValidationError::MalformedDirective("AAAAAAAAA".into()))
        );
    }

    #[test]
    fn test_splits_on_first_equals() {
        let directive = ParsedDirective::from_segment("ext=a=b");
        assert_eq!(directive.name(), "ext");
        assert_eq!(directive.raw_value(), Some("a=b"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ParsedDirective::flag(DirectiveKind::NoStore).to_string(), "no-store");
        assert_eq!(
            ParsedDirective::with_seconds(DirectiveKind::MaxAge, 60).to_string(),
            "max-age=60"
        );
    }

    #[test]
    fn test_serialize() {
        let directive = ParsedDirective::from_segment("max-age=60");
        let json = serde_json::to_value(&directive).unwrap();
        assert_eq!(json["name"], "max-age");
        assert_eq!(json["value"], 60);
        assert_eq!(json["category"], "Expiration");
        assert_eq!(json["applicability"], "Both");

        let flag = serde_json::to_value(ParsedDirective::flag(DirectiveKind::Public)).unwrap();
        assert!(flag["value"].is_null());
    }
}
